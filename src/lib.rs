// vim: tw=80
//! A flexible run-time mock object library for Rust.
//!
//! Standin creates mock objects that stand in for real collaborators during
//! unit tests.  Unlike compile-time mocking, a standin mock is built at run
//! time and intercepts calls by *name*: any method, declared or not, can be
//! routed through its single [`Mock::call`] entry point, with arguments and
//! return values carried as dynamic [`Value`]s.  That makes it the
//! expectation engine behind whatever interception seam your code under
//! test uses — a trait object adapter, a function pointer table, or a test
//! build of a facade.
//!
//! The basic idea:
//! * Create a mock, usually inside a [`use_mock`] or [`use_mocks`] scope.
//! * Declare expectations with [`Mock::expect`].  Each expectation can have
//!   argument matchers, a call-count constraint, a position in the call
//!   order, and a program of responses.
//! * Hand the mock to the code under test.  Calls are matched against the
//!   expectations and answered with the programmed responses.
//! * At scope end every expectation's contract is verified; violations are
//!   reported as [`MockError`]s with precise diagnostics.
//!
//! # User Guide
//!
//! * [`Getting started`](#getting-started)
//! * [`Return values`](#return-values)
//! * [`Matching arguments`](#matching-arguments)
//! * [`Call counts`](#call-counts)
//! * [`Call ordering`](#call-ordering)
//! * [`Raising errors`](#raising-errors)
//! * [`Yielding to a block`](#yielding-to-a-block)
//! * [`Strict and lenient mocks`](#strict-and-lenient-mocks)
//!
//! ## Getting started
//! ```
//! use standin::{args, vals, use_mock, Value};
//!
//! use_mock("warehouse", |m| {
//!     m.expect("remove").with(args!["widget", 10]).once().returns(true);
//!     let removed = m.call("remove", vals!["widget", 10])?;
//!     assert_eq!(Value::Bool(true), removed);
//!     Ok(())
//! }).unwrap();
//! ```
//!
//! ## Return values
//!
//! An expectation's responses form a program: each configured step answers
//! one matching call, and the final step repeats forever.  An expectation
//! with no responses returns [`Value::Nil`].
//!
//! ```
//! use standin::{vals, use_mock, Value};
//!
//! use_mock("counter", |m| {
//!     m.expect("next").returns_many(vals![1, 2, 3]);
//!     assert_eq!(Value::Int(1), m.call("next", vals![])?);
//!     assert_eq!(Value::Int(2), m.call("next", vals![])?);
//!     assert_eq!(Value::Int(3), m.call("next", vals![])?);
//!     assert_eq!(Value::Int(3), m.call("next", vals![])?);
//!     Ok(())
//! }).unwrap();
//! ```
//!
//! A step can also compute its answer from the actual arguments:
//!
//! ```
//! use standin::{vals, use_mock, Value};
//!
//! use_mock("adder", |m| {
//!     m.expect("add").returning(|args| match (&args[0], &args[1]) {
//!         (Value::Int(a), Value::Int(b)) => Value::Int(a + b),
//!         _ => Value::Nil,
//!     });
//!     assert_eq!(Value::Int(7), m.call("add", vals![3, 4])?);
//!     Ok(())
//! }).unwrap();
//! ```
//!
//! ## Matching arguments
//!
//! Expectations on the same method are tried in declaration order and the
//! first match wins, so declare the specific before the general.  Matchers
//! are literals, regex patterns, [`Kind`] tags, or arbitrary predicates —
//! anything implementing [`Predicate<Value>`](Predicate) via
//! [`satisfying`].
//!
//! ```
//! use standin::{any, args, vals, use_mock, Value};
//!
//! use_mock("greeter", |m| {
//!     m.expect("hi").with(args![1]).returns(10);
//!     m.expect("hi").with(args![any()]).returns(0);
//!     assert_eq!(Value::Int(10), m.call("hi", vals![1])?);
//!     assert_eq!(Value::Int(0), m.call("hi", vals![2])?);
//!     Ok(())
//! }).unwrap();
//! ```
//!
//! ## Call counts
//!
//! By default an expectation may be called any number of times.  Constrain
//! it with [`times`](Expectation::times), [`once`](Expectation::once),
//! [`never`](Expectation::never), or bound it with
//! [`at_least`](Expectation::at_least)/[`at_most`](Expectation::at_most)
//! modifiers.  Violations surface at verification.
//!
//! ```
//! use standin::{vals, use_mock, MockError};
//!
//! let err = use_mock("m", |m| {
//!     m.expect("hi").times(2);
//!     m.call("hi", vals![])?;
//!     Ok(())
//! }).unwrap_err();
//! assert!(matches!(err, MockError::WrongCallCount { .. }));
//! ```
//!
//! ## Call ordering
//!
//! [`ordered`](Expectation::ordered) expectations must be reached in
//! declaration order; expectations sharing an
//! [`ordered_in`](Expectation::ordered_in) group occupy one position and
//! may interleave.  Mocks created together with [`use_mocks`] can order
//! across mocks with [`globally`](Expectation::globally).
//!
//! ```
//! use standin::{vals, use_mock, MockError};
//!
//! let err = use_mock("m", |m| {
//!     m.expect("hi").ordered();
//!     m.expect("lo").ordered();
//!     m.call("lo", vals![])?;
//!     m.call("hi", vals![])
//! }).unwrap_err();
//! assert!(matches!(err, MockError::OutOfOrder { .. }));
//! ```
//!
//! ## Raising errors
//!
//! A response step can raise a [`UserError`], which propagates to the
//! caller unmodified, wrapped in [`MockError::Raised`] so it stays
//! distinguishable from the library's own failures.
//!
//! ```
//! use standin::{vals, use_mock, MockError, UserError};
//!
//! let err = use_mock("m", |m| {
//!     m.expect("fetch")
//!         .raises(UserError::with_message("Unavailable", "service down"));
//!     m.call("fetch", vals![])
//! }).unwrap_err();
//! assert_eq!(
//!     MockError::Raised(UserError::with_message("Unavailable",
//!                                               "service down")),
//!     err);
//! ```
//!
//! ## Yielding to a block
//!
//! Collaborators that drive a caller-supplied closure are mocked with
//! [`yields`](Expectation::yields) and exercised through
//! [`Mock::call_with_block`].
//!
//! ```
//! use standin::{vals, use_mock, Value};
//!
//! use_mock("m", |m| {
//!     m.expect("each").yields(vals![1, 2]);
//!     let got = m.call_with_block("each", vals![], Value::List)?;
//!     assert_eq!(Value::List(vals![1, 2]), got);
//!     Ok(())
//! }).unwrap();
//! ```
//!
//! ## Strict and lenient mocks
//!
//! Calling a method with no declared expectation is an error
//! ([`MockError::NoSuchExpectation`]) — undeclared calls are usually bugs.
//! Opt in to lenient mode with [`Mock::set_lenient`] to have them return
//! [`Value::Nil`] instead.
//!
//! Free functions can be mocked through the [`redirect`] module, which
//! routes a function name to a mock for the duration of the test.

mod director;
mod error;
mod expectation;
mod matcher;
mod mock;
mod ordering;
pub mod redirect;
mod value;

pub use error::{MockError, UserError};
pub use expectation::Expectation;
pub use matcher::{any, eq, matching, of_kind, satisfying, ArgMatcher};
pub use mock::{use_mock, use_mocks, Mock};
pub use ordering::GroupTag;
pub use value::{Kind, Value};

pub use predicates::prelude::{predicate, Predicate};
