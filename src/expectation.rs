// vim: tw=80
//! A single "should receive" declaration and its chainable configuration.
//!
//! [`Expectation`] is the handle returned by
//! [`Mock::expect`](crate::Mock::expect).  Every configuration method
//! returns `&Self` so declarations read as one chain:
//!
//! ```
//! # use standin::{args, vals, Mock};
//! let m = Mock::named("greeter");
//! m.expect("hi").with(args![1]).times(2).returns(10);
//! # m.call("hi", vals![1]).unwrap();
//! # m.call("hi", vals![1]).unwrap();
//! # m.verify().unwrap();
//! ```
//!
//! The response program is a list of steps consumed one per matching call;
//! the final step repeats forever.  Yield steps advance the same way but on
//! their own track, so a single call can both yield to the caller's block
//! and return a configured value.

use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::Rc;

use crate::error::{MockError, UserError};
use crate::matcher::ArgMatcher;
use crate::ordering::{GroupTag, OrderingManager};
use crate::value::{format_call, Value};

/// How an expectation accepts a call's argument list.
enum ArgRule {
    /// Any arguments at all (the default).
    Any,
    /// No arguments and no block.
    None,
    /// One matcher per argument; the counts must agree.
    Matchers(Rc<Vec<ArgMatcher>>),
}

enum Response {
    Value(Value),
    Compute(Rc<dyn Fn(&[Value]) -> Value>),
    Raise(UserError),
}

/// {exact, at_least, at_most} call-count constraint.  All three can be set
/// at once; verification checks them in that order so an exact mismatch
/// wins the diagnostic.
#[derive(Clone, Copy, Debug, Default)]
struct Cardinality {
    exact: Option<usize>,
    at_least: Option<usize>,
    at_most: Option<usize>,
}

impl Cardinality {
    /// May this expectation still accept another call?
    fn is_eligible(&self, count: usize) -> bool {
        if let Some(n) = self.exact {
            count < n
        } else if let Some(n) = self.at_most {
            count < n
        } else {
            true
        }
    }

    fn verify(&self, description: &str, actual: usize)
        -> Result<(), MockError>
    {
        if let Some(expected) = self.exact {
            if actual != expected {
                return Err(MockError::WrongCallCount {
                    expectation: description.to_owned(),
                    expected,
                    actual,
                });
            }
        }
        if let Some(minimum) = self.at_least {
            if actual < minimum {
                return Err(MockError::CalledTooFewTimes {
                    expectation: description.to_owned(),
                    minimum,
                    actual,
                });
            }
        }
        if let Some(maximum) = self.at_most {
            if actual > maximum {
                return Err(MockError::CalledTooManyTimes {
                    expectation: description.to_owned(),
                    maximum,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Pending `at_least()`/`at_most()` modifier, applied by the next count
/// setter.
#[derive(Clone, Copy)]
enum CountBound {
    AtLeast,
    AtMost,
}

struct OrderSlot {
    number: usize,
    manager: Rc<RefCell<OrderingManager>>,
}

pub(crate) struct ExpInner {
    mock_name: String,
    method: String,
    arg_rule: ArgRule,
    cardinality: Cardinality,
    pending_bound: Option<CountBound>,
    responses: Vec<Response>,
    next_response: usize,
    yields: Vec<Vec<Value>>,
    next_yield: usize,
    count: usize,
    order: Option<OrderSlot>,
    global: bool,
    ordering: Rc<RefCell<OrderingManager>>,
    container: Option<Rc<RefCell<OrderingManager>>>,
}

impl ExpInner {
    pub(crate) fn new(
        mock_name: String,
        method: &str,
        ordering: Rc<RefCell<OrderingManager>>,
        container: Option<Rc<RefCell<OrderingManager>>>,
    ) -> Self {
        ExpInner {
            mock_name,
            method: method.to_owned(),
            arg_rule: ArgRule::Any,
            cardinality: Cardinality::default(),
            pending_bound: None,
            responses: Vec::new(),
            next_response: 0,
            yields: Vec::new(),
            next_yield: 0,
            count: 0,
            order: None,
            global: false,
            ordering,
            container,
        }
    }

    pub(crate) fn matches(&self, args: &[Value], block_given: bool) -> bool {
        match &self.arg_rule {
            ArgRule::Any => true,
            ArgRule::None => args.is_empty() && !block_given,
            ArgRule::Matchers(ms) => {
                ms.len() == args.len()
                    && ms.iter().zip(args).all(|(m, a)| m.matches(a))
            }
        }
    }

    pub(crate) fn is_eligible(&self) -> bool {
        self.cardinality.is_eligible(self.count)
    }

    /// Dispatch one matched call: validate ordering, bump the counter,
    /// advance the yield and response programs, and produce the result.
    pub(crate) fn invoke(
        &mut self,
        args: &[Value],
        block: Option<&mut dyn FnMut(Vec<Value>) -> Value>,
    ) -> Result<Value, MockError> {
        if let Some(slot) = &self.order {
            if slot.manager.borrow_mut().validate(slot.number).is_err() {
                return Err(MockError::OutOfOrder {
                    mock: self.mock_name.clone(),
                    call: format_call(&self.method, args),
                });
            }
        }
        self.count += 1;

        let mut block_result = None;
        if !self.yields.is_empty() {
            let idx = self.next_yield.min(self.yields.len() - 1);
            if self.next_yield < self.yields.len() {
                self.next_yield += 1;
            }
            match block {
                Some(b) => block_result = Some(b(self.yields[idx].clone())),
                None => {
                    return Err(MockError::NoBlockGiven {
                        expectation: self.to_string(),
                    })
                }
            }
        }

        if !self.responses.is_empty() {
            let idx = self.next_response.min(self.responses.len() - 1);
            if self.next_response < self.responses.len() {
                self.next_response += 1;
            }
            match &self.responses[idx] {
                Response::Value(v) => Ok(v.clone()),
                Response::Compute(f) => Ok(f(args)),
                Response::Raise(e) => Err(MockError::Raised(e.clone())),
            }
        } else if let Some(r) = block_result {
            Ok(r)
        } else {
            Ok(Value::Nil)
        }
    }

    pub(crate) fn verify(&self) -> Result<(), MockError> {
        self.cardinality.verify(&self.to_string(), self.count)
    }

    fn set_count(&mut self, n: usize) {
        match self.pending_bound.take() {
            Some(CountBound::AtLeast) => self.cardinality.at_least = Some(n),
            Some(CountBound::AtMost) => self.cardinality.at_most = Some(n),
            None => self.cardinality.exact = Some(n),
        }
    }

    fn set_order(&mut self, tag: Option<GroupTag>) {
        let manager = if self.global {
            // Checked when `globally()` set the flag.
            self.container.clone().unwrap()
        } else {
            self.ordering.clone()
        };
        let number = manager.borrow_mut().assign(tag);
        self.order = Some(OrderSlot { number, manager });
    }

    fn set_global(&mut self) {
        if self.container.is_none() {
            panic!(
                "Mock '{}' is not in a container and cannot be globally \
                 ordered; create it with use_mocks",
                self.mock_name
            );
        }
        self.global = true;
    }
}

impl Display for ExpInner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.method)?;
        match &self.arg_rule {
            ArgRule::Any => write!(f, "...")?,
            ArgRule::None => {}
            ArgRule::Matchers(ms) => {
                for (i, m) in ms.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{m}")?;
                }
            }
        }
        write!(f, ")")
    }
}

/// The chainable handle for one "should receive" declaration.
///
/// Declared for several method names at once
/// ([`Mock::expect_many`](crate::Mock::expect_many)), the handle configures
/// every name identically while each keeps its own call counter.
#[derive(Clone)]
pub struct Expectation {
    exps: Vec<Rc<RefCell<ExpInner>>>,
}

impl Expectation {
    pub(crate) fn new(exps: Vec<Rc<RefCell<ExpInner>>>) -> Self {
        Expectation { exps }
    }

    /// Require the call's arguments to satisfy `matchers`, one per
    /// argument.  Overrides any previous argument rule.
    pub fn with(&self, matchers: Vec<ArgMatcher>) -> &Self {
        let shared = Rc::new(matchers);
        for e in &self.exps {
            e.borrow_mut().arg_rule = ArgRule::Matchers(shared.clone());
        }
        self
    }

    /// Require the call to have no arguments and no block.
    pub fn with_no_args(&self) -> &Self {
        for e in &self.exps {
            e.borrow_mut().arg_rule = ArgRule::None;
        }
        self
    }

    /// Accept any arguments (the default).
    pub fn with_any_args(&self) -> &Self {
        for e in &self.exps {
            e.borrow_mut().arg_rule = ArgRule::Any;
        }
        self
    }

    /// Require exactly `n` matching calls, or narrow a preceding
    /// [`at_least`](Self::at_least)/[`at_most`](Self::at_most) modifier.
    pub fn times(&self, n: usize) -> &Self {
        for e in &self.exps {
            e.borrow_mut().set_count(n);
        }
        self
    }

    /// Shorthand for [`times(1)`](Self::times).
    pub fn once(&self) -> &Self {
        self.times(1)
    }

    /// Shorthand for [`times(2)`](Self::times).
    pub fn twice(&self) -> &Self {
        self.times(2)
    }

    /// Forbid the expectation from ever being called.
    pub fn never(&self) -> &Self {
        self.times(0)
    }

    /// Allow any number of calls, clearing earlier count constraints.
    pub fn zero_or_more_times(&self) -> &Self {
        for e in &self.exps {
            let mut inner = e.borrow_mut();
            inner.pending_bound = None;
            inner.cardinality = Cardinality::default();
        }
        self
    }

    /// Turn the next count setter into a minimum: `at_least().once()`.
    pub fn at_least(&self) -> &Self {
        for e in &self.exps {
            e.borrow_mut().pending_bound = Some(CountBound::AtLeast);
        }
        self
    }

    /// Turn the next count setter into a maximum: `at_most().times(3)`.
    pub fn at_most(&self) -> &Self {
        for e in &self.exps {
            e.borrow_mut().pending_bound = Some(CountBound::AtMost);
        }
        self
    }

    /// Append one fixed-value step to the response program.
    pub fn returns<V: Into<Value>>(&self, v: V) -> &Self {
        let v = v.into();
        for e in &self.exps {
            e.borrow_mut().responses.push(Response::Value(v.clone()));
        }
        self
    }

    /// Append one fixed-value step per element: `returns_many(vals![1, 2,
    /// 3])` answers 1, 2, 3, 3, 3...
    pub fn returns_many(&self, values: Vec<Value>) -> &Self {
        for v in values {
            self.returns(v);
        }
        self
    }

    /// Append a computed step; `f` receives the actual arguments.
    pub fn returning<F>(&self, f: F) -> &Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        let f: Rc<dyn Fn(&[Value]) -> Value> = Rc::new(f);
        for e in &self.exps {
            e.borrow_mut().responses.push(Response::Compute(f.clone()));
        }
        self
    }

    /// Append a step that raises `err` to the caller.
    pub fn raises(&self, err: UserError) -> &Self {
        for e in &self.exps {
            e.borrow_mut().responses.push(Response::Raise(err.clone()));
        }
        self
    }

    /// Append a yield step: the next matching call passes `values` to the
    /// caller's block.  The last yield step repeats.
    pub fn yields(&self, values: Vec<Value>) -> &Self {
        for e in &self.exps {
            e.borrow_mut().yields.push(values.clone());
        }
        self
    }

    /// Give this expectation the next position in its mock's call sequence
    /// (or the shared cross-mock sequence after
    /// [`globally`](Self::globally)).
    pub fn ordered(&self) -> &Self {
        for e in &self.exps {
            e.borrow_mut().set_order(None);
        }
        self
    }

    /// Like [`ordered`](Self::ordered), but expectations sharing `tag`
    /// occupy a single position and may be called in any relative order.
    pub fn ordered_in<G: Into<GroupTag>>(&self, tag: G) -> &Self {
        let tag = tag.into();
        for e in &self.exps {
            e.borrow_mut().set_order(Some(tag.clone()));
        }
        self
    }

    /// Order against every mock in the enclosing container rather than
    /// just this mock.  Must precede [`ordered`](Self::ordered).
    ///
    /// # Panics
    ///
    /// Panics if the mock was not created inside a
    /// [`use_mocks`](crate::use_mocks) container.
    pub fn globally(&self) -> &Self {
        for e in &self.exps {
            e.borrow_mut().set_global();
        }
        self
    }

    /// The order number assigned by [`ordered`](Self::ordered), if any.
    pub fn order_number(&self) -> Option<usize> {
        self.exps
            .first()
            .and_then(|e| e.borrow().order.as_ref().map(|s| s.number))
    }
}

impl Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.exps.len() == 1 {
            write!(f, "{}", self.exps[0].borrow())
        } else {
            write!(f, "[")?;
            for (i, e) in self.exps.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", e.borrow())?;
            }
            write!(f, "]")
        }
    }
}
