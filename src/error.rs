// vim: tw=80
//! The failure taxonomy a mock can report.
//!
//! Dispatch failures (`NoMatchingHandler`, `NoSuchExpectation`,
//! `NoBlockGiven`) surface at the call site; cardinality and ordering
//! failures surface from [`Mock::verify`](crate::Mock::verify) or at the end
//! of a [`use_mocks`](crate::use_mocks) scope.  A user-configured raise is
//! wrapped in [`MockError::Raised`] and propagates unmodified, so tests can
//! always tell a stubbed failure from a broken expectation.

use std::fmt::{self, Display};

use thiserror::Error;

/// An error a test configures an expectation to raise, standing in for the
/// real collaborator's failure mode.  Compared by value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserError {
    class: String,
    message: String,
}

impl UserError {
    pub fn new<C: Into<String>>(class: C) -> Self {
        UserError { class: class.into(), message: String::new() }
    }

    pub fn with_message<C, M>(class: C, message: M) -> Self
    where
        C: Into<String>,
        M: Into<String>,
    {
        UserError { class: class.into(), message: message.into() }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.class)
        } else {
            write!(f, "{}: {}", self.class, self.message)
        }
    }
}

impl std::error::Error for UserError {}

/// Everything that can go wrong during dispatch or verification.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MockError {
    /// A declared method was called, but no expectation matched the actual
    /// arguments.  Lists every candidate signature declared for the method.
    #[error("{mock}: no matching handler found for {call}; \
             expectations declared: {candidates}")]
    NoMatchingHandler {
        mock: String,
        call: String,
        candidates: String,
    },

    /// A method with no expectations at all was called on a strict mock.
    #[error("{mock}: no expectation declared for `{method}`")]
    NoSuchExpectation { mock: String, method: String },

    /// An exact call count was missed.
    #[error("{expectation} called incorrect number of times; \
             expected {expected}, actually called {actual} times")]
    WrongCallCount {
        expectation: String,
        expected: usize,
        actual: usize,
    },

    /// An `at_least` minimum was not reached.
    #[error("{expectation} should be called at least {minimum} times, \
             was called {actual} times")]
    CalledTooFewTimes {
        expectation: String,
        minimum: usize,
        actual: usize,
    },

    /// An `at_most` maximum was exceeded.
    #[error("{expectation} should be called at most {maximum} times, \
             was called {actual} times")]
    CalledTooManyTimes {
        expectation: String,
        maximum: usize,
        actual: usize,
    },

    /// An ordered expectation was dispatched before an earlier-ordered one
    /// was reached.
    #[error("{call} called out of order on mock {mock}")]
    OutOfOrder { mock: String, call: String },

    /// The matched expectation yields values, but the call supplied no
    /// block to yield them to.
    #[error("no block given for {expectation}, which yields values")]
    NoBlockGiven { expectation: String },

    /// A user-configured raise, propagated as-is.
    #[error(transparent)]
    Raised(#[from] UserError),
}
