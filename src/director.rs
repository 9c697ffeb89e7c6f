// vim: tw=80
//! Per-method expectation registry.
//!
//! Expectations are scanned in declaration order and the first eligible
//! match wins, so an exhausted expectation is skipped in favor of a later
//! one — that skip is what makes multi-stage response chains work.  If every
//! argument-matching expectation is exhausted, the call still goes to the
//! first of them: the overshoot then surfaces as a cardinality violation at
//! verification instead of a misleading no-match at the call site.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::MockError;
use crate::expectation::ExpInner;
use crate::value::Value;

pub(crate) struct ExpectationDirector {
    method: String,
    expectations: Vec<Rc<RefCell<ExpInner>>>,
}

impl ExpectationDirector {
    pub fn new(method: &str) -> Self {
        ExpectationDirector {
            method: method.to_owned(),
            expectations: Vec::new(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn add(&mut self, exp: Rc<RefCell<ExpInner>>) {
        self.expectations.push(exp);
    }

    /// Find the expectation handling this call, if any.
    pub fn find(&self, args: &[Value], block_given: bool)
        -> Option<Rc<RefCell<ExpInner>>>
    {
        let mut exhausted = None;
        for e in &self.expectations {
            let inner = e.borrow();
            if inner.matches(args, block_given) {
                if inner.is_eligible() {
                    return Some(e.clone());
                }
                if exhausted.is_none() {
                    exhausted = Some(e.clone());
                }
            }
        }
        exhausted
    }

    /// Every declared signature, for no-match diagnostics.
    pub fn signatures(&self) -> String {
        let mut out = String::from("[");
        for (i, e) in self.expectations.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&e.borrow().to_string());
        }
        out.push(']');
        out
    }

    pub fn verify_all(&self) -> Result<(), MockError> {
        for e in &self.expectations {
            e.borrow().verify()?;
        }
        Ok(())
    }
}
