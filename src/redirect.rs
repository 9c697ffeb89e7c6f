// vim: tw=80
//! Ambient function redirection.
//!
//! Lets a mock stand in for a free function during a test: code under test
//! reaches the function through [`call`], and the test routes that name to
//! a mock with [`install`].  Registration is explicit and reversible — the
//! owning mock removes its entries at teardown — and scoped to the current
//! thread, so one mock's redirects never affect another mock or another
//! test thread.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::MockError;
use crate::mock::Mock;
use crate::value::Value;

thread_local! {
    static REDIRECTS: RefCell<HashMap<String, Mock>> =
        RefCell::new(HashMap::new());
}

/// Route calls of the free function `name` to `mock` until the mock is
/// torn down.
pub fn install(name: &str, mock: &Mock) {
    REDIRECTS.with(|r| {
        r.borrow_mut().insert(name.to_owned(), mock.clone());
    });
    mock.record_redirect(name);
}

/// Is `name` currently redirected?
pub fn is_installed(name: &str) -> bool {
    REDIRECTS.with(|r| r.borrow().contains_key(name))
}

/// Call the redirected function `name`.
pub fn call(name: &str, args: Vec<Value>) -> Result<Value, MockError> {
    match lookup(name) {
        Some(mock) => mock.call(name, args),
        None => Err(MockError::NoSuchExpectation {
            mock: "<ambient>".to_owned(),
            method: name.to_owned(),
        }),
    }
}

/// Like [`call`], supplying a block for yield steps.
pub fn call_with_block<F>(name: &str, args: Vec<Value>, block: F)
    -> Result<Value, MockError>
where
    F: FnMut(Vec<Value>) -> Value,
{
    match lookup(name) {
        Some(mock) => mock.call_with_block(name, args, block),
        None => Err(MockError::NoSuchExpectation {
            mock: "<ambient>".to_owned(),
            method: name.to_owned(),
        }),
    }
}

fn lookup(name: &str) -> Option<Mock> {
    REDIRECTS.with(|r| r.borrow().get(name).cloned())
}

/// Remove `name` only if `mock` still owns the redirect; a later install
/// for the same name by another mock is left in place.
pub(crate) fn remove_if_owner(name: &str, mock: &Mock) {
    REDIRECTS.with(|r| {
        let mut table = r.borrow_mut();
        if table.get(name).is_some_and(|m| m.ptr_eq(mock)) {
            table.remove(name);
        }
    });
}
