// vim: tw=80
//! The mock object itself and the scoped container helpers.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use crate::director::ExpectationDirector;
use crate::error::MockError;
use crate::expectation::{ExpInner, Expectation};
use crate::ordering::OrderingManager;
use crate::redirect;
use crate::value::{format_call, Value};

struct MockInner {
    name: String,
    // Declaration order matters for diagnostics and verification, so this
    // is a scanned Vec rather than a map.
    directors: Vec<ExpectationDirector>,
    lenient: bool,
    ordering: Rc<RefCell<OrderingManager>>,
    container: Option<Rc<RefCell<OrderingManager>>>,
    redirects: Vec<String>,
}

impl MockInner {
    fn director(&self, method: &str) -> Option<&ExpectationDirector> {
        self.directors.iter().find(|d| d.method() == method)
    }

    fn director_mut(&mut self, method: &str) -> &mut ExpectationDirector {
        if let Some(i) =
            self.directors.iter().position(|d| d.method() == method)
        {
            &mut self.directors[i]
        } else {
            self.directors.push(ExpectationDirector::new(method));
            self.directors.last_mut().unwrap()
        }
    }
}

/// A mock object.  Cheap to clone; clones share the same expectations.
///
/// Declare expectations with [`expect`](Self::expect), hand the mock to the
/// code under test (which calls [`call`](Self::call) through whatever
/// interception seam wraps it), and finish with [`verify`](Self::verify) —
/// or let [`use_mock`]/[`use_mocks`] handle verification for you.
#[derive(Clone)]
pub struct Mock {
    inner: Rc<RefCell<MockInner>>,
}

impl Mock {
    /// A standalone mock with a default diagnostic name.
    pub fn new() -> Self {
        Self::named("mock")
    }

    /// A standalone mock labelled `name` in every error message.
    pub fn named(name: &str) -> Self {
        Self::build(name, None)
    }

    pub(crate) fn in_container(
        name: &str,
        container: Rc<RefCell<OrderingManager>>,
    ) -> Self {
        Self::build(name, Some(container))
    }

    fn build(name: &str, container: Option<Rc<RefCell<OrderingManager>>>)
        -> Self
    {
        Mock {
            inner: Rc::new(RefCell::new(MockInner {
                name: name.to_owned(),
                directors: Vec::new(),
                lenient: false,
                ordering: Rc::new(RefCell::new(OrderingManager::default())),
                container,
                redirects: Vec::new(),
            })),
        }
    }

    /// The diagnostic label used in error messages.
    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    /// In lenient mode, calls to undeclared methods return [`Value::Nil`]
    /// instead of failing with
    /// [`NoSuchExpectation`](MockError::NoSuchExpectation).
    pub fn set_lenient(&self, lenient: bool) {
        self.inner.borrow_mut().lenient = lenient;
    }

    /// Declare that `method` should be received, returning the expectation
    /// for chained configuration.
    pub fn expect(&self, method: &str) -> Expectation {
        self.expect_many(&[method])
    }

    /// Declare several method names at once, sharing one configuration
    /// chain but with independent call counters.
    pub fn expect_many(&self, methods: &[&str]) -> Expectation {
        let mut inner = self.inner.borrow_mut();
        let name = inner.name.clone();
        let ordering = inner.ordering.clone();
        let container = inner.container.clone();
        let mut exps = Vec::with_capacity(methods.len());
        for method in methods {
            let exp = Rc::new(RefCell::new(ExpInner::new(
                name.clone(),
                method,
                ordering.clone(),
                container.clone(),
            )));
            inner.director_mut(method).add(exp.clone());
            exps.push(exp);
        }
        Expectation::new(exps)
    }

    /// Intercept a call to `method` with `args`.
    pub fn call(&self, method: &str, args: Vec<Value>)
        -> Result<Value, MockError>
    {
        self.dispatch(method, &args, None)
    }

    /// Intercept a call that also supplies a block for the expectation to
    /// yield values to.
    pub fn call_with_block<F>(
        &self,
        method: &str,
        args: Vec<Value>,
        mut block: F,
    ) -> Result<Value, MockError>
    where
        F: FnMut(Vec<Value>) -> Value,
    {
        self.dispatch(method, &args, Some(&mut block))
    }

    fn dispatch(
        &self,
        method: &str,
        args: &[Value],
        block: Option<&mut dyn FnMut(Vec<Value>) -> Value>,
    ) -> Result<Value, MockError> {
        let exp = {
            let inner = self.inner.borrow();
            let Some(director) = inner.director(method) else {
                if inner.lenient {
                    return Ok(Value::Nil);
                }
                return Err(MockError::NoSuchExpectation {
                    mock: inner.name.clone(),
                    method: method.to_owned(),
                });
            };
            match director.find(args, block.is_some()) {
                Some(exp) => exp,
                None => {
                    return Err(MockError::NoMatchingHandler {
                        mock: inner.name.clone(),
                        call: format_call(method, args),
                        candidates: director.signatures(),
                    })
                }
            }
        };
        // The mock borrow is released before invoking, so a computed
        // response may call back into this mock.
        let result = exp.borrow_mut().invoke(args, block);
        result
    }

    /// Check every expectation's cardinality contract, stopping at the
    /// first violation.
    pub fn verify(&self) -> Result<(), MockError> {
        let inner = self.inner.borrow();
        for director in &inner.directors {
            director.verify_all()?;
        }
        Ok(())
    }

    /// Remove any ambient-function redirects this mock installed, then
    /// verify.
    pub fn teardown(&self) -> Result<(), MockError> {
        let names = mem::take(&mut self.inner.borrow_mut().redirects);
        for name in &names {
            redirect::remove_if_owner(name, self);
        }
        self.verify()
    }

    pub(crate) fn record_redirect(&self, name: &str) {
        self.inner.borrow_mut().redirects.push(name.to_owned());
    }

    pub(crate) fn ptr_eq(&self, other: &Mock) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Mock {
    fn default() -> Self {
        Mock::new()
    }
}

/// Create `names.len()` mocks sharing one ordering container, run `body`,
/// then verify and tear down every mock in creation order.
///
/// Verification always runs, even when the body fails; the body's error is
/// returned unless verification itself fails, in which case the
/// verification error surfaces.
pub fn use_mocks<T, F>(names: &[&str], body: F) -> Result<T, MockError>
where
    F: FnOnce(&[Mock]) -> Result<T, MockError>,
{
    let container = Rc::new(RefCell::new(OrderingManager::default()));
    let mocks: Vec<Mock> = names
        .iter()
        .map(|n| Mock::in_container(n, container.clone()))
        .collect();
    let result = body(&mocks);
    let mut verify_err = None;
    for mock in &mocks {
        if let Err(e) = mock.teardown() {
            verify_err.get_or_insert(e);
        }
    }
    match verify_err {
        Some(e) => Err(e),
        None => result,
    }
}

/// Single-mock convenience for [`use_mocks`].
pub fn use_mock<T, F>(name: &str, body: F) -> Result<T, MockError>
where
    F: FnOnce(&Mock) -> Result<T, MockError>,
{
    use_mocks(&[name], |mocks| body(&mocks[0]))
}
