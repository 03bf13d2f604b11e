use std::cell::Cell;

/// A callback container that fires at most once.
///
/// The box is invoked through a shared reference; the first call consumes
/// the wrapped callback, every later call is silently discarded.
pub struct OnceInvokeBox<A> {
    inner: Cell<Option<Box<dyn FnOnce(A)>>>,
}

impl<A> OnceInvokeBox<A> {
    pub fn new<F: FnOnce(A) + 'static>(f: F) -> OnceInvokeBox<A> {
        OnceInvokeBox {
            inner: Cell::new(Some(Box::new(f))),
        }
    }

    /// Invoke the wrapped callback. Returns whether this call delivered.
    pub fn call(&self, a: A) -> bool {
        match self.inner.take() {
            Some(f) => {
                f(a);
                true
            }
            None => false,
        }
    }
}
