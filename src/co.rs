use crate::value::Value;

/// What one resume call reports back to the driver.
#[derive(Debug, PartialEq)]
pub enum Step {
    /// The computation handed a continuation to an external primitive and
    /// paused until it fires.
    Suspended,
    /// The computation terminated with its final value.
    Complete(Value),
}

/// The per-step input injected when a computation is resumed.
///
/// `err` is always the raw first argument of the continuation invocation,
/// independent of the continuation's shape, so a computation can branch on
/// error presence without opting into named-field shaping. `value` is the
/// shaped result of the suspend point.
#[derive(Debug, Clone, PartialEq)]
pub struct Resumed {
    pub err: Value,
    pub value: Value,
}

impl Resumed {
    /// The input for the initial advance, before any suspend point exists.
    pub fn start() -> Resumed {
        Resumed {
            err: Value::Null,
            value: Value::Null,
        }
    }

    pub fn is_err(&self) -> bool {
        !self.err.is_null()
    }
}

/// A suspendable computation.
///
/// Implementors are sequential state machines: each `resume` runs until the
/// next suspend point or termination. A computation mints exactly one
/// continuation per suspend point (through the [`CbHandle`] it was
/// constructed with), hands it to the asynchronous primitive it is waiting
/// on, and returns [`Step::Suspended`]. The driver guarantees a computation
/// is never resumed concurrently with itself.
///
/// Invoking a continuation twice for one suspend point, or starting an
/// asynchronous operation without suspending for it, is a defect in the
/// computation; the driver discards the resulting stray invocations rather
/// than resuming a finished computation.
///
/// [`CbHandle`]: crate::CbHandle
pub trait Resumable {
    fn resume(&mut self, input: Resumed) -> Step;
}

/// A [`Resumable`] backed by a closure, for computations whose state fits
/// comfortably in captured variables.
pub struct FromFn<F>(F);

impl<F: FnMut(Resumed) -> Step> Resumable for FromFn<F> {
    fn resume(&mut self, input: Resumed) -> Step {
        (self.0)(input)
    }
}

/// Wrap a closure as a suspendable computation.
pub fn from_fn<F: FnMut(Resumed) -> Step>(f: F) -> FromFn<F> {
    FromFn(f)
}
