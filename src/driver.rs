use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::co::{Resumable, Resumed, Step};
use crate::continuation::CbHandle;
use crate::error::DriveError;
use crate::invoke_box::OnceInvokeBox;
use crate::shape::Shape;
use crate::value::Value;

/// The terminal callback of a run: error slot first, success values after.
pub type FinalFn = Box<dyn FnOnce(Value, Vec<Value>)>;

/// Start a suspendable computation and drive it to completion.
///
/// The constructor is called with the run arguments plus a fresh [`CbHandle`]
/// and returns the computation, or a [`DriveError`] which is forwarded
/// synchronously before any asynchronous effect. On success the computation
/// is advanced to its first suspend point immediately; from then on execution
/// is driven entirely by continuation invocations.
///
/// The terminal callback fires exactly once, synchronously from within
/// whichever continuation invocation (or this call itself, for a computation
/// that never suspends) causes the computation to terminate:
///
/// - final value [`Value::Error`] → `(error, [])`
/// - final value [`Value::List`] → the list spread verbatim, its first
///   element in the error slot: `(items[0], items[1..])`
/// - any other final value `v` → `(Null, [v])`
///
/// Panics raised by computation code are not caught; they unwind through the
/// caller of `run` or of the continuation. Business errors travel through the
/// terminal callback, programming faults stay loud.
pub fn run<C, F, T>(constructor: F, args: Vec<Value>, terminal: T) -> Result<(), DriveError>
where
    C: Resumable + 'static,
    F: FnOnce(Vec<Value>, CbHandle) -> Result<C, DriveError>,
    T: FnOnce(Value, Vec<Value>) + 'static,
{
    let core = Rc::new(Core::new(OnceInvokeBox::new(
        move |(err, vals): (Value, Vec<Value>)| terminal(err, vals),
    )));
    let co = constructor(args, CbHandle::new(core.clone()))?;
    core.install(Box::new(co));
    trace!("run started");
    core.advance(Resumed::start());
    Ok(())
}

/// Wrap a computation constructor as an ordinary callback-style function.
///
/// Each invocation of the returned function starts a fully independent
/// [`run`] with the supplied arguments and terminal callback; no state is
/// shared across invocations.
pub fn wrap<C, F>(constructor: F) -> impl Fn(Vec<Value>, FinalFn) -> Result<(), DriveError>
where
    C: Resumable + 'static,
    F: Fn(Vec<Value>, CbHandle) -> Result<C, DriveError> + 'static,
{
    move |args, terminal| run(|a, cb| constructor(a, cb), args, terminal)
}

/// Shared state of one run: the computation, the live-continuation token and
/// the one-shot terminal box.
pub(crate) struct Core {
    state: RefCell<State>,
    terminal: OnceInvokeBox<(Value, Vec<Value>)>,
}

struct State {
    co: Option<Box<dyn Resumable>>,
    live: Weak<()>,
    in_flight: bool,
    queued: Option<Resumed>,
}

impl Core {
    fn new(terminal: OnceInvokeBox<(Value, Vec<Value>)>) -> Core {
        Core {
            state: RefCell::new(State {
                co: None,
                live: Weak::new(),
                in_flight: false,
                queued: None,
            }),
            terminal,
        }
    }

    fn install(&self, co: Box<dyn Resumable>) {
        self.state.borrow_mut().co = Some(co);
    }

    pub(crate) fn set_live(&self, token: &Rc<()>) {
        self.state.borrow_mut().live = Rc::downgrade(token);
    }

    /// Entry point for continuation invocations. Stale invocations are
    /// discarded here; a live one consumes its token and resumes the
    /// computation with the shaped input.
    pub(crate) fn resume_from(&self, token: &Rc<()>, shape: &Shape, args: Vec<Value>) {
        {
            let mut st = self.state.borrow_mut();
            let live = match st.live.upgrade() {
                Some(live) => live,
                None => {
                    trace!("continuation invoked after its step was consumed, discarding");
                    return;
                }
            };
            if !Rc::ptr_eq(&live, token) {
                trace!("superseded continuation invoked, discarding");
                return;
            }
            st.live = Weak::new();
        }

        let err = args.first().cloned().unwrap_or(Value::Null);
        let value = shape.apply(args);
        self.advance(Resumed { err, value });
    }

    /// Resume the computation, looping while synchronously-delivered
    /// continuations queue further inputs, and dispatch the terminal
    /// callback on termination.
    pub(crate) fn advance(&self, input: Resumed) {
        {
            let mut st = self.state.borrow_mut();
            if st.in_flight {
                // A continuation fired from inside a resume; honor it once
                // the in-flight resume returns instead of reentering.
                st.queued = Some(input);
                return;
            }
            st.in_flight = true;
        }

        let mut next = Some(input);
        while let Some(input) = next.take() {
            let co = self.state.borrow_mut().co.take();
            let mut co = match co {
                Some(co) => co,
                None => break,
            };

            // The computation runs with the state released so it can mint
            // continuations (and have them fire) mid-resume.
            let step = co.resume(input);

            let mut st = self.state.borrow_mut();
            match step {
                Step::Suspended => {
                    trace!("computation suspended");
                    st.co = Some(co);
                    next = st.queued.take();
                }
                Step::Complete(value) => {
                    st.live = Weak::new();
                    st.queued = None;
                    st.in_flight = false;
                    drop(st);
                    self.dispatch(value);
                    return;
                }
            }
        }
        self.state.borrow_mut().in_flight = false;
    }

    fn dispatch(&self, value: Value) {
        let (err, rest) = match value {
            Value::Error(_) => (value, Vec::new()),
            Value::List(mut items) => {
                if items.is_empty() {
                    (Value::Null, Vec::new())
                } else {
                    let rest = items.split_off(1);
                    (items.remove(0), rest)
                }
            }
            other => (Value::Null, vec![other]),
        };
        if self.terminal.call((err, rest)) {
            debug!("terminal callback dispatched");
        } else {
            debug!("duplicate terminal dispatch discarded");
        }
    }
}
