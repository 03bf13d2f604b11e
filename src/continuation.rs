use std::rc::Rc;

use crate::driver::Core;
use crate::shape::Shape;
use crate::value::Value;

/// The continuation-construction handle every computation receives as its
/// trailing parameter, mirroring the convention that a callback-style
/// function's last parameter is "the callback".
///
/// At each suspend point the computation mints one continuation with the
/// shape it wants the asynchronous result delivered in, hands it to the
/// external primitive, and suspends. Minting a new continuation supersedes
/// any previous one: at most one continuation is live per computation.
#[derive(Clone)]
pub struct CbHandle {
    core: Rc<Core>,
}

impl CbHandle {
    pub(crate) fn new(core: Rc<Core>) -> CbHandle {
        CbHandle { core }
    }

    /// A continuation with the default shaping: the first argument is the
    /// step error and the remaining arguments collapse to the injected value.
    pub fn step(&self) -> Continuation {
        self.mint(Shape::Default)
    }

    /// A continuation with named-field shaping, e.g. `cb.props("err fd")`
    /// injects `{err, fd}`.
    pub fn props(&self, names: &str) -> Continuation {
        self.mint(Shape::named(names))
    }

    /// A continuation injecting the raw argument list verbatim.
    pub fn list(&self) -> Continuation {
        self.mint(Shape::List)
    }

    fn mint(&self, shape: Shape) -> Continuation {
        let token = Rc::new(());
        self.core.set_live(&token);
        Continuation {
            core: self.core.clone(),
            token,
            shape,
        }
    }
}

/// The callback a computation hands to an external asynchronous primitive at
/// one suspend point.
///
/// Cloneable so it can move into whatever closure the primitive wants, but
/// only the first invocation of the live instance resumes the computation.
/// Invocations of a superseded continuation, a second invocation of the same
/// one, or one arriving after the computation completed are discarded.
#[derive(Clone)]
pub struct Continuation {
    core: Rc<Core>,
    token: Rc<()>,
    shape: Shape,
}

impl Continuation {
    /// Deliver the asynchronous result, resuming the computation.
    pub fn invoke(&self, args: Vec<Value>) {
        self.core.resume_from(&self.token, &self.shape, args);
    }
}
