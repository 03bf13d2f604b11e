//! Coroutine driver exposing suspendable computations as plain
//! callback-style functions.
//!
//! A computation is written as a linear sequence of suspend points instead of
//! nested callbacks: at each suspend point it mints a [`Continuation`], hands
//! it to whatever asynchronous primitive it is waiting on, and suspends. The
//! driver resumes the computation with the shaped result of each step and
//! translates the final value into exactly one terminal callback invocation.

pub mod co;
pub mod continuation;
pub mod driver;
pub mod error;
pub mod shape;
pub mod value;
mod invoke_box;

pub use co::{from_fn, Resumable, Resumed, Step};
pub use continuation::{CbHandle, Continuation};
pub use driver::{run, wrap, FinalFn};
pub use error::DriveError;
pub use shape::Shape;
pub use value::Value;
