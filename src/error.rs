use thiserror::Error;

/// Failures raised synchronously while a run is being constructed, before
/// any asynchronous work begins.
///
/// These are never delivered through the terminal callback; a caller that
/// gets `Ok` from [`run`](crate::run) knows the terminal callback is the only
/// remaining outcome channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriveError {
    /// The computation constructor rejected the run arguments.
    #[error("computation constructor rejected its arguments: {0}")]
    Constructor(String),

    /// Wrong number of run arguments for the computation.
    #[error("expected {expected} run arguments, got {got}")]
    Arity { expected: usize, got: usize },
}
