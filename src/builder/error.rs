//! Build errors for the labeled system builder.

use thiserror::Error;

use crate::core::FsmError;

/// Errors that can occur when building a labeled state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No states defined. Add at least one state with .state(..)")]
    NoStates,

    /// A state or transition was rejected while assembling the machine
    #[error(transparent)]
    Rejected(#[from] FsmError),

    /// Transitions pointing at states that were never added
    #[error("{} transition(s) point at unregistered states", .0.len())]
    DanglingTransitions(Vec<FsmError>),
}
