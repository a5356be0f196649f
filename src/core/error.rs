//! State machine error types.

use thiserror::Error;

/// Errors reported by the registry, transition tables and both machines.
///
/// Every rejected operation leaves the machine exactly as it was before the
/// call. Identifiers and labels are carried by name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsmError {
    /// A null identifier or label was passed where a real one is required
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Null transition cannot be performed")]
    NullTransition,

    #[error("Cannot transition to a null state")]
    NullState,

    #[error("State {state} already exists")]
    DuplicateState { state: String },

    /// The existing destination is kept
    #[error("Transition {label} already exists (destination: {destination})")]
    DuplicateTransition { label: String, destination: String },

    #[error("State {state} does not exist")]
    UnknownState { state: String },

    #[error("Transition {label} does not exist")]
    UnknownTransition { label: String },

    /// The label resolved to no destination, or to an unregistered one
    #[error("Cannot perform transition {label} from {from} to {destination:?}: no such state")]
    UnresolvedTransition {
        label: String,
        from: String,
        destination: Option<String>,
    },

    #[error("No states have been added")]
    NoStates,

    #[error("State {state} is active and cannot be removed")]
    StateInUse { state: String },

    /// Remaining requested transitions were discarded
    #[error("Transition chain exceeded the maximum depth ({limit})")]
    TransitionDepthExceeded { limit: usize },

    /// The requested transition took effect, then a transition queued from a
    /// hook was rejected. `applied` transitions stay in place.
    #[error("{applied} transition(s) applied, then a requested follow-up was rejected: {source}")]
    FollowUpRejected {
        applied: usize,
        #[source]
        source: Box<FsmError>,
    },
}

impl FsmError {
    /// Short, stable name for the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NullTransition => "null_transition",
            Self::NullState => "null_state",
            Self::DuplicateState { .. } => "duplicate_state",
            Self::DuplicateTransition { .. } => "duplicate_transition",
            Self::UnknownState { .. } => "unknown_state",
            Self::UnknownTransition { .. } => "unknown_transition",
            Self::UnresolvedTransition { .. } => "unresolved_transition",
            Self::NoStates => "no_states",
            Self::StateInUse { .. } => "state_in_use",
            Self::TransitionDepthExceeded { .. } => "transition_depth_exceeded",
            Self::FollowUpRejected { .. } => "follow_up_rejected",
        }
    }

    /// The rejection at the root of a follow-up failure, or `self`.
    pub fn root_cause(&self) -> &FsmError {
        match self {
            Self::FollowUpRejected { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
