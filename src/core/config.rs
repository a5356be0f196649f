//! Machine configuration.

use serde::{Deserialize, Serialize};

/// Default bound on transitions applied from a single inbound call.
pub const DEFAULT_MAX_TRANSITION_DEPTH: usize = 16;

/// Tunables shared by both machine designs.
///
/// Missing fields fall back to their defaults, so hosts can embed this in
/// their own agent configuration files.
///
/// # Example
///
/// ```rust
/// use tickstate::core::FsmConfig;
///
/// let config = FsmConfig::default().max_transition_depth(4);
/// assert_eq!(config.max_transition_depth, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsmConfig {
    /// Maximum number of requested transitions applied in one chain
    pub max_transition_depth: usize,
}

impl Default for FsmConfig {
    fn default() -> Self {
        Self {
            max_transition_depth: DEFAULT_MAX_TRANSITION_DEPTH,
        }
    }
}

impl FsmConfig {
    pub fn max_transition_depth(mut self, depth: usize) -> Self {
        self.max_transition_depth = depth;
        self
    }
}
