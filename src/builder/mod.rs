//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder for labeled systems and the
//! `symbol_enum!` macro for declaring identifiers and labels with minimal
//! boilerplate.

pub mod error;
pub mod macros;
pub mod system;

pub use error::BuildError;
pub use system::SystemBuilder;

use crate::core::{FsmError, Symbol};
use crate::labeled::LabeledState;

/// Create a state with no per-tick behavior and the given transitions.
///
/// # Example
///
/// ```
/// use tickstate::builder::wired_state;
/// use tickstate::labeled::LabeledState;
///
/// let state: LabeledState<&str, &str, ()> =
///     wired_state("Patrolling", [("saw", "Chasing"), ("heard", "Searching")]).unwrap();
///
/// assert_eq!(state.transitions().len(), 2);
/// ```
pub fn wired_state<S, L, C, I>(id: S, transitions: I) -> Result<LabeledState<S, L, C>, FsmError>
where
    S: Symbol,
    L: Symbol,
    I: IntoIterator<Item = (L, S)>,
{
    let mut state = LabeledState::idle(id);
    for (label, destination) in transitions {
        state.add_transition(label, destination)?;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wired_state_adds_every_transition() {
        let state: LabeledState<&str, &str, ()> =
            wired_state("A", [("x", "B"), ("y", "C")]).unwrap();

        assert_eq!(state.output_state(&"x"), Some(&"B"));
        assert_eq!(state.output_state(&"y"), Some(&"C"));
    }

    #[test]
    fn wired_state_stops_at_duplicate_label() {
        let result: Result<LabeledState<&str, &str, ()>, _> =
            wired_state("A", [("x", "B"), ("x", "C")]);

        assert!(matches!(
            result,
            Err(FsmError::DuplicateTransition { .. })
        ));
    }
}
