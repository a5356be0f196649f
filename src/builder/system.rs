//! Builder for constructing labeled state machines.

use stillwater::validation::Validation;

use crate::builder::error::BuildError;
use crate::core::{FsmConfig, Symbol};
use crate::labeled::{FsmSystem, LabeledState};

/// Builder for [`FsmSystem`] with a fluent API.
///
/// Unlike adding states one by one, `build` refuses a definition whose
/// transitions point at states that were never added.
pub struct SystemBuilder<S: Symbol, L: Symbol, C> {
    config: FsmConfig,
    states: Vec<LabeledState<S, L, C>>,
}

impl<S: Symbol, L: Symbol, C> SystemBuilder<S, L, C> {
    pub fn new() -> Self {
        Self {
            config: FsmConfig::default(),
            states: Vec::new(),
        }
    }

    pub fn config(mut self, config: FsmConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a state. The first one added is the initial state.
    pub fn state(mut self, state: LabeledState<S, L, C>) -> Self {
        self.states.push(state);
        self
    }

    pub fn states(mut self, states: Vec<LabeledState<S, L, C>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Build the machine.
    pub fn build(self) -> Result<FsmSystem<S, L, C>, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut system = FsmSystem::with_config(self.config);
        for state in self.states {
            system.add_state(state)?;
        }

        match system.validate() {
            Validation::Success(_) => Ok(system),
            Validation::Failure(errors) => Err(BuildError::DanglingTransitions(
                errors.iter().cloned().collect(),
            )),
        }
    }
}

impl<S: Symbol, L: Symbol, C> Default for SystemBuilder<S, L, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FsmError;

    #[test]
    fn builder_requires_states() {
        let result = SystemBuilder::<&str, &str, ()>::new().build();

        assert!(matches!(result, Err(BuildError::NoStates)));
    }

    #[test]
    fn fluent_api_builds_machine() {
        let fsm = SystemBuilder::<&str, &str, ()>::new()
            .state(
                LabeledState::idle("FollowingPath")
                    .with_transition("SawPlayer", "ChasingPlayer")
                    .unwrap(),
            )
            .state(
                LabeledState::idle("ChasingPlayer")
                    .with_transition("LostPlayer", "FollowingPath")
                    .unwrap(),
            )
            .build()
            .unwrap();

        assert_eq!(fsm.current_state_id(), Some(&"FollowingPath"));
        assert_eq!(fsm.states().len(), 2);
    }

    #[test]
    fn duplicate_states_are_rejected() {
        let result = SystemBuilder::<&str, &str, ()>::new()
            .states(vec![LabeledState::idle("A"), LabeledState::idle("A")])
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Rejected(FsmError::DuplicateState { .. }))
        ));
    }

    #[test]
    fn dangling_transitions_are_all_reported() {
        let result = SystemBuilder::<&str, &str, ()>::new()
            .state(
                LabeledState::idle("A")
                    .with_transition("x", "Missing")
                    .unwrap()
                    .with_transition("y", "AlsoMissing")
                    .unwrap(),
            )
            .build();

        match result {
            Err(BuildError::DanglingTransitions(errors)) => assert_eq!(errors.len(), 2),
            _ => panic!("Expected dangling transitions"),
        }
    }

    #[test]
    fn config_is_carried_into_the_machine() {
        let fsm = SystemBuilder::<&str, &str, ()>::new()
            .config(FsmConfig::default().max_transition_depth(2))
            .state(LabeledState::idle("A"))
            .build()
            .unwrap();

        assert_eq!(fsm.config().max_transition_depth, 2);
    }
}
