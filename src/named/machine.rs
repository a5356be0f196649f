//! State machine addressed by state name.

use tracing::{debug, warn};

use super::state::NamedState;
use crate::core::{run_chain, FsmConfig, FsmError, StateRegistry, Symbol, TransitionRequests};

/// State machine whose transitions name their destination directly.
///
/// The first state created is the initial state, but nothing is active until
/// the first [`update`](Self::update): that call enters the initial state
/// (running its enter hook) and then runs the active state's frame hook.
///
/// # Example
///
/// ```rust
/// use tickstate::named::NamedMachine;
///
/// let mut fsm = NamedMachine::new();
/// fsm.create_state("Patrolling")?
///     .on_frame(|requests| requests.request("Chasing"));
/// fsm.create_state("Chasing")?;
///
/// assert!(fsm.current_state().is_none());
///
/// fsm.update()?;
/// assert_eq!(fsm.current_state_name(), Some("Chasing"));
/// # Ok::<(), tickstate::core::FsmError>(())
/// ```
#[derive(Debug)]
pub struct NamedMachine {
    states: StateRegistry<String, NamedState>,
    config: FsmConfig,
}

impl Default for NamedMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl NamedMachine {
    pub fn new() -> Self {
        Self::with_config(FsmConfig::default())
    }

    pub fn with_config(config: FsmConfig) -> Self {
        Self {
            states: StateRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &FsmConfig {
        &self.config
    }

    /// Create a state and return it so hooks can be attached.
    ///
    /// Names are matched exactly, including case.
    pub fn create_state(&mut self, name: impl Into<String>) -> Result<&mut NamedState, FsmError> {
        let name = name.into();
        self.states.add(name.clone(), NamedState::new(name))
    }

    /// Run one tick.
    ///
    /// Enters the initial state first if nothing is active yet, then runs the
    /// active state's frame hook. Transitions requested by any of those hooks
    /// are applied before this returns.
    ///
    /// The entry and frame requests are drained as separate chains, so one
    /// update applies at most `1 + 2 * max_transition_depth` transitions. A
    /// rejected request on entry does not skip the frame hook: it still runs
    /// on whichever state is active, and the first error is returned
    /// afterwards. Rejections after the initial state was entered come back
    /// as [`FsmError::FollowUpRejected`].
    pub fn update(&mut self) -> Result<(), FsmError> {
        if self.states.is_empty() {
            warn!(
                operation = "update",
                outcome = "no_states",
                "Cannot run update of the state machine; no states are added yet"
            );
            return Err(FsmError::NoStates);
        }

        let mut applied = 0;
        let mut entered = Ok(());
        if self.states.current_id().is_none() {
            let initial = self
                .states
                .initial_id()
                .cloned()
                .ok_or(FsmError::NoStates)?;
            let mut requests = TransitionRequests::new();
            self.transition_once(initial, &mut requests)?;
            applied = 1;
            entered = self.apply_requests(requests, applied);
        }

        let mut requests = TransitionRequests::new();
        if let Some(state) = self.states.current_mut() {
            state.frame(&mut requests);
        }
        let framed = self.apply_requests(requests, applied);
        entered.and(framed)
    }

    /// Make `name` the active state.
    ///
    /// Runs the current state's exit hook, switches, then runs the new
    /// state's enter hook. Moving to the already-active state runs both.
    ///
    /// A rejected `name` changes nothing. A rejected request queued by the
    /// hooks comes back as [`FsmError::FollowUpRejected`], with the switch
    /// to `name` kept.
    pub fn transition_to(&mut self, name: &str) -> Result<(), FsmError> {
        let mut requests = TransitionRequests::new();
        self.transition_once(name.to_string(), &mut requests)?;
        self.apply_requests(requests, 1)
    }

    pub fn current_state(&self) -> Option<&NamedState> {
        self.states.current()
    }

    pub fn current_state_name(&self) -> Option<&str> {
        self.states.current_id().map(String::as_str)
    }

    pub fn initial_state_name(&self) -> Option<&str> {
        self.states.initial_id().map(String::as_str)
    }

    pub fn state(&self, name: &str) -> Option<&NamedState> {
        self.states.get(&name.to_string())
    }

    /// Mutable access for reassigning hooks after creation.
    pub fn state_mut(&mut self, name: &str) -> Option<&mut NamedState> {
        self.states.get_mut(&name.to_string())
    }

    /// State names in creation order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.ids().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn apply_requests(
        &mut self,
        mut requests: TransitionRequests<String>,
        applied: usize,
    ) -> Result<(), FsmError> {
        let limit = self.config.max_transition_depth;
        run_chain(&mut requests, limit, applied, |name, queue| {
            self.transition_once(name, queue)
        })
    }

    fn transition_once(
        &mut self,
        name: String,
        requests: &mut TransitionRequests<String>,
    ) -> Result<(), FsmError> {
        if name.is_null() {
            warn!(
                operation = "transition_to",
                outcome = "null_state",
                "Cannot transition to a null state"
            );
            return Err(FsmError::NullState);
        }

        if !self.states.contains(&name) {
            warn!(
                operation = "transition_to",
                to = name.as_str(),
                outcome = "unknown_state",
                "Cannot transition to state; no such name for a state"
            );
            return Err(FsmError::UnknownState { state: name });
        }

        let from = self.states.current_id().cloned();
        if let Some(state) = self.states.current_mut() {
            state.exit(requests);
        }
        self.states.set_current(&name)?;
        if let Some(state) = self.states.current_mut() {
            state.enter(requests);
        }

        debug!(
            operation = "transition_to",
            from = from.as_deref().unwrap_or("<none>"),
            to = name.as_str(),
            outcome = "success",
            "State transition"
        );
        Ok(())
    }
}
