//! Transition dispatcher for the labeled-transition design.

use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, warn};

use super::state::LabeledState;
use crate::core::{run_chain, FsmConfig, FsmError, StateRegistry, Symbol, TransitionRequests};

/// State machine that moves between states by transition label.
///
/// The first state added becomes both the initial and the current state,
/// without its enter hook running. After that the current state only changes
/// through [`perform_transition`](Self::perform_transition) or requests
/// issued from hooks and [`Behavior::reason`](super::Behavior::reason).
///
/// # Example
///
/// ```rust
/// use tickstate::labeled::{FsmSystem, LabeledState};
///
/// let mut fsm: FsmSystem<&str, &str, ()> = FsmSystem::new();
/// fsm.add_state(LabeledState::idle("Patrolling").with_transition("saw", "Chasing")?)?;
/// fsm.add_state(LabeledState::idle("Chasing").with_transition("lost", "Patrolling")?)?;
///
/// assert_eq!(fsm.current_state_id(), Some(&"Patrolling"));
///
/// fsm.perform_transition("saw")?;
/// assert_eq!(fsm.current_state_id(), Some(&"Chasing"));
///
/// // Labels absent from the current table are rejected.
/// assert!(fsm.perform_transition("saw").is_err());
/// assert_eq!(fsm.current_state_id(), Some(&"Chasing"));
/// # Ok::<(), tickstate::core::FsmError>(())
/// ```
pub struct FsmSystem<S: Symbol, L: Symbol, C> {
    states: StateRegistry<S, LabeledState<S, L, C>>,
    config: FsmConfig,
}

impl<S: Symbol, L: Symbol, C> Default for FsmSystem<S, L, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol, L: Symbol, C> FsmSystem<S, L, C> {
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

    /// Register a state. The first one registered becomes current.
    pub fn add_state(&mut self, state: LabeledState<S, L, C>) -> Result<(), FsmError> {
        let id = state.id().clone();
        self.states.add(id.clone(), state)?;

        if self.states.current_id().is_none() {
            self.states.set_current(&id)?;
            debug!(
                operation = "add_state",
                state = id.name(),
                "Initial state activated without running its enter hook"
            );
        }
        Ok(())
    }

    /// Remove a state that is not currently active.
    ///
    /// Tables of other states that still point at it are left dangling;
    /// [`validate`](Self::validate) reports them.
    pub fn remove_state(&mut self, id: &S) -> Result<LabeledState<S, L, C>, FsmError> {
        self.states.remove(id)
    }

    pub fn current_state(&self) -> Option<&LabeledState<S, L, C>> {
        self.states.current()
    }

    pub fn current_state_mut(&mut self) -> Option<&mut LabeledState<S, L, C>> {
        self.states.current_mut()
    }

    pub fn current_state_id(&self) -> Option<&S> {
        self.states.current_id()
    }

    pub fn initial_state_id(&self) -> Option<&S> {
        self.states.initial_id()
    }

    pub fn state(&self, id: &S) -> Option<&LabeledState<S, L, C>> {
        self.states.get(id)
    }

    /// Mutable access, e.g. to add or remove transitions after setup.
    pub fn state_mut(&mut self, id: &S) -> Option<&mut LabeledState<S, L, C>> {
        self.states.get_mut(id)
    }

    pub fn states(&self) -> &StateRegistry<S, LabeledState<S, L, C>> {
        &self.states
    }

    /// Move to the state the current state's table maps `label` to.
    ///
    /// On success the old state's `before_leave` runs, the current state is
    /// reassigned, then the new state's `before_enter` runs. Transitions
    /// requested from those hooks are applied afterwards, up to the
    /// configured depth.
    ///
    /// A rejected `label` changes nothing. Once `label` has taken effect, a
    /// rejected follow-up comes back as [`FsmError::FollowUpRejected`] and the
    /// transitions applied so far stay in place.
    pub fn perform_transition(&mut self, label: L) -> Result<(), FsmError> {
        let mut requests = TransitionRequests::new();
        self.transition_once(label, &mut requests)?;
        self.apply_requests(requests, 1)
    }

    /// Run one simulation tick: `reason`, pending transitions, then `act`.
    ///
    /// `act` runs on the state that is current once the requested transitions
    /// are applied, even when one of them was rejected. The rejection is
    /// returned after `act` completes; a rejection following a request that
    /// already took effect is wrapped in [`FsmError::FollowUpRejected`].
    pub fn tick(&mut self, ctx: &mut C) -> Result<(), FsmError> {
        let mut requests = TransitionRequests::new();
        match self.states.current_mut() {
            Some(state) => state.reason(ctx, &mut requests),
            None => {
                warn!(
                    operation = "tick",
                    outcome = "no_states",
                    "Cannot tick a state machine with no states"
                );
                return Err(FsmError::NoStates);
            }
        }

        let transitioned = self.apply_requests(requests, 0);

        if let Some(state) = self.states.current_mut() {
            state.act(ctx);
        }
        transitioned
    }

    /// Check every transition table for destinations that are not registered.
    ///
    /// All dangling entries are reported, not just the first.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<FsmError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<FsmError>>> = Vec::new();

        for (id, state) in self.states.iter() {
            for (label, destination) in state.transitions().iter() {
                let check = if self.states.contains(destination) {
                    Validation::success(())
                } else {
                    Validation::fail(FsmError::UnresolvedTransition {
                        label: label.name().to_string(),
                        from: id.name().to_string(),
                        destination: Some(destination.name().to_string()),
                    })
                };
                checks.push(check);
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    fn apply_requests(
        &mut self,
        mut requests: TransitionRequests<L>,
        applied: usize,
    ) -> Result<(), FsmError> {
        let limit = self.config.max_transition_depth;
        run_chain(&mut requests, limit, applied, |label, queue| {
            self.transition_once(label, queue)
        })
    }

    fn transition_once(
        &mut self,
        label: L,
        requests: &mut TransitionRequests<L>,
    ) -> Result<(), FsmError> {
        if label.is_null() {
            warn!(
                operation = "perform_transition",
                label = label.name(),
                outcome = "null_transition",
                "Null transition cannot be performed"
            );
            return Err(FsmError::NullTransition);
        }

        let Some(from) = self.states.current_id().cloned() else {
            warn!(
                operation = "perform_transition",
                label = label.name(),
                outcome = "no_states",
                "No current state to transition from"
            );
            return Err(FsmError::NoStates);
        };

        let destination = self
            .states
            .current()
            .and_then(|state| state.output_state(&label))
            .cloned();
        let to = match destination {
            Some(to) if self.states.contains(&to) => to,
            unresolved => {
                let destination = unresolved.map(|id| id.name().to_string());
                warn!(
                    operation = "perform_transition",
                    label = label.name(),
                    from = from.name(),
                    destination = ?destination,
                    outcome = "unresolved_transition",
                    "Cannot perform transition since the destination state does not exist"
                );
                return Err(FsmError::UnresolvedTransition {
                    label: label.name().to_string(),
                    from: from.name().to_string(),
                    destination,
                });
            }
        };

        if let Some(state) = self.states.current_mut() {
            state.leave(requests);
        }
        self.states.set_current(&to)?;
        if let Some(state) = self.states.current_mut() {
            state.enter(requests);
        }

        debug!(
            operation = "perform_transition",
            label = label.name(),
            from = from.name(),
            to = to.name(),
            outcome = "success",
            "State transition"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labeled::Behavior;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tracing_test::traced_test;

    type Trace = Rc<RefCell<Vec<String>>>;

    fn traced_state(id: &'static str, trace: &Trace) -> LabeledState<&'static str, &'static str, ()> {
        let enter = Rc::clone(trace);
        let leave = Rc::clone(trace);
        LabeledState::idle(id)
            .before_enter(move |_| enter.borrow_mut().push(format!("enter-{id}")))
            .before_leave(move |_| leave.borrow_mut().push(format!("leave-{id}")))
    }

    fn patrol_system(trace: &Trace) -> FsmSystem<&'static str, &'static str, ()> {
        let mut fsm = FsmSystem::new();
        fsm.add_state(traced_state("P", trace).with_transition("X", "Q").unwrap())
            .unwrap();
        fsm.add_state(traced_state("Q", trace).with_transition("Y", "P").unwrap())
            .unwrap();
        fsm
    }

    #[test]
    fn first_state_is_current_without_enter_hook() {
        let trace = Trace::default();
        let fsm = patrol_system(&trace);

        assert_eq!(fsm.current_state_id(), Some(&"P"));
        assert_eq!(fsm.initial_state_id(), Some(&"P"));
        assert!(trace.borrow().is_empty());
    }

    #[test]
    fn leave_hook_precedes_enter_hook() {
        let trace = Trace::default();
        let mut fsm = patrol_system(&trace);

        fsm.perform_transition("X").unwrap();

        assert_eq!(*trace.borrow(), vec!["leave-P", "enter-Q"]);
        assert_eq!(fsm.current_state_id(), Some(&"Q"));
    }

    #[test]
    fn round_trip_returns_to_start() {
        let trace = Trace::default();
        let mut fsm = patrol_system(&trace);

        fsm.perform_transition("X").unwrap();
        fsm.perform_transition("Y").unwrap();

        assert_eq!(fsm.current_state_id(), Some(&"P"));
        assert_eq!(
            *trace.borrow(),
            vec!["leave-P", "enter-Q", "leave-Q", "enter-P"]
        );
    }

    #[test]
    fn absent_label_is_unresolved() {
        let trace = Trace::default();
        let mut fsm = patrol_system(&trace);

        let result = fsm.perform_transition("Y");

        assert_eq!(
            result,
            Err(FsmError::UnresolvedTransition {
                label: "Y".to_string(),
                from: "P".to_string(),
                destination: None,
            })
        );
        assert_eq!(fsm.current_state_id(), Some(&"P"));
        assert!(trace.borrow().is_empty());
    }

    #[test]
    fn null_label_is_rejected() {
        let trace = Trace::default();
        let mut fsm = patrol_system(&trace);

        assert_eq!(fsm.perform_transition(""), Err(FsmError::NullTransition));
        assert_eq!(fsm.current_state_id(), Some(&"P"));
    }

    #[test]
    fn transition_on_empty_system_fails() {
        let mut fsm: FsmSystem<&str, &str, ()> = FsmSystem::new();

        assert_eq!(fsm.perform_transition("X"), Err(FsmError::NoStates));
    }

    #[test]
    fn removed_destination_leaves_dangling_entry() {
        let trace = Trace::default();
        let mut fsm = patrol_system(&trace);
        fsm.perform_transition("X").unwrap();
        fsm.perform_transition("Y").unwrap();
        fsm.remove_state(&"Q").unwrap();

        assert!(fsm.validate().is_failure());
        assert_eq!(
            fsm.perform_transition("X"),
            Err(FsmError::UnresolvedTransition {
                label: "X".to_string(),
                from: "P".to_string(),
                destination: Some("Q".to_string()),
            })
        );
        assert_eq!(fsm.current_state_id(), Some(&"P"));
    }

    #[test]
    fn validate_collects_every_dangling_entry() {
        let mut fsm: FsmSystem<&str, &str, ()> = FsmSystem::new();
        fsm.add_state(
            LabeledState::idle("A")
                .with_transition("to-b", "B")
                .unwrap()
                .with_transition("to-c", "C")
                .unwrap(),
        )
        .unwrap();

        match fsm.validate() {
            Validation::Failure(errors) => assert_eq!(errors.len(), 2),
            Validation::Success(_) => panic!("Expected dangling transitions"),
        }

        fsm.add_state(LabeledState::idle("B")).unwrap();
        fsm.add_state(LabeledState::idle("C")).unwrap();
        assert!(fsm.validate().is_success());
    }

    #[test]
    fn enter_hook_request_is_applied_after_transition() {
        let trace = Trace::default();
        let mut fsm: FsmSystem<&str, &str, ()> = FsmSystem::new();
        fsm.add_state(traced_state("A", &trace).with_transition("go", "B").unwrap())
            .unwrap();
        let enter_trace = Rc::clone(&trace);
        fsm.add_state(
            LabeledState::idle("B")
                .with_transition("bounce", "C")
                .unwrap()
                .before_enter(move |requests| {
                    enter_trace.borrow_mut().push("enter-B".to_string());
                    requests.request("bounce");
                }),
        )
        .unwrap();
        fsm.add_state(traced_state("C", &trace)).unwrap();

        fsm.perform_transition("go").unwrap();

        assert_eq!(fsm.current_state_id(), Some(&"C"));
        assert_eq!(*trace.borrow(), vec!["leave-A", "enter-B", "enter-C"]);
    }

    #[test]
    fn rejected_follow_up_is_distinguished_from_rejected_label() {
        let mut fsm: FsmSystem<&str, &str, ()> = FsmSystem::new();
        fsm.add_state(LabeledState::idle("A").with_transition("go", "B").unwrap())
            .unwrap();
        fsm.add_state(
            LabeledState::idle("B").before_enter(|requests| requests.request("missing")),
        )
        .unwrap();

        let result = fsm.perform_transition("go");

        assert_eq!(
            result,
            Err(FsmError::FollowUpRejected {
                applied: 1,
                source: Box::new(FsmError::UnresolvedTransition {
                    label: "missing".to_string(),
                    from: "B".to_string(),
                    destination: None,
                }),
            })
        );
        assert_eq!(fsm.current_state_id(), Some(&"B"));

        assert!(matches!(
            fsm.perform_transition("go"),
            Err(FsmError::UnresolvedTransition { .. })
        ));
        assert_eq!(fsm.current_state_id(), Some(&"B"));
    }

    struct RequestsTwice;

    impl Behavior<Vec<&'static str>, &'static str> for RequestsTwice {
        fn reason(&mut self, _log: &Vec<&'static str>, requests: &mut TransitionRequests<&'static str>) {
            requests.request("saw");
            requests.request("saw");
        }

        fn act(&mut self, log: &mut Vec<&'static str>) {
            log.push("patrol");
        }
    }

    #[test]
    fn tick_reports_second_request_as_follow_up() {
        let mut fsm: FsmSystem<&str, &str, Vec<&'static str>> = FsmSystem::new();
        fsm.add_state(
            LabeledState::new("Patrolling", RequestsTwice)
                .with_transition("saw", "Chasing")
                .unwrap(),
        )
        .unwrap();
        fsm.add_state(LabeledState::new("Chasing", Chases)).unwrap();
        let mut log = Vec::new();

        let result = fsm.tick(&mut log);

        assert!(matches!(
            result,
            Err(FsmError::FollowUpRejected { applied: 1, .. })
        ));
        assert_eq!(fsm.current_state_id(), Some(&"Chasing"));
        assert_eq!(log, vec!["chase"]);
    }

    #[test]
    fn re_entrant_loop_is_bounded() {
        let mut fsm: FsmSystem<&str, &str, ()> =
            FsmSystem::with_config(FsmConfig::default().max_transition_depth(5));
        let hops = Rc::new(RefCell::new(0));
        for (id, next) in [("A", "B"), ("B", "A")] {
            let counter = Rc::clone(&hops);
            fsm.add_state(
                LabeledState::idle(id)
                    .with_transition("hop", next)
                    .unwrap()
                    .before_enter(move |requests| {
                        *counter.borrow_mut() += 1;
                        requests.request("hop");
                    }),
            )
            .unwrap();
        }

        let result = fsm.perform_transition("hop");

        assert_eq!(result, Err(FsmError::TransitionDepthExceeded { limit: 5 }));
        assert_eq!(*hops.borrow(), 6);
        assert_eq!(fsm.current_state_id(), Some(&"A"));
    }

    struct SeesTarget;

    impl Behavior<Vec<&'static str>, &'static str> for SeesTarget {
        fn reason(&mut self, _log: &Vec<&'static str>, requests: &mut TransitionRequests<&'static str>) {
            requests.request("saw");
        }

        fn act(&mut self, log: &mut Vec<&'static str>) {
            log.push("patrol");
        }
    }

    struct Chases;

    impl Behavior<Vec<&'static str>, &'static str> for Chases {
        fn reason(&mut self, _log: &Vec<&'static str>, _requests: &mut TransitionRequests<&'static str>) {}

        fn act(&mut self, log: &mut Vec<&'static str>) {
            log.push("chase");
        }
    }

    #[test]
    fn tick_acts_in_the_state_reason_selected() {
        let mut fsm: FsmSystem<&str, &str, Vec<&'static str>> = FsmSystem::new();
        fsm.add_state(
            LabeledState::new("Patrolling", SeesTarget)
                .with_transition("saw", "Chasing")
                .unwrap(),
        )
        .unwrap();
        fsm.add_state(LabeledState::new("Chasing", Chases)).unwrap();
        let mut log = Vec::new();

        fsm.tick(&mut log).unwrap();
        fsm.tick(&mut log).unwrap();

        assert_eq!(log, vec!["chase", "chase"]);
        assert_eq!(fsm.current_state_id(), Some(&"Chasing"));
    }

    #[test]
    fn tick_still_acts_when_request_is_rejected() {
        let mut fsm: FsmSystem<&str, &str, Vec<&'static str>> = FsmSystem::new();
        fsm.add_state(LabeledState::new("Patrolling", SeesTarget))
            .unwrap();
        let mut log = Vec::new();

        let result = fsm.tick(&mut log);

        assert!(matches!(
            result,
            Err(FsmError::UnresolvedTransition { .. })
        ));
        assert_eq!(log, vec!["patrol"]);
    }

    #[test]
    fn tick_on_empty_system_fails() {
        let mut fsm: FsmSystem<&str, &str, Vec<&'static str>> = FsmSystem::new();
        let mut log = Vec::new();

        assert_eq!(fsm.tick(&mut log), Err(FsmError::NoStates));
        assert!(log.is_empty());
    }

    #[test]
    #[traced_test]
    fn transitions_and_rejections_are_logged() {
        let trace = Trace::default();
        let mut fsm = patrol_system(&trace);

        fsm.perform_transition("X").unwrap();
        let _ = fsm.perform_transition("X");

        assert!(logs_contain("State transition"));
        assert!(logs_contain("unresolved_transition"));
    }
}
