//! States of the labeled-transition design.

use std::fmt;

use super::table::TransitionTable;
use crate::core::{FsmError, Hook, LifecycleHooks, Symbol, TransitionRequests};

/// Per-tick decision and action logic supplied by the host agent.
///
/// The owning system calls `reason` first and applies any transition it
/// requested, then calls `act` on whichever state is active afterwards.
///
/// # Example
///
/// ```rust
/// use tickstate::core::TransitionRequests;
/// use tickstate::labeled::Behavior;
///
/// struct Sentry;
///
/// struct World {
///     target_visible: bool,
///     scans: u32,
/// }
///
/// impl Behavior<World, &'static str> for Sentry {
///     fn reason(&mut self, world: &World, requests: &mut TransitionRequests<&'static str>) {
///         if world.target_visible {
///             requests.request("saw target");
///         }
///     }
///
///     fn act(&mut self, world: &mut World) {
///         world.scans += 1;
///     }
/// }
/// ```
pub trait Behavior<C, L> {
    /// Inspect the environment and optionally request a transition.
    fn reason(&mut self, ctx: &C, requests: &mut TransitionRequests<L>);

    /// Perform this state's per-tick behavior.
    fn act(&mut self, ctx: &mut C);
}

/// A state with no per-tick behavior.
impl<C, L> Behavior<C, L> for () {
    fn reason(&mut self, _ctx: &C, _requests: &mut TransitionRequests<L>) {}

    fn act(&mut self, _ctx: &mut C) {}
}

/// A state owning its transition table, lifecycle hooks and behavior.
///
/// # Example
///
/// ```rust
/// use tickstate::labeled::LabeledState;
///
/// let state: LabeledState<&str, &str, ()> = LabeledState::idle("Patrolling")
///     .with_transition("saw target", "Chasing")
///     .unwrap()
///     .before_enter(|_| println!("start patrolling"));
///
/// assert_eq!(state.output_state(&"saw target"), Some(&"Chasing"));
/// ```
pub struct LabeledState<S: Symbol, L: Symbol, C> {
    id: S,
    transitions: TransitionTable<L, S>,
    hooks: LifecycleHooks<L>,
    behavior: Box<dyn Behavior<C, L>>,
}

impl<S: Symbol, L: Symbol, C> LabeledState<S, L, C> {
    pub fn new<B>(id: S, behavior: B) -> Self
    where
        B: Behavior<C, L> + 'static,
    {
        Self {
            id,
            transitions: TransitionTable::new(),
            hooks: LifecycleHooks::default(),
            behavior: Box::new(behavior),
        }
    }

    /// A state whose `reason` and `act` do nothing.
    pub fn idle(id: S) -> Self {
        Self::new(id, ())
    }

    pub fn id(&self) -> &S {
        &self.id
    }

    pub fn transitions(&self) -> &TransitionTable<L, S> {
        &self.transitions
    }

    /// Register `label -> destination` on this state's table.
    pub fn add_transition(&mut self, label: L, destination: S) -> Result<(), FsmError> {
        self.transitions.add(label, destination)
    }

    pub fn remove_transition(&mut self, label: &L) -> Result<S, FsmError> {
        self.transitions.remove(label)
    }

    /// Fluent form of [`add_transition`](Self::add_transition).
    pub fn with_transition(mut self, label: L, destination: S) -> Result<Self, FsmError> {
        self.add_transition(label, destination)?;
        Ok(self)
    }

    /// Destination reached from this state by `label`, if any.
    pub fn output_state(&self, label: &L) -> Option<&S> {
        self.transitions.lookup(label)
    }

    /// Hook run right after this state becomes active.
    pub fn before_enter<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut TransitionRequests<L>) + 'static,
    {
        self.hooks.on_enter = Hook::new(hook);
        self
    }

    /// Hook run right before this state stops being active.
    pub fn before_leave<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut TransitionRequests<L>) + 'static,
    {
        self.hooks.on_exit = Hook::new(hook);
        self
    }

    pub fn hooks_mut(&mut self) -> &mut LifecycleHooks<L> {
        &mut self.hooks
    }

    pub(crate) fn enter(&mut self, requests: &mut TransitionRequests<L>) {
        self.hooks.on_enter.call(requests);
    }

    pub(crate) fn leave(&mut self, requests: &mut TransitionRequests<L>) {
        self.hooks.on_exit.call(requests);
    }

    pub(crate) fn reason(&mut self, ctx: &C, requests: &mut TransitionRequests<L>) {
        self.behavior.reason(ctx, requests);
    }

    pub(crate) fn act(&mut self, ctx: &mut C) {
        self.behavior.act(ctx);
    }
}

impl<S: Symbol, L: Symbol, C> fmt::Debug for LabeledState<S, L, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabeledState")
            .field("id", &self.id)
            .field("transitions", &self.transitions)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
