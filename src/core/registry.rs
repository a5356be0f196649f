//! State registry: the set of known states and the active one.
//!
//! The registry is a true set keyed by identifier. Insertion order is kept
//! for diagnostics and for picking the initial state, which is always the
//! first state added.

use tracing::{debug, warn};

use super::error::FsmError;
use super::symbol::Symbol;

/// Ordered set of states keyed by identifier, plus the active state.
///
/// `V` is the per-state payload owned by the machine built on top (hooks,
/// transition tables, behavior).
///
/// # Example
///
/// ```rust
/// use tickstate::core::StateRegistry;
///
/// let mut registry = StateRegistry::new();
/// registry.add("Patrolling", 1).unwrap();
/// registry.add("Chasing", 2).unwrap();
///
/// assert_eq!(registry.initial_id(), Some(&"Patrolling"));
/// assert!(registry.current_id().is_none());
/// assert!(registry.add("Chasing", 3).is_err());
/// ```
#[derive(Debug)]
pub struct StateRegistry<S: Symbol, V> {
    entries: Vec<(S, V)>,
    initial: Option<S>,
    current: Option<S>,
}

impl<S: Symbol, V> Default for StateRegistry<S, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol, V> StateRegistry<S, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            initial: None,
            current: None,
        }
    }

    /// Register a state.
    ///
    /// Fails on a null identifier or on an identifier that is already
    /// registered; nothing is inserted in either case. The first state ever
    /// added (or the first remaining one, after the initial is removed)
    /// becomes the initial state. The active state is not touched.
    pub fn add(&mut self, id: S, value: V) -> Result<&mut V, FsmError> {
        if id.is_null() {
            warn!(
                operation = "add_state",
                outcome = "invalid_argument",
                "Null identifier passed in as a state to add"
            );
            return Err(FsmError::InvalidArgument(
                "state identifier must not be null".to_string(),
            ));
        }

        if self.contains(&id) {
            warn!(
                operation = "add_state",
                state = id.name(),
                outcome = "duplicate_state",
                "State already exists"
            );
            return Err(FsmError::DuplicateState {
                state: id.name().to_string(),
            });
        }

        if self.initial.is_none() {
            self.initial = Some(id.clone());
        }

        debug!(
            operation = "add_state",
            state = id.name(),
            outcome = "success",
            "State added"
        );
        self.entries.push((id, value));
        let last = self.entries.len() - 1;
        Ok(&mut self.entries[last].1)
    }

    /// Remove exactly one state and hand back its payload.
    ///
    /// The active state cannot be removed. Transition tables that still name
    /// the removed state are left as they are.
    pub fn remove(&mut self, id: &S) -> Result<V, FsmError> {
        let Some(index) = self.position(id) else {
            warn!(
                operation = "remove_state",
                state = id.name(),
                outcome = "unknown_state",
                "Cannot remove state since it does not exist"
            );
            return Err(FsmError::UnknownState {
                state: id.name().to_string(),
            });
        };

        if self.current.as_ref() == Some(id) {
            warn!(
                operation = "remove_state",
                state = id.name(),
                outcome = "state_in_use",
                "Cannot remove the active state"
            );
            return Err(FsmError::StateInUse {
                state: id.name().to_string(),
            });
        }

        let (_, value) = self.entries.remove(index);
        if self.initial.as_ref() == Some(id) {
            self.initial = self.entries.first().map(|(first, _)| first.clone());
        }

        debug!(
            operation = "remove_state",
            state = id.name(),
            outcome = "success",
            "State removed"
        );
        Ok(value)
    }

    pub fn get(&self, id: &S) -> Option<&V> {
        self.position(id).map(|index| &self.entries[index].1)
    }

    pub fn get_mut(&mut self, id: &S) -> Option<&mut V> {
        self.position(id).map(move |index| &mut self.entries[index].1)
    }

    pub fn contains(&self, id: &S) -> bool {
        self.position(id).is_some()
    }

    /// The active state, if any.
    pub fn current(&self) -> Option<&V> {
        self.current.as_ref().and_then(|id| self.get(id))
    }

    pub fn current_mut(&mut self) -> Option<&mut V> {
        let id = self.current.clone()?;
        self.get_mut(&id)
    }

    pub fn current_id(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// Identifier of the first registered state.
    pub fn initial_id(&self) -> Option<&S> {
        self.initial.as_ref()
    }

    /// Make a registered state the active one. No hooks run here.
    pub(crate) fn set_current(&mut self, id: &S) -> Result<(), FsmError> {
        if !self.contains(id) {
            return Err(FsmError::UnknownState {
                state: id.name().to_string(),
            });
        }
        self.current = Some(id.clone());
        Ok(())
    }

    /// Identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &S> {
        self.entries.iter().map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &V)> {
        self.entries.iter().map(|(id, value)| (id, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: &S) -> Option<usize> {
        self.entries.iter().position(|(existing, _)| existing == id)
    }
}
