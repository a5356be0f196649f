//! Per-state transition tables.

use tracing::warn;

use crate::core::{FsmError, Symbol};

/// Mapping from transition label to destination state.
///
/// Keys are unique. A second registration of the same label is rejected and
/// the first destination is kept. Null labels and null destinations are
/// never stored.
///
/// # Example
///
/// ```rust
/// use tickstate::labeled::TransitionTable;
///
/// let mut table = TransitionTable::new();
/// table.add("saw target", "Chasing").unwrap();
///
/// assert_eq!(table.lookup(&"saw target"), Some(&"Chasing"));
/// assert_eq!(table.lookup(&"lost target"), None);
/// assert!(table.add("saw target", "Fleeing").is_err());
/// assert_eq!(table.lookup(&"saw target"), Some(&"Chasing"));
/// ```
#[derive(Clone, Debug)]
pub struct TransitionTable<L: Symbol, S: Symbol> {
    entries: Vec<(L, S)>,
}

impl<L: Symbol, S: Symbol> Default for TransitionTable<L, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Symbol, S: Symbol> TransitionTable<L, S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert `label -> destination`.
    pub fn add(&mut self, label: L, destination: S) -> Result<(), FsmError> {
        if label.is_null() {
            warn!(
                operation = "add_transition",
                destination = destination.name(),
                outcome = "invalid_argument",
                "Null transition not allowed to be added"
            );
            return Err(FsmError::InvalidArgument(
                "null transition not allowed to be added".to_string(),
            ));
        }
        if destination.is_null() {
            warn!(
                operation = "add_transition",
                label = label.name(),
                outcome = "invalid_argument",
                "Null state not allowed as a transition destination"
            );
            return Err(FsmError::InvalidArgument(
                "null state not allowed as a transition destination".to_string(),
            ));
        }
        if let Some(existing) = self.lookup(&label) {
            warn!(
                operation = "add_transition",
                label = label.name(),
                destination = existing.name(),
                outcome = "duplicate_transition",
                "Transition already exists"
            );
            return Err(FsmError::DuplicateTransition {
                label: label.name().to_string(),
                destination: existing.name().to_string(),
            });
        }

        self.entries.push((label, destination));
        Ok(())
    }

    /// Remove a label, returning the destination it pointed at.
    pub fn remove(&mut self, label: &L) -> Result<S, FsmError> {
        let Some(index) = self
            .entries
            .iter()
            .position(|(existing, _)| existing == label)
        else {
            warn!(
                operation = "remove_transition",
                label = label.name(),
                outcome = "unknown_transition",
                "Cannot remove transition since it does not exist"
            );
            return Err(FsmError::UnknownTransition {
                label: label.name().to_string(),
            });
        };
        Ok(self.entries.remove(index).1)
    }

    /// Destination for `label`, or `None` when the label is not in the table.
    pub fn lookup(&self, label: &L) -> Option<&S> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, destination)| destination)
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, &S)> {
        self.entries.iter().map(|(label, destination)| (label, destination))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn first_registration_wins() {
        let mut table = TransitionTable::new();
        table.add("SawPlayer", "ChasingPlayer").unwrap();

        let result = table.add("SawPlayer", "FollowingPath");

        assert_eq!(
            result,
            Err(FsmError::DuplicateTransition {
                label: "SawPlayer".to_string(),
                destination: "ChasingPlayer".to_string(),
            })
        );
        assert_eq!(table.lookup(&"SawPlayer"), Some(&"ChasingPlayer"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn null_label_and_destination_are_rejected() {
        let mut table: TransitionTable<&str, &str> = TransitionTable::new();

        assert!(matches!(
            table.add("", "ChasingPlayer"),
            Err(FsmError::InvalidArgument(_))
        ));
        assert!(matches!(
            table.add("SawPlayer", ""),
            Err(FsmError::InvalidArgument(_))
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn remove_returns_destination() {
        let mut table = TransitionTable::new();
        table.add("LostPlayer", "FollowingPath").unwrap();

        assert_eq!(table.remove(&"LostPlayer"), Ok("FollowingPath"));
        assert!(table.lookup(&"LostPlayer").is_none());
    }

    #[test]
    fn remove_absent_label_fails() {
        let mut table: TransitionTable<&str, &str> = TransitionTable::new();

        assert_eq!(
            table.remove(&"LostPlayer"),
            Err(FsmError::UnknownTransition {
                label: "LostPlayer".to_string()
            })
        );
    }

    #[test]
    fn iter_keeps_registration_order() {
        let mut table = TransitionTable::new();
        table.add("b", "B").unwrap();
        table.add("a", "A").unwrap();

        let labels: Vec<_> = table.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["b", "a"]);
    }

    #[test]
    #[traced_test]
    fn rejections_are_logged() {
        let mut table = TransitionTable::new();
        table.add("SawPlayer", "ChasingPlayer").unwrap();

        let _ = table.add("SawPlayer", "FollowingPath");
        let _ = table.remove(&"LostPlayer");

        assert!(logs_contain("duplicate_transition"));
        assert!(logs_contain("unknown_transition"));
    }
}
