//! Symbolic identifiers for states and transition labels.
//!
//! Both state identifiers and transition labels are plain comparable values
//! passed around by the host. Each symbol type designates one null value,
//! which is never accepted where a real identifier or label is required.

use std::fmt::Debug;

/// Trait for state identifiers and transition labels.
///
/// # Required Traits
///
/// - `Clone`: symbols are copied into transition tables and the registry
/// - `Eq`: lookups compare symbols by value
/// - `Debug`: symbols appear in diagnostics
///
/// # Example
///
/// ```rust
/// use tickstate::core::Symbol;
///
/// #[derive(Clone, PartialEq, Eq, Debug)]
/// enum Transition {
///     Null,
///     SawPlayer,
///     LostPlayer,
/// }
///
/// impl Symbol for Transition {
///     fn name(&self) -> &str {
///         match self {
///             Self::Null => "Null",
///             Self::SawPlayer => "SawPlayer",
///             Self::LostPlayer => "LostPlayer",
///         }
///     }
///
///     fn is_null(&self) -> bool {
///         matches!(self, Self::Null)
///     }
/// }
///
/// assert!(Transition::Null.is_null());
/// assert_eq!(Transition::SawPlayer.name(), "SawPlayer");
/// ```
pub trait Symbol: Clone + Eq + Debug {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Check if this is the null sentinel.
    ///
    /// Default implementation returns `false`.
    fn is_null(&self) -> bool {
        false
    }
}

impl Symbol for String {
    fn name(&self) -> &str {
        self
    }

    fn is_null(&self) -> bool {
        self.is_empty()
    }
}

impl Symbol for &'static str {
    fn name(&self) -> &str {
        self
    }

    fn is_null(&self) -> bool {
        self.is_empty()
    }
}
