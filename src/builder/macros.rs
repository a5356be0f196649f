//! Macros for declaring state identifiers and transition labels.

/// Generate a `Symbol` implementation for a simple enum.
///
/// The optional `null:` variant is the sentinel that every registration and
/// transition rejects.
///
/// # Example
///
/// ```
/// use tickstate::core::Symbol;
/// use tickstate::symbol_enum;
///
/// symbol_enum! {
///     pub enum Transition {
///         Null,
///         SawPlayer,
///         LostPlayer,
///     }
///     null: Null
/// }
///
/// assert!(Transition::Null.is_null());
/// assert_eq!(Transition::SawPlayer.name(), "SawPlayer");
/// ```
#[macro_export]
macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(null: $null:ident)?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Symbol for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_null(&self) -> bool {
                match self {
                    $(Self::$null => true,)?
                    _ => false,
                }
            }
        }
    };
}
