//! Tickstate: a finite state machine core for tick-driven agents
//!
//! Host objects (game characters, simulated agents) own a machine, register
//! their states once at setup, and drive it from their simulation loop. The
//! machine owns the active state and the enter/exit lifecycle; the host
//! supplies behavior through hooks.
//!
//! # Designs
//!
//! - **Labeled** ([`labeled`]): each state owns a table from transition label
//!   to destination state. The host performs transitions by label and drives
//!   each state's `reason`/`act` behavior once per tick.
//! - **Named** ([`named`]): transitions name their destination directly, and
//!   states carry `on_enter`/`on_exit`/`on_frame` hooks. The initial state is
//!   entered lazily on the first `update`.
//!
//! Both share the [`core::StateRegistry`], the [`core::Hook`] contract and
//! the bounded handling of transitions requested from inside hooks.
//!
//! # Example
//!
//! ```rust
//! use tickstate::labeled::{FsmSystem, LabeledState};
//! use tickstate::symbol_enum;
//!
//! symbol_enum! {
//!     enum StateId {
//!         Null,
//!         FollowingPath,
//!         ChasingPlayer,
//!     }
//!     null: Null
//! }
//!
//! symbol_enum! {
//!     enum Transition {
//!         Null,
//!         SawPlayer,
//!         LostPlayer,
//!     }
//!     null: Null
//! }
//!
//! let mut fsm: FsmSystem<StateId, Transition, ()> = FsmSystem::new();
//! fsm.add_state(
//!     LabeledState::idle(StateId::FollowingPath)
//!         .with_transition(Transition::SawPlayer, StateId::ChasingPlayer)?,
//! )?;
//! fsm.add_state(
//!     LabeledState::idle(StateId::ChasingPlayer)
//!         .with_transition(Transition::LostPlayer, StateId::FollowingPath)?,
//! )?;
//!
//! fsm.perform_transition(Transition::SawPlayer)?;
//! assert_eq!(fsm.current_state_id(), Some(&StateId::ChasingPlayer));
//! # Ok::<(), tickstate::core::FsmError>(())
//! ```

pub mod builder;
pub mod core;
pub mod labeled;
pub mod named;

// Re-export commonly used types
pub use crate::core::{FsmConfig, FsmError, Hook, StateRegistry, Symbol, TransitionRequests};
pub use labeled::{Behavior, FsmSystem, LabeledState, TransitionTable};
pub use named::{NamedMachine, NamedState};
