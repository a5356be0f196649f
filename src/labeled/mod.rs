//! Labeled-transition design.
//!
//! Every state owns a table mapping transition labels to destination states.
//! The system resolves a label through the current state's table and moves
//! to the destination, running `before_leave` then `before_enter`. Each
//! state also carries a [`Behavior`] whose `reason` and `act` steps the host
//! drives once per tick.

mod state;
mod system;
mod table;

pub use state::{Behavior, LabeledState};
pub use system::FsmSystem;
pub use table::TransitionTable;
