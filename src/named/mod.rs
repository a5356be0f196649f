//! Label-addressed design.
//!
//! States are created by name and carry optional `on_enter`, `on_exit` and
//! `on_frame` hooks. Transitions name their destination state directly
//! instead of going through a label table, and the initial state is only
//! entered on the first `update`.

mod machine;
mod state;

pub use machine::NamedMachine;
pub use state::NamedState;
