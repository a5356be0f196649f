//! Core building blocks shared by both state machine designs.
//!
//! - Symbolic identifiers and labels via the `Symbol` trait
//! - The state registry and its active-state pointer
//! - Optional lifecycle hooks and deferred transition requests
//! - Error and configuration types

mod config;
mod error;
mod hook;
mod registry;
mod symbol;

pub(crate) use hook::run_chain;

pub use config::{FsmConfig, DEFAULT_MAX_TRANSITION_DEPTH};
pub use error::FsmError;
pub use hook::{Hook, LifecycleHooks, TransitionRequests};
pub use registry::StateRegistry;
pub use symbol::Symbol;
