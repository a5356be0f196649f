//! States of the label-addressed design.

use std::fmt;

use crate::core::{Hook, LifecycleHooks, TransitionRequests};

/// A named state with optional enter, exit and per-frame hooks.
///
/// Hooks receive the machine's request queue and may ask for a transition by
/// state name; the request runs once the hook returns.
#[derive(Debug)]
pub struct NamedState {
    name: String,
    hooks: LifecycleHooks<String>,
    frame: Hook<String>,
}

impl NamedState {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            hooks: LifecycleHooks::default(),
            frame: Hook::noop(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logic run when the state becomes active. Replaces any previous hook.
    pub fn on_enter<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&mut TransitionRequests<String>) + 'static,
    {
        self.hooks.on_enter = Hook::new(hook);
        self
    }

    /// Logic run when the state becomes inactive. Replaces any previous hook.
    pub fn on_exit<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&mut TransitionRequests<String>) + 'static,
    {
        self.hooks.on_exit = Hook::new(hook);
        self
    }

    /// Logic run on every `update` while the state is active.
    pub fn on_frame<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&mut TransitionRequests<String>) + 'static,
    {
        self.frame = Hook::new(hook);
        self
    }

    /// Remove every hook.
    pub fn clear_hooks(&mut self) -> &mut Self {
        self.hooks = LifecycleHooks::default();
        self.frame = Hook::noop();
        self
    }

    pub(crate) fn enter(&mut self, requests: &mut TransitionRequests<String>) {
        self.hooks.on_enter.call(requests);
    }

    pub(crate) fn exit(&mut self, requests: &mut TransitionRequests<String>) {
        self.hooks.on_exit.call(requests);
    }

    pub(crate) fn frame(&mut self, requests: &mut TransitionRequests<String>) {
        self.frame.call(requests);
    }
}

impl fmt::Display for NamedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
