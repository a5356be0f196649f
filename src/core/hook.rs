//! Lifecycle hooks and deferred transition requests.
//!
//! Hooks are optional callbacks attached to a state. An unset hook is a
//! no-op. Hooks cannot reach the machine that owns them; instead they receive
//! a [`TransitionRequests`] queue and push the transitions they want. The
//! machine applies those once the running transition has completed.

use std::collections::VecDeque;
use std::fmt;

use tracing::warn;

use super::error::FsmError;

/// FIFO queue of transitions requested from inside hooks and `reason` steps.
///
/// `T` is whatever the machine transitions by: a label in the labeled
/// design, a state name in the named design.
///
/// # Example
///
/// ```rust
/// use tickstate::core::TransitionRequests;
///
/// let mut requests: TransitionRequests<String> = TransitionRequests::new();
/// requests.request("Chasing");
///
/// assert_eq!(requests.len(), 1);
/// assert_eq!(requests.pending().next().map(String::as_str), Some("Chasing"));
/// ```
#[derive(Debug)]
pub struct TransitionRequests<T> {
    pending: VecDeque<T>,
}

impl<T> Default for TransitionRequests<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TransitionRequests<T> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Queue a transition. It runs after the current hook returns.
    pub fn request(&mut self, target: impl Into<T>) {
        self.pending.push_back(target.into());
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Requests in the order they will be applied.
    pub fn pending(&self) -> impl Iterator<Item = &T> {
        self.pending.iter()
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        self.pending.pop_front()
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Apply queued requests one at a time until the queue drains.
///
/// `step` performs a single transition and may queue further requests. At
/// most `limit` transitions run; past that the rest of the queue is dropped
/// and [`FsmError::TransitionDepthExceeded`] is returned. A failing step also
/// drops the rest of the queue.
///
/// `applied` counts transitions the inbound call already completed before the
/// queue is drained. A step that fails after at least one applied transition
/// is reported as [`FsmError::FollowUpRejected`], so a plain rejection always
/// means nothing changed.
pub(crate) fn run_chain<T, F>(
    requests: &mut TransitionRequests<T>,
    limit: usize,
    mut applied: usize,
    mut step: F,
) -> Result<(), FsmError>
where
    F: FnMut(T, &mut TransitionRequests<T>) -> Result<(), FsmError>,
{
    let mut depth = 0;
    while let Some(target) = requests.pop() {
        depth += 1;
        if depth > limit {
            warn!(
                operation = "apply_requests",
                limit,
                discarded = requests.len() + 1,
                outcome = "transition_depth_exceeded",
                "Discarding requested transitions"
            );
            requests.clear();
            return Err(FsmError::TransitionDepthExceeded { limit });
        }

        if let Err(err) = step(target, requests) {
            requests.clear();
            if applied == 0 {
                return Err(err);
            }
            warn!(
                operation = "apply_requests",
                applied,
                cause = err.kind(),
                outcome = "follow_up_rejected",
                "Requested follow-up transition rejected"
            );
            return Err(FsmError::FollowUpRejected {
                applied,
                source: Box::new(err),
            });
        }
        applied += 1;
    }
    Ok(())
}

type Callback<T> = Box<dyn FnMut(&mut TransitionRequests<T>)>;

/// Optional lifecycle callback.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{Hook, TransitionRequests};
///
/// let mut hook: Hook<String> = Hook::new(|requests| requests.request("Alert"));
///
/// let mut requests = TransitionRequests::new();
/// hook.call(&mut requests);
/// assert_eq!(requests.len(), 1);
///
/// // Unset hooks do nothing.
/// let mut idle: Hook<String> = Hook::noop();
/// idle.call(&mut requests);
/// assert_eq!(requests.len(), 1);
/// ```
pub struct Hook<T> {
    callback: Option<Callback<T>>,
}

impl<T> Hook<T> {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnMut(&mut TransitionRequests<T>) + 'static,
    {
        Hook {
            callback: Some(Box::new(callback)),
        }
    }

    pub fn noop() -> Self {
        Hook { callback: None }
    }

    pub fn is_set(&self) -> bool {
        self.callback.is_some()
    }

    /// Invoke the callback, if any. Panics raised by the callback propagate.
    pub fn call(&mut self, requests: &mut TransitionRequests<T>) {
        if let Some(callback) = self.callback.as_mut() {
            callback(requests);
        }
    }
}

impl<T> Default for Hook<T> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<T> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("set", &self.is_set())
            .finish()
    }
}

/// Enter and exit hooks shared by both state machine designs.
#[derive(Debug)]
pub struct LifecycleHooks<T> {
    pub on_enter: Hook<T>,
    pub on_exit: Hook<T>,
}

impl<T> Default for LifecycleHooks<T> {
    fn default() -> Self {
        Self {
            on_enter: Hook::noop(),
            on_exit: Hook::noop(),
        }
    }
}
