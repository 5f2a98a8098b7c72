//! Lifecycle state machine.
//!
//! ```text
//! Created → Starting → Running → ShuttingDown → Closed
//! ```
//!
//! Transitions only move forward. The current state is published through a
//! watch channel so shutdown can wait for `Closed` without polling.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Created,
    Starting,
    Running,
    ShuttingDown,
    Closed,
}

/// Shared handle on a server's lifecycle state.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    inner: Arc<LifecycleInner>,
}

#[derive(Debug)]
struct LifecycleInner {
    state: watch::Sender<LifecycleState>,
    local_addr: OnceLock<SocketAddr>,
}

impl Lifecycle {
    pub fn new() -> Self {
        let (state, _) = watch::channel(LifecycleState::Created);
        Self {
            inner: Arc::new(LifecycleInner {
                state,
                local_addr: OnceLock::new(),
            }),
        }
    }

    pub fn state(&self) -> LifecycleState {
        *self.inner.state.borrow()
    }

    /// Move to `next` if it is ahead of the current state.
    pub fn advance(&self, next: LifecycleState) -> bool {
        self.inner.state.send_if_modified(|state| {
            if next > *state {
                tracing::debug!(from = ?*state, to = ?next, "Lifecycle transition");
                *state = next;
                true
            } else {
                false
            }
        })
    }

    /// Move `from` → `to` only if the current state is exactly `from`.
    pub fn transition(&self, from: LifecycleState, to: LifecycleState) -> bool {
        self.inner.state.send_if_modified(|state| {
            if *state == from && to > from {
                tracing::debug!(from = ?from, to = ?to, "Lifecycle transition");
                *state = to;
                true
            } else {
                false
            }
        })
    }

    /// Record the bound address and enter `Running`.
    pub fn mark_running(&self, addr: SocketAddr) {
        let _ = self.inner.local_addr.set(addr);
        self.advance(LifecycleState::Running);
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.inner.local_addr.get().copied()
    }

    /// Resolve once the state is at or past `target`.
    pub async fn reached(&self, target: LifecycleState) {
        let mut rx = self.inner.state.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|state| *state >= target).await;
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn moves_forward_only() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.state(), LifecycleState::Created);

        assert!(lifecycle.advance(LifecycleState::Running));
        assert!(!lifecycle.advance(LifecycleState::Starting));
        assert_eq!(lifecycle.state(), LifecycleState::Running);
    }

    #[test]
    fn transition_requires_exact_source() {
        let lifecycle = Lifecycle::new();
        assert!(lifecycle.transition(LifecycleState::Created, LifecycleState::Starting));
        assert!(!lifecycle.transition(LifecycleState::Created, LifecycleState::Starting));
        assert!(!lifecycle.transition(LifecycleState::Starting, LifecycleState::Created));
    }

    #[test]
    fn running_after_shutdown_does_not_regress() {
        let lifecycle = Lifecycle::new();
        lifecycle.advance(LifecycleState::ShuttingDown);
        lifecycle.mark_running("127.0.0.1:1".parse().unwrap());

        assert_eq!(lifecycle.state(), LifecycleState::ShuttingDown);
        assert!(lifecycle.local_addr().is_some());
    }

    #[tokio::test]
    async fn reached_wakes_on_transition() {
        let lifecycle = Lifecycle::new();
        let waiter = lifecycle.clone();
        let task = tokio::spawn(async move { waiter.reached(LifecycleState::Closed).await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!task.is_finished());

        lifecycle.advance(LifecycleState::Closed);
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();
    }
}
