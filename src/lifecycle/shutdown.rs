//! Shutdown coordination for the server.
//!
//! # Design Decisions
//! - `close` drops open connections immediately
//! - `shutdown` stops accepting and lets in-flight requests drain; when the
//!   caller's deadline wins it reports a timeout but kills nothing
//! - A server that never started closes without touching the listener

use std::future::Future;

use axum_server::Handle;

use crate::error::{Result, ServerError};
use crate::lifecycle::state::{Lifecycle, LifecycleState};

/// Coordinator over the listener handle and lifecycle state.
#[derive(Clone)]
pub struct Shutdown {
    handle: Handle,
    lifecycle: Lifecycle,
}

impl Shutdown {
    pub fn new(handle: Handle, lifecycle: Lifecycle) -> Self {
        Self { handle, lifecycle }
    }

    /// Tear down the listener and every open connection.
    pub async fn close(&self) -> Result<()> {
        if self.close_if_never_started() {
            return Ok(());
        }
        self.lifecycle.advance(LifecycleState::ShuttingDown);
        tracing::info!("Closing HTTP server");
        self.handle.shutdown();
        self.lifecycle.reached(LifecycleState::Closed).await;
        Ok(())
    }

    /// Drain in-flight requests, giving up when `deadline` resolves.
    pub async fn shutdown<F>(&self, deadline: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        if self.close_if_never_started() {
            return Ok(());
        }
        self.lifecycle.advance(LifecycleState::ShuttingDown);
        tracing::info!(
            connections = self.handle.connection_count(),
            "Shutting down HTTP server"
        );
        self.handle.graceful_shutdown(None);

        tokio::select! {
            biased;
            _ = self.lifecycle.reached(LifecycleState::Closed) => Ok(()),
            _ = deadline => {
                tracing::warn!(
                    connections = self.handle.connection_count(),
                    "Shutdown deadline elapsed with requests still in flight"
                );
                Err(ServerError::ShutdownTimeout)
            }
        }
    }

    fn close_if_never_started(&self) -> bool {
        self.lifecycle
            .transition(LifecycleState::Created, LifecycleState::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unstarted_server_closes_immediately() {
        let lifecycle = Lifecycle::new();
        let shutdown = Shutdown::new(Handle::new(), lifecycle.clone());

        shutdown.shutdown(std::future::pending()).await.unwrap();
        assert_eq!(lifecycle.state(), LifecycleState::Closed);
    }

    #[tokio::test]
    async fn close_on_unstarted_server() {
        let lifecycle = Lifecycle::new();
        let shutdown = Shutdown::new(Handle::new(), lifecycle.clone());

        shutdown.close().await.unwrap();
        assert_eq!(lifecycle.state(), LifecycleState::Closed);
    }

    #[tokio::test]
    async fn expired_deadline_reports_timeout() {
        let lifecycle = Lifecycle::new();
        lifecycle.advance(LifecycleState::Running);
        let shutdown = Shutdown::new(Handle::new(), lifecycle.clone());

        let result = shutdown.shutdown(std::future::ready(())).await;

        assert!(matches!(result, Err(ServerError::ShutdownTimeout)));
        assert_eq!(lifecycle.state(), LifecycleState::ShuttingDown);
    }
}
