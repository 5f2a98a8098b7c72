//! Listener startup.
//!
//! # Responsibilities
//! - Bind the configured address on a detached task
//! - Publish the bound address and the `Running` state
//! - Serve the router until a close or shutdown request completes
//!
//! # Design Decisions
//! - `spawn_listener` never blocks the caller
//! - A listen failure has no caller to report to: it is logged and the
//!   process exits with status 1

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;
use tokio::net::TcpListener;

use crate::error::ServerError;
use crate::lifecycle::state::{Lifecycle, LifecycleState};

/// Serve `app` on `address` from a task on `runtime`.
pub fn spawn_listener(
    runtime: &tokio::runtime::Handle,
    address: String,
    app: Router,
    handle: Handle,
    lifecycle: Lifecycle,
) {
    runtime.spawn(async move {
        match serve(&address, app, handle, &lifecycle).await {
            Ok(()) => {
                lifecycle.advance(LifecycleState::Closed);
                tracing::info!(address = %address, "HTTP server stopped");
            }
            Err(source) => {
                let err = ServerError::ListenFailure { address, source };
                tracing::error!(error = %err, "Listener failed, terminating process");
                std::process::exit(1);
            }
        }
    });
}

async fn serve(
    address: &str,
    app: Router,
    handle: Handle,
    lifecycle: &Lifecycle,
) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(address).await?;
    let local_addr: SocketAddr = listener.local_addr()?;
    lifecycle.mark_running(local_addr);

    tracing::info!(address = %local_addr, "HTTP server listening");

    axum_server::from_tcp(listener.into_std()?)
        .handle(handle)
        .serve(app.into_make_service())
        .await
}
