//! HTTP server facade.
//!
//! # Responsibilities
//! - Own the frozen config, the registration engine and the lifecycle
//! - Resolve groups to namespaces and register route registries into them
//! - Wire the default middleware around the registered routes
//! - Start the listener and coordinate close / shutdown

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::http::engine::{BoundRoute, Engine};
use crate::http::middleware::apply_defaults;
use crate::lifecycle::{startup, Lifecycle, LifecycleState, Shutdown};
use crate::routing::{Group, Middleware, Namespace, RouteRegistry};

/// HTTP server built from a [`ServerConfig`] and any number of route
/// registries.
///
/// Registration happens before [`Server::start`]; the router is assembled
/// once, when the listener starts.
pub struct Server {
    config: ServerConfig,
    engine: Engine,
    handle: Handle,
    lifecycle: Lifecycle,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            engine: Engine::new(),
            handle: Handle::new(),
            lifecycle: Lifecycle::new(),
        }
    }

    /// Register every route of `registry` under `group`, wrapped by
    /// `middlewares` in the order given.
    pub fn register_routers(
        &mut self,
        group: Group,
        registry: &RouteRegistry,
        middlewares: &[Middleware],
    ) -> Result<()> {
        self.register_namespace(Namespace::resolve(group), registry, middlewares)
    }

    /// Register directly into a namespace.
    pub fn register_namespace(
        &mut self,
        namespace: Namespace,
        registry: &RouteRegistry,
        middlewares: &[Middleware],
    ) -> Result<()> {
        if self.lifecycle.state() != LifecycleState::Created {
            tracing::warn!(
                group = %namespace.group(),
                "Routes registered after start are not served"
            );
        }
        self.engine.register(namespace, registry, middlewares)
    }

    /// The full application router, default middleware included.
    pub fn router(&self) -> Router {
        apply_defaults(self.engine.router(), &self.config)
    }

    /// Routes bound so far, in binding order.
    pub fn routes(&self) -> Vec<BoundRoute> {
        self.engine.routes()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Address the listener is bound to, once it is running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.lifecycle.local_addr()
    }

    /// Wait for the listener to bind.
    ///
    /// Returns `None` if the server was closed before it ever listened.
    pub async fn listening(&self) -> Option<SocketAddr> {
        self.lifecycle.reached(LifecycleState::Running).await;
        self.lifecycle.local_addr()
    }

    /// Begin serving on a background task. Returns without waiting for the
    /// bind to complete.
    ///
    /// The router is built before the state leaves `Created`, so a failed
    /// start leaves the server closable.
    ///
    /// # Errors
    /// [`ServerError::AlreadyStarted`] after a previous start or close, and
    /// [`ServerError::RuntimeUnavailable`] outside a Tokio runtime.
    pub fn start(&self) -> Result<()> {
        if self.lifecycle.state() != LifecycleState::Created {
            return Err(ServerError::AlreadyStarted);
        }
        let runtime = tokio::runtime::Handle::try_current()?;
        let app = self.router();

        if !self
            .lifecycle
            .transition(LifecycleState::Created, LifecycleState::Starting)
        {
            return Err(ServerError::AlreadyStarted);
        }

        let address = self.config.listen_address();
        tracing::info!(
            address = %address,
            routes = self.engine.routes().len(),
            "Starting HTTP server"
        );
        startup::spawn_listener(
            &runtime,
            address,
            app,
            self.handle.clone(),
            self.lifecycle.clone(),
        );
        Ok(())
    }

    /// Drop the listener and all open connections at once.
    pub async fn close(&self) -> Result<()> {
        self.shutdown_coordinator().close().await
    }

    /// Drain in-flight requests until `deadline` resolves.
    ///
    /// # Errors
    /// [`ServerError::ShutdownTimeout`] if requests are still running when
    /// the deadline fires. The listener keeps draining; call
    /// [`Server::close`] to force it down.
    pub async fn shutdown<F>(&self, deadline: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.shutdown_coordinator().shutdown(deadline).await
    }

    /// [`Server::shutdown`] bounded by the configured shutdown timeout.
    pub async fn graceful_shutdown(&self) -> Result<()> {
        let timeout = self.config.shutdown_timeout();
        self.shutdown(tokio::time::sleep(timeout)).await
    }

    fn shutdown_coordinator(&self) -> Shutdown {
        Shutdown::new(self.handle.clone(), self.lifecycle.clone())
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("config", &self.config)
            .field("state", &self.lifecycle.state())
            .field("routes", &self.engine.routes().len())
            .finish()
    }
}
