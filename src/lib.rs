//! routegate: an HTTP server facade over axum.
//!
//! # Architecture Overview
//!
//! ```text
//!   build_config(options)          RouteRegistry (caller-owned)
//!          │                                │
//!          ▼                                ▼
//!   ┌─────────────┐  register_routers(group, registry, middlewares)
//!   │   Server    │◀───────────────────────────────────────────────
//!   │             │
//!   │  routing ──▶ Group → Namespace (top level | /<group>)
//!   │  http    ──▶ engine bindings → axum Router + default layers
//!   │  lifecycle ─▶ start / close / shutdown / graceful_shutdown
//!   └─────────────┘
//! ```
//!
//! ```no_run
//! use axum::http::Method;
//! use routegate::{build_config, with_host, with_port, Group, Methods, RouteRegistry, Server};
//!
//! # async fn run() -> routegate::Result<()> {
//! let config = build_config([with_host("127.0.0.1"), with_port("8080")])?;
//! let mut server = Server::new(config);
//!
//! let mut registry = RouteRegistry::with_prefix("/users");
//! registry.add_router_relative("", Methods::new().with(Method::GET, || async { "all users" }));
//! server.register_routers(Group::V1, &registry, &[])?;
//!
//! server.start()?;
//! routegate::lifecycle::shutdown_signal().await;
//! server.graceful_shutdown().await
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::{
    build_config, with_config_file, with_cors, with_host, with_port, with_request_timeout,
    with_shutdown_timeout, ConfigOption, ServerConfig,
};
pub use error::{Result, ServerError};
pub use http::{BoundRoute, Server};
pub use lifecycle::LifecycleState;
pub use routing::{Group, Handler, Methods, Middleware, RouteRegistry};
