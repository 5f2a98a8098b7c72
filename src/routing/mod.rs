//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Caller (per feature module)
//!     → registry.rs (RouteRegistry: path → Methods, insertion order)
//!     → Server::register_routers(group, &registry, middlewares)
//!     → group.rs (Group → Namespace: top level or /<group>)
//!     → http::engine (bind each method of each entry in the namespace)
//! ```
//!
//! # Design Decisions
//! - Registries hold no server reference and are not stored by the server
//! - Handlers and middleware are type-erased so one map can mix them
//! - Request matching itself is left to axum

pub mod group;
pub mod handler;
pub mod registry;

pub use group::{Group, Namespace, UnknownGroup};
pub use handler::{Handler, Middleware};
pub use registry::{Methods, RouteEntry, RouteRegistry};
