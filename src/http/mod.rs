//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! RouteRegistry + Group
//!     → server.rs (resolve namespace, hand to engine)
//!     → engine.rs (record bindings, scope middleware)
//!     → middleware/ (request ID, trace, panics, CORS, timeout)
//!     → axum Router served by the lifecycle listener
//! ```

pub mod engine;
pub mod middleware;
pub mod request;
pub mod server;

pub use engine::{BoundRoute, Engine};
pub use request::X_REQUEST_ID;
pub use server::Server;
