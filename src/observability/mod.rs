//! Observability subsystem.
//!
//! Structured logging through `tracing`. Request IDs from the HTTP
//! middleware are attached to the per-request trace spans.

pub mod logging;

pub use logging::init_logging;
