//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! ServerParams::default()
//!     → options.rs (each ConfigOption mutates the draft, in order)
//!         ↳ loader.rs (with_config_file: TOML overlay)
//!     → first failure aborts, draft dropped
//!     → ServerConfig (frozen, getters only)
//!     → consumed by Server::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once built
//! - Host and port are not validated here; a bad endpoint fails at start
//! - Options compose: a group of options is itself an option

pub mod loader;
pub mod options;
pub mod schema;

pub use loader::{ConfigError, FileConfig};
pub use options::{
    build_config, compose, with_config_file, with_cors, with_host, with_port,
    with_request_timeout, with_shutdown_timeout, ConfigOption,
};
pub use schema::{ServerConfig, ServerParams, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SHUTDOWN_TIMEOUT};
