//! Structured logging.
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the default directive
//! - Initialising twice is a no-op, so tests and embedders can both call it

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for the `routegate` binary.
pub const DEFAULT_DIRECTIVE: &str = "routegate=info,tower_http=debug";

/// Install a global fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive`.
///
/// Returns `false` if a global subscriber was already set.
pub fn init_logging(default_directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
