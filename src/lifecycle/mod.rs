//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     start() → bind on a background task → Running
//!
//! Shutdown (shutdown.rs):
//!     close()    → drop connections → Closed
//!     shutdown() → stop accepting → drain → Closed (or timeout)
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → caller triggers graceful shutdown
//! ```
//!
//! # Design Decisions
//! - State lives in a watch channel shared by the facade and the listener task
//! - Transitions only move forward; a closed server stays closed

pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod state;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
pub use state::{Lifecycle, LifecycleState};
