//! Default middleware installed on every server.
//!
//! Outermost first:
//! ```text
//! SetRequestId → Trace → PropagateRequestId → CatchPanic → Cors → Timeout
//!     → top-level user middleware → group middleware → handler
//! ```

use std::time::Duration;

use axum::{http::Method, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};

/// Wrap `router` with the default stack for `config`.
#[allow(deprecated)]
pub fn apply_defaults(router: Router, config: &ServerConfig) -> Router {
    let router = router.layer(TimeoutLayer::new(config.request_timeout()));
    let router = if config.cors() {
        router.layer(cors_layer())
    } else {
        router
    };
    router
        .layer(CatchPanicLayer::new())
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
}

/// Any origin, the common verbs.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .max_age(Duration::from_secs(3600))
}
