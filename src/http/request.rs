//! Request identification.
//!
//! # Responsibilities
//! - Generate a UUID v4 request ID when the client did not send one
//! - Expose the header name shared by the set and propagate layers
//!
//! # Design Decisions
//! - An incoming `x-request-id` is kept as is
//! - The ID is added as early as possible so trace spans can carry it

use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Produces a fresh UUID v4 for every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(id))
    }
}
