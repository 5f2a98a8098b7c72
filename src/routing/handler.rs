//! Type-erased handlers and middleware.
//!
//! Route declarations mix handlers of different concrete types inside one
//! method map, so both capabilities are boxed behind an `Arc` and rebuilt
//! into axum services only when the router is materialised.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::Request,
    handler::Handler as AxumHandler,
    middleware::{from_fn, Next},
    response::{IntoResponse, Response},
    routing::{on, MethodFilter, MethodRouter},
    Router,
};
use futures_util::future::{BoxFuture, FutureExt};

type HandlerFn = dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync;
type MiddlewareFn = dyn Fn(Request, Next) -> BoxFuture<'static, Response> + Send + Sync;

/// A request handler. Accepts any axum handler without state.
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    pub fn new<H, T>(handler: H) -> Self
    where
        H: AxumHandler<T, ()>,
        T: 'static,
    {
        Self(Arc::new(move |request: Request| {
            handler.clone().call(request, ()).boxed()
        }))
    }

    /// Run the handler against a request.
    pub fn call(&self, request: Request) -> BoxFuture<'static, Response> {
        (self.0)(request)
    }

    pub(crate) fn method_router(&self, filter: MethodFilter) -> MethodRouter {
        let handler = self.clone();
        on(filter, move |request: Request| handler.call(request))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler")
    }
}

/// Middleware wrapping a namespace's handling pipeline.
///
/// Same shape as `axum::middleware::from_fn`: it receives the request and
/// the rest of the pipeline.
#[derive(Clone)]
pub struct Middleware(Arc<MiddlewareFn>);

impl Middleware {
    pub fn from_fn<F, Fut, Out>(f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Out> + Send + 'static,
        Out: IntoResponse + 'static,
    {
        Self(Arc::new(move |request: Request, next: Next| {
            f(request, next).map(IntoResponse::into_response).boxed()
        }))
    }

    pub fn call(&self, request: Request, next: Next) -> BoxFuture<'static, Response> {
        (self.0)(request, next)
    }

    pub(crate) fn wrap_router(&self, router: Router) -> Router {
        let middleware = self.clone();
        router.layer(from_fn(move |request: Request, next: Next| {
            middleware.call(request, next)
        }))
    }

    pub(crate) fn wrap_method_router(&self, method_router: MethodRouter) -> MethodRouter {
        let middleware = self.clone();
        method_router.layer(from_fn(move |request: Request, next: Next| {
            middleware.call(request, next)
        }))
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Middleware")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn handler_call_runs_the_wrapped_handler() {
        let handler = Handler::new(|| async { (StatusCode::CREATED, "made") });

        let response = handler.call(Request::new(Body::empty())).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"made");
    }

    #[tokio::test]
    async fn middleware_wraps_router() {
        let router = Router::new().route("/", axum::routing::get(|| async { "inner" }));
        let tag = Middleware::from_fn(|request: Request, next: Next| async move {
            let mut response = next.run(request).await;
            response
                .headers_mut()
                .insert("x-tag", "outer".parse().unwrap());
            response
        });

        let response = tag
            .wrap_router(router)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.headers()["x-tag"], "outer");
    }

    #[tokio::test]
    async fn middleware_can_short_circuit() {
        let deny = Middleware::from_fn(|_request: Request, _next: Next| async {
            StatusCode::FORBIDDEN
        });
        let method_router = Handler::new(|| async { "never" }).method_router(MethodFilter::GET);
        let router = Router::new().route("/", deny.wrap_method_router(method_router));

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
