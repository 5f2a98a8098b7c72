//! Registration engine.
//!
//! # Responsibilities
//! - Hold the top-level middleware stack
//! - Bind every method of every registry entry inside a namespace
//! - Materialise the bindings into one axum `Router`
//!
//! # Design Decisions
//! - Bindings are recorded, not installed: axum panics on overlapping
//!   routes, so the table resolves duplicates first (last one wins) and
//!   rejects paths that differ only in parameter names
//! - Group routes are flattened to `/<group><path>`; each binding carries
//!   the middleware of the call that registered it. Top-level middleware
//!   wraps the whole router
//! - The first middleware supplied is the outermost
//! - Unknown methods are skipped without error

use std::sync::Arc;

use axum::{
    http::Method,
    routing::{MethodFilter, MethodRouter},
    Router,
};
use serde::Serialize;

use crate::error::{Result, ServerError};
use crate::routing::{Group, Handler, Middleware, Namespace, RouteEntry, RouteRegistry};

/// A `(method, path)` pair installed in the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundRoute {
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    /// Full path, including the group mount segment.
    pub path: String,
    pub group: Group,
}

fn serialize_method<S: serde::Serializer>(method: &Method, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(method.as_str())
}

#[derive(Debug, Clone)]
struct Binding {
    route: BoundRoute,
    filter: MethodFilter,
    handler: Handler,
    /// Group middleware of the registering call, outermost first.
    middlewares: Arc<[Middleware]>,
}

/// Binding table shared by all namespaces of one server.
#[derive(Debug, Default)]
pub struct Engine {
    top_level: Vec<Middleware>,
    bindings: Vec<Binding>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `middlewares` to `namespace`, then bind every entry of
    /// `registry` inside it.
    ///
    /// Top-level middleware wraps every route. Grouped middleware wraps only
    /// the routes bound by this call.
    ///
    /// Nothing is applied or bound if the namespace cannot be mounted, a
    /// path is invalid, or a path conflicts with one already bound.
    pub fn register(
        &mut self,
        namespace: Namespace,
        registry: &RouteRegistry,
        middlewares: &[Middleware],
    ) -> Result<()> {
        let (group, prefix) = match namespace {
            Namespace::TopLevel => (Group::Root, String::new()),
            Namespace::Grouped(group) => match group.mount_path() {
                Some(mount) => (group, mount),
                None => return Err(ServerError::UnsupportedEngineType { group }),
            },
        };

        for entry in registry.all_entries() {
            validate_path(entry.path(), !prefix.is_empty())?;
        }
        self.check_conflicts(&prefix, registry)?;

        let scoped: Arc<[Middleware]> = match namespace {
            Namespace::TopLevel => {
                self.top_level.extend(middlewares.iter().cloned());
                Arc::from(Vec::new())
            }
            Namespace::Grouped(_) => Arc::from(middlewares.to_vec()),
        };

        let mut bound = 0usize;
        for entry in registry.all_entries() {
            let path = format!("{}{}", prefix, entry.path());
            for (method, handler) in entry.methods().iter() {
                let Ok(filter) = MethodFilter::try_from(method.clone()) else {
                    tracing::debug!(%method, path = %path, "Skipping unsupported HTTP method");
                    continue;
                };
                self.bind(Binding {
                    route: BoundRoute {
                        method: method.clone(),
                        path: path.clone(),
                        group,
                    },
                    filter,
                    handler: handler.clone(),
                    middlewares: scoped.clone(),
                });
                bound += 1;
            }
        }

        tracing::debug!(
            group = %group,
            entries = registry.len(),
            bindings = bound,
            middlewares = middlewares.len(),
            "Routes registered"
        );
        Ok(())
    }

    /// Reject full paths the router would refuse next to the paths already
    /// bound or earlier in `registry`.
    fn check_conflicts(&self, prefix: &str, registry: &RouteRegistry) -> Result<()> {
        let incoming: Vec<String> = registry
            .all_entries()
            .iter()
            .filter(|entry| has_routable_method(entry))
            .map(|entry| format!("{}{}", prefix, entry.path()))
            .collect();

        let mut known: Vec<&str> = self.bindings.iter().map(|b| b.route.path.as_str()).collect();
        for path in &incoming {
            let shape = route_shape(path);
            if let Some(existing) = known
                .iter()
                .copied()
                .find(|other| *other != path.as_str() && route_shape(other) == shape)
            {
                tracing::debug!(path = %path, existing = %existing, "Conflicting route path");
                return Err(ServerError::InvalidRoutePath {
                    path: path.clone(),
                    reason: "conflicts with a bound path that differs only in parameter names",
                });
            }
            known.push(path.as_str());
        }
        Ok(())
    }

    fn bind(&mut self, binding: Binding) {
        let existing = self.bindings.iter_mut().find(|b| {
            b.route.path == binding.route.path && b.route.method == binding.route.method
        });

        match existing {
            Some(slot) => {
                tracing::debug!(
                    method = %binding.route.method,
                    path = %binding.route.path,
                    "Replacing existing binding"
                );
                *slot = binding;
            }
            None => self.bindings.push(binding),
        }
    }

    /// Bound routes in binding order.
    pub fn routes(&self) -> Vec<BoundRoute> {
        self.bindings.iter().map(|b| b.route.clone()).collect()
    }

    /// Build the axum router for the current bindings.
    pub fn router(&self) -> Router {
        let mut paths: Vec<(&str, MethodRouter)> = Vec::new();

        for binding in &self.bindings {
            let mut method_router = binding.handler.method_router(binding.filter);
            for middleware in binding.middlewares.iter().rev() {
                method_router = middleware.wrap_method_router(method_router);
            }

            let path = binding.route.path.as_str();
            match paths.iter().position(|(p, _)| *p == path) {
                Some(index) => {
                    let merged = paths[index].1.clone().merge(method_router);
                    paths[index].1 = merged;
                }
                None => paths.push((path, method_router)),
            }
        }

        let mut router = paths
            .into_iter()
            .fold(Router::new(), |router, (path, method_router)| router.route(path, method_router));

        for middleware in self.top_level.iter().rev() {
            router = middleware.wrap_router(router);
        }
        router
    }
}

fn has_routable_method(entry: &RouteEntry) -> bool {
    entry
        .methods()
        .iter()
        .any(|(method, _)| MethodFilter::try_from(method.clone()).is_ok())
}

/// `path` with parameter names erased: `/users/{id}` becomes `/users/{}`,
/// `/files/{*rest}` becomes `/files/{*}`.
fn route_shape(path: &str) -> String {
    let mut shape = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        shape.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('}') else {
            rest = &rest[open..];
            break;
        };
        let name = &rest[open + 1..open + close];
        shape.push_str(if name.starts_with('*') { "{*}" } else { "{}" });
        rest = &rest[open + close + 1..];
    }
    shape.push_str(rest);
    shape
}

/// Reject paths axum would panic on when the router is built.
fn validate_path(path: &str, grouped: bool) -> Result<()> {
    let invalid = |reason| {
        Err(ServerError::InvalidRoutePath {
            path: path.to_string(),
            reason,
        })
    };

    if path.is_empty() {
        return if grouped { Ok(()) } else { invalid("path must not be empty") };
    }
    if !path.starts_with('/') {
        return invalid("path must start with `/`");
    }
    if path.split('/').any(|segment| segment.starts_with(':')) {
        return invalid("use `{name}` for parameters, not `:name`");
    }
    if path.split('/').any(|segment| segment.starts_with('*')) {
        return invalid("use `{*name}` for wildcards, not `*name`");
    }
    Ok(())
}
