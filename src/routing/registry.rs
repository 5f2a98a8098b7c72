//! Route declarations, independent of any server.
//!
//! # Responsibilities
//! - Collect path → method-map entries in insertion order
//! - Resolve prefix-relative paths against the registry's fixed prefix
//! - Answer lookups by exact path or by loose prefix containment
//!
//! # Design Decisions
//! - No deduplication: the same path may appear in several entries
//! - The fixed prefix only affects relative additions made after it is set
//! - `entries_by_prefix_substring` is a containment check, not a true
//!   prefix check; callers read it as "entries plausibly under this prefix"

use std::collections::HashMap;

use axum::http::Method;

use crate::routing::handler::Handler;

/// Handlers of one entry, at most one per HTTP method.
#[derive(Debug, Clone, Default)]
pub struct Methods {
    handlers: HashMap<Method, Handler>,
}

impl Methods {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Methods::insert`] taking any axum handler.
    pub fn with<H, T>(mut self, method: Method, handler: H) -> Self
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        self.insert(method, Handler::new(handler));
        self
    }

    /// Set the handler for `method`, returning the one it replaced.
    pub fn insert(&mut self, method: Method, handler: Handler) -> Option<Handler> {
        self.handlers.insert(method, handler)
    }

    pub fn get(&self, method: &Method) -> Option<&Handler> {
        self.handlers.get(method)
    }

    pub fn contains(&self, method: &Method) -> bool {
        self.handlers.contains_key(method)
    }

    /// Iteration order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&Method, &Handler)> {
        self.handlers.iter()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl FromIterator<(Method, Handler)> for Methods {
    fn from_iter<I: IntoIterator<Item = (Method, Handler)>>(iter: I) -> Self {
        Self {
            handlers: iter.into_iter().collect(),
        }
    }
}

/// A declared path and its method handlers.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    path: String,
    methods: Methods,
}

impl RouteEntry {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn methods(&self) -> &Methods {
        &self.methods
    }
}

/// Ordered, caller-owned collection of route declarations.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    fixed_prefix: String,
    entries: Vec<RouteEntry>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            fixed_prefix: prefix.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry with `path` taken verbatim.
    pub fn add_router(&mut self, path: impl Into<String>, methods: Methods) -> &mut Self {
        self.entries.push(RouteEntry {
            path: path.into(),
            methods,
        });
        self
    }

    /// Append an entry under the fixed prefix.
    ///
    /// Surrounding whitespace is trimmed from `suffix`; an empty suffix
    /// registers the prefix itself.
    pub fn add_router_relative(&mut self, suffix: &str, methods: Methods) -> &mut Self {
        let suffix = suffix.trim();
        let path = if suffix.is_empty() {
            self.fixed_prefix.clone()
        } else {
            format!("{}{}", self.fixed_prefix, suffix)
        };
        self.add_router(path, methods)
    }

    /// All entries in insertion order.
    pub fn all_entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn entries_by_exact_path(&self, path: &str) -> Vec<&RouteEntry> {
        self.entries.iter().filter(|entry| entry.path == path).collect()
    }

    /// Entries whose path contains the fixed prefix anywhere.
    pub fn entries_by_prefix_substring(&self) -> Vec<&RouteEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.path.contains(self.fixed_prefix.as_str()))
            .collect()
    }

    pub fn fixed_prefix(&self) -> &str {
        &self.fixed_prefix
    }

    pub fn set_fixed_prefix(&mut self, prefix: impl Into<String>) {
        self.fixed_prefix = prefix.into();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
