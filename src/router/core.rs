//! Router core: the build phase and the lookup hot path.
//!
//! Routes are registered on a [`RouterBuilder`]. [`RouterBuilder::build`]
//! consumes the builder and returns a [`Router`], which has no mutating methods
//! and can be shared freely between request threads.

// Lookups should not allocate beyond the captured values themselves.
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use arc_swap::{ArcSwap, Guard};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::error::{LookupError, RegistrationError};
use super::group::RouteGroup;
use super::method::Method;
use super::radix::{RadixNode, MAX_INLINE_PARAMS};
use super::segment::parse_pattern;
use crate::runtime_config::RouterConfig;

/// Path parameters bound by a match, in capture order.
///
/// Names are shared with the tree, so cloning them is a reference count bump;
/// values are copied out of the request path.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// A registered route, as declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub method: Method,
    pub pattern: String,
}

/// Result of successfully resolving a request path.
#[derive(Debug)]
pub struct RouteMatch<'r, H> {
    /// Handler registered for the matched pattern and method
    pub handler: &'r H,
    /// Captured placeholder values, in the order they appear in the pattern
    pub path_params: ParamVec,
    /// Remainder of the path consumed by a trailing `*`, if the pattern has one
    pub wildcard: Option<String>,
}

impl<H> RouteMatch<'_, H> {
    /// Get a path parameter by name.
    ///
    /// If a pattern repeats a name (e.g. `/org/{id}/user/{id}`), the last
    /// occurrence wins.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Wildcard capture, or `""` when the pattern has no wildcard.
    #[inline]
    #[must_use]
    pub fn wildcard(&self) -> &str {
        self.wildcard.as_deref().unwrap_or_default()
    }

    /// Convert path_params to a HashMap.
    /// Note: This allocates - use get_path_param() in hot paths instead
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Mutable route table used during application setup.
#[derive(Debug)]
pub struct RouterBuilder<H> {
    root: RadixNode<H>,
    routes: Vec<RouteEntry>,
    config: RouterConfig,
}

impl<H> Default for RouterBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouterBuilder<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            root: RadixNode::root(),
            routes: Vec::new(),
            config,
        }
    }

    /// Register `handler` for `method` requests whose path matches `pattern`.
    ///
    /// Registering the same pattern and method again replaces the handler.
    /// A malformed pattern is rejected before the tree is modified.
    pub fn insert(
        &mut self,
        pattern: &str,
        method: Method,
        handler: H,
    ) -> Result<(), RegistrationError> {
        let segments = parse_pattern(pattern)?;
        let replaced = self.root.insert(segments, method, handler);

        if replaced.is_some() {
            warn!(
                method = %method,
                pattern = %pattern,
                "Route registered twice, keeping the latest handler"
            );
        } else {
            debug!(method = %method, pattern = %pattern, "Route registered");
            self.routes.push(RouteEntry {
                method,
                pattern: pattern.to_string(),
            });
        }
        Ok(())
    }

    /// Start a group of routes sharing a path prefix.
    pub fn group(&mut self, prefix: &str) -> RouteGroup<'_, H> {
        RouteGroup::new(self, prefix)
    }

    /// Routes registered so far.
    #[must_use]
    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    /// Number of nodes in the tree, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Freeze the table for lookups.
    #[must_use]
    pub fn build(self) -> Router<H> {
        let routes_summary: Vec<String> = self
            .routes
            .iter()
            .take(10)
            .map(|r| format!("{} {}", r.method, r.pattern))
            .collect();

        info!(
            routes_count = self.routes.len(),
            node_count = self.root.node_count(),
            routes_summary = ?routes_summary,
            "Routing table built"
        );

        Router {
            root: self.root,
            routes: self.routes,
            config: self.config,
        }
    }
}

/// Immutable routing table.
///
/// Lookups only read the tree, so a `Router<H>` is `Send + Sync` whenever `H` is.
#[derive(Debug)]
pub struct Router<H> {
    root: RadixNode<H>,
    routes: Vec<RouteEntry>,
    config: RouterConfig,
}

impl<H> Router<H> {
    /// Shorthand for [`RouterBuilder::new`].
    #[must_use]
    pub fn builder() -> RouterBuilder<H> {
        RouterBuilder::new()
    }

    /// Resolve a request path for `method`.
    ///
    /// Fails with [`LookupError::MethodNotAllowed`] when the path matches some
    /// pattern only under other methods, and [`LookupError::NotFound`] otherwise.
    pub fn resolve(&self, path: &str, method: Method) -> Result<RouteMatch<'_, H>, LookupError> {
        let started = self.config.slow_match_threshold.map(|_| Instant::now());

        let result = self.root.lookup(path, method).map(|found| {
            debug_assert_eq!(
                found.endpoint.param_keys.len(),
                found.captures.len(),
                "parameter names and captured values disagree for {path}"
            );
            let path_params: ParamVec = found
                .endpoint
                .param_keys
                .iter()
                .zip(&found.captures)
                .map(|(key, &(start, end))| {
                    (Arc::clone(key), path.get(start..end).unwrap_or_default().to_owned())
                })
                .collect();
            let wildcard = found
                .wildcard
                .map(|start| path.get(start..).unwrap_or_default().to_owned());
            RouteMatch {
                handler: &found.endpoint.handler,
                path_params,
                wildcard,
            }
        });

        if let (Some(started), Some(threshold)) = (started, self.config.slow_match_threshold) {
            let elapsed = started.elapsed();
            if elapsed > threshold {
                warn!(
                    method = %method,
                    path = %path,
                    duration_us = elapsed.as_micros(),
                    "Slow route matching detected"
                );
            }
        }

        match &result {
            Ok(matched) => debug!(
                method = %method,
                path = %path,
                path_params = ?matched.path_params,
                wildcard = ?matched.wildcard,
                "Route matched"
            ),
            Err(err) => debug!(method = %method, path = %path, outcome = %err, "No route matched"),
        }

        result
    }

    /// Resolve using the transport's method type.
    ///
    /// Verbs the router does not dispatch on are answered with
    /// [`LookupError::MethodNotAllowed`].
    pub fn route(
        &self,
        method: &http::Method,
        path: &str,
    ) -> Result<RouteMatch<'_, H>, LookupError> {
        match Method::try_from(method) {
            Ok(method) => self.resolve(path, method),
            Err(_) => {
                debug!(method = %method, path = %path, "Unsupported method");
                Err(LookupError::MethodNotAllowed)
            }
        }
    }

    /// Registered routes, in registration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    /// Number of nodes in the tree, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Indented text rendering of the tree, one node per line.
    #[must_use]
    pub fn dump_tree(&self) -> String {
        TreeDump(&self.root).to_string()
    }
}

struct TreeDump<'a, H>(&'a RadixNode<H>);

impl<H> fmt::Display for TreeDump<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_tree(f, 0)
    }
}

/// A router that can be replaced while requests are being served.
///
/// Readers take a snapshot with [`SharedRouter::load`] and keep using it for
/// the whole request; [`SharedRouter::replace`] publishes a new table without
/// blocking them.
#[derive(Debug)]
pub struct SharedRouter<H> {
    current: ArcSwap<Router<H>>,
}

impl<H> SharedRouter<H> {
    #[must_use]
    pub fn new(router: Router<H>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
        }
    }

    /// Snapshot of the current router.
    #[must_use]
    pub fn load(&self) -> Guard<Arc<Router<H>>> {
        self.current.load()
    }

    /// Publish `router`, returning the one it replaced.
    pub fn replace(&self, router: Router<H>) -> Arc<Router<H>> {
        let previous = self.current.swap(Arc::new(router));
        info!(
            routes_count = self.current.load().routes().len(),
            previous_routes_count = previous.routes().len(),
            "Routing table replaced"
        );
        previous
    }
}
