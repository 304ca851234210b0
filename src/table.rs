//! # Route Manifests
//!
//! Declarative route tables loaded from YAML, JSON or TOML. The handler of each
//! route is its name, so a manifest can be checked and queried without any
//! application code.
//!
//! ```yaml
//! base_path: /api
//! routes:
//!   - method: GET
//!     path: /cupcakes/{id:[0-9]+}
//!     handler: get_cupcake
//!   - method: GET
//!     path: /assets/*
//!     handler: assets
//! ```
//!
//! The format is chosen by file extension: `.yaml`/`.yml`, `.toml`, and JSON
//! for anything else.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::router::{Method, Router, RouterBuilder};
use crate::runtime_config::RouterConfig;

/// One declared route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecl {
    /// HTTP verb; matched case-insensitively
    pub method: String,
    /// Route pattern, relative to the table's `base_path`
    pub path: String,
    /// Handler name returned by lookups
    pub handler: String,
}

/// A route manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    /// Prefix prepended to every route path
    #[serde(default)]
    pub base_path: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteDecl>,
}

/// Read and deserialize a manifest, picking the format from the extension.
pub fn load_route_table(path: &Path) -> Result<RouteTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read route table {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let table: RouteTable = match extension.as_deref() {
        Some("yaml" | "yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML route table {}", path.display()))?,
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML route table {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON route table {}", path.display()))?,
    };

    info!(
        path = %path.display(),
        routes_count = table.routes.len(),
        base_path = table.base_path.as_deref().unwrap_or(""),
        "Route table loaded"
    );
    Ok(table)
}

/// Register every route of `table` and build the router.
///
/// Stops at the first route that cannot be registered; the error names it.
pub fn build_router(table: &RouteTable) -> Result<Router<Arc<str>>> {
    build_router_with_config(table, RouterConfig::from_env())
}

pub fn build_router_with_config(
    table: &RouteTable,
    config: RouterConfig,
) -> Result<Router<Arc<str>>> {
    let mut builder = RouterBuilder::with_config(config);
    {
        let mut group = builder.group(table.base_path.as_deref().unwrap_or(""));
        for (index, decl) in table.routes.iter().enumerate() {
            let method: Method = decl
                .method
                .to_ascii_uppercase()
                .parse()
                .with_context(|| format!("Route #{index} ({} {})", decl.method, decl.path))?;
            group
                .handle(method, &decl.path, Arc::from(decl.handler.as_str()))
                .with_context(|| format!("Route #{index} ({method} {})", decl.path))?;
        }
    }
    Ok(builder.build())
}
