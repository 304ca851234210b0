//! # cupcake
//!
//! **cupcake** is a radix-tree HTTP path router. It maps a request path and
//! method to a handler, extracting named placeholder values and wildcard tails
//! along the way.
//!
//! ## Overview
//!
//! Routes are declared with a small pattern language (`/cupcakes/{id}`,
//! `/f/{name:[a-z]+}.json`, `/assets/*`) on a
//! [`RouterBuilder`](router::RouterBuilder). Building produces an immutable
//! [`Router`](router::Router) that can be shared across threads and answers
//! each lookup in a single walk over the tree.
//!
//! ## Architecture
//!
//! - **[`router`]** - Pattern parsing, the radix tree, and route resolution
//! - **[`table`]** - Route manifests in YAML, JSON or TOML
//! - **[`runtime_config`]** - Environment-driven router settings
//! - **[`logging`]** - `tracing` subscriber setup for binaries
//! - **[`cli`]** - The `cupcake` command-line tool
//!
//! ### Lookup Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App
//!     participant Router
//!     participant Tree as RadixNode
//!
//!     App->>Router: resolve("/cupcake/42", GET)
//!     Router->>Tree: lookup(path, method)
//!     Tree->>Tree: static children
//!     Tree->>Tree: regex placeholders
//!     Tree->>Tree: plain placeholders
//!     Tree->>Tree: wildcard
//!     Tree-->>Router: endpoint + capture spans
//!     Router-->>App: RouteMatch { handler, path_params, wildcard }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use cupcake::router::{Method, Router};
//!
//! let mut builder = Router::builder();
//! builder.insert("/cupcake/{id:[0-9]+}", Method::Get, "get_cupcake").unwrap();
//! builder.insert("/assets/*", Method::Get, "assets").unwrap();
//! let router = builder.build();
//!
//! let matched = router.resolve("/assets/css/app.css", Method::Get).unwrap();
//! assert_eq!(*matched.handler, "assets");
//! assert_eq!(matched.wildcard(), "css/app.css");
//! ```
//!
//! ## Logging
//!
//! The library emits `tracing` events: `info` when a table is built or
//! replaced, `debug` for each lookup, and `warn` for slow lookups and duplicate
//! registrations. Install a subscriber with
//! [`logging::init_logging_with_config`] or your own.

pub mod cli;
pub mod logging;
pub mod router;
pub mod runtime_config;
pub mod table;
