//! # Router Module
//!
//! Path matching and route resolution for cupcake.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Parsing route patterns into typed segments
//! - Building a radix tree from `(pattern, method, handler)` registrations
//! - Resolving an incoming `(path, method)` pair to its handler
//! - Extracting named and wildcard path values
//!
//! ## Pattern Syntax
//!
//! | Pattern            | Matches                                         |
//! |--------------------|-------------------------------------------------|
//! | `/cupcakes`        | itself                                          |
//! | `/cupcakes/{id}`   | one path segment, bound to `id`                 |
//! | `/f/{name:[a-z]+}.json` | text up to `.` that fully matches `[a-z]+` |
//! | `/assets/*`        | everything after `/assets/`                     |
//!
//! `{name}` must be followed by `/` or end the pattern, and `*` must be the last
//! character. Anything else is rejected with a [`RegistrationError`].
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Registration**: routes are inserted into a [`RouterBuilder`]. Static text
//!    is compressed into shared prefixes, splitting nodes as needed.
//!
//! 2. **Matching**: [`RouterBuilder::build`] freezes the tree into a [`Router`].
//!    Each lookup walks the tree once, trying static children first, then regex
//!    placeholders, plain placeholders and finally a wildcard, backtracking when
//!    a branch dead-ends.
//!
//! At one position, regex placeholders are always tried before plain ones,
//! whatever the registration order. Among placeholders of the same kind, the
//! one registered first is tried first.
//!
//! ## Example
//!
//! ```rust
//! use cupcake::router::{LookupError, Method, Router};
//!
//! let mut builder = Router::builder();
//! builder.insert("/cupcake/{id:[0-9]+}", Method::Get, "by_id").unwrap();
//! builder.insert("/cupcake/{name}", Method::Get, "by_name").unwrap();
//! let router = builder.build();
//!
//! let matched = router.resolve("/cupcake/42", Method::Get).unwrap();
//! assert_eq!(*matched.handler, "by_id");
//! assert_eq!(matched.get_path_param("id"), Some("42"));
//!
//! assert_eq!(
//!     router.resolve("/cupcake/42", Method::Post).unwrap_err(),
//!     LookupError::MethodNotAllowed
//! );
//! ```

mod core;
mod endpoint;
mod error;
mod group;
mod method;
mod radix;
mod segment;
#[cfg(test)]
mod performance_tests;

pub use self::core::{ParamVec, RouteEntry, RouteMatch, Router, RouterBuilder, SharedRouter};
pub use error::{LookupError, RegistrationError};
pub use group::{Resource, RouteGroup};
pub use method::Method;
pub use radix::MAX_INLINE_PARAMS;
