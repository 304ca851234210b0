//! # CLI Module
//!
//! Command-line access to route manifests (see [`crate::table`]).
//!
//! ## Commands
//!
//! ### `check`
//!
//! Register every route and list them, failing on the first bad pattern:
//!
//! ```bash
//! cupcake check --routes routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! Look up a request path and print the handler and captured values:
//!
//! ```bash
//! cupcake resolve --routes routes.yaml --method GET /api/cupcakes/42
//! ```
//!
//! ### `dump`
//!
//! Print the routing tree, one node per line:
//!
//! ```bash
//! cupcake dump --routes routes.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use cupcake::cli::{Cli, run_command};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run_command(&cli.command, &mut std::io::stdout())?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, run_command, Cli, Commands};
