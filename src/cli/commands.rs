use crate::router::{Method, Router};
use crate::table::{build_router, load_route_table};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Command-line interface for cupcake
///
/// Validates route manifests and answers lookups against them.
#[derive(Debug, Parser)]
#[command(name = "cupcake")]
#[command(about = "cupcake route table tool", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register every route of a manifest and report the result
    Check {
        /// Route manifest (YAML, JSON or TOML)
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Resolve a request path against a manifest
    Resolve {
        /// Route manifest (YAML, JSON or TOML)
        #[arg(short, long)]
        routes: PathBuf,

        /// HTTP verb of the request
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path, e.g. /api/cupcakes/42
        path: String,
    },
    /// Print the routing tree built from a manifest
    Dump {
        /// Route manifest (YAML, JSON or TOML)
        #[arg(short, long)]
        routes: PathBuf,
    },
}

/// Parse the process arguments and run the selected command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    run_command(&cli.command, &mut stdout.lock())
}

/// Run `command`, writing its report to `out`.
///
/// Registration failures and unmatched lookups are returned as errors so the
/// binary exits non-zero.
pub fn run_command<W: Write>(command: &Commands, out: &mut W) -> Result<()> {
    match command {
        Commands::Check { routes } => {
            let router = load_router(routes)?;
            writeln!(
                out,
                "{}: {} routes, {} nodes",
                routes.display(),
                router.routes().len(),
                router.node_count()
            )?;
            for entry in router.routes() {
                writeln!(out, "  {:<6} {}", entry.method, entry.pattern)?;
            }
            Ok(())
        }
        Commands::Resolve {
            routes,
            method,
            path,
        } => {
            let router = load_router(routes)?;
            let method: Method = method
                .to_ascii_uppercase()
                .parse()
                .context("Unsupported --method")?;
            let matched = router
                .resolve(path, method)
                .with_context(|| format!("{method} {path}"))?;

            writeln!(out, "{method} {path} -> {}", matched.handler)?;
            for (name, value) in &matched.path_params {
                writeln!(out, "  {name} = {value}")?;
            }
            if let Some(rest) = &matched.wildcard {
                writeln!(out, "  * = {rest}")?;
            }
            Ok(())
        }
        Commands::Dump { routes } => {
            let router = load_router(routes)?;
            write!(out, "{}", router.dump_tree())?;
            Ok(())
        }
    }
}

fn load_router(path: &Path) -> Result<Router<Arc<str>>> {
    let table = load_route_table(path)?;
    build_router(&table).with_context(|| format!("Invalid route table {}", path.display()))
}
