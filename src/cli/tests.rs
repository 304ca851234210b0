//! Unit tests for CLI commands

use crate::cli::{run_command, Cli, Commands};
use clap::Parser;
use std::io::Write;
use tempfile::NamedTempFile;

const MANIFEST: &str = "\
base_path: /api
routes:
  - method: GET
    path: /cupcakes/{id:[0-9]+}
    handler: get_cupcake
  - method: POST
    path: /cupcakes
    handler: create_cupcake
  - method: GET
    path: /assets/*
    handler: assets
";

fn manifest(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    run_command(&cli.command, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_resolve_command_parses() {
    let cli = Cli::try_parse_from(["cupcake", "resolve", "--routes", "r.yaml", "/a/b"]).unwrap();
    match cli.command {
        Commands::Resolve {
            routes,
            method,
            path,
        } => {
            assert_eq!(routes.to_string_lossy(), "r.yaml");
            assert_eq!(method, "GET");
            assert_eq!(path, "/a/b");
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["cupcake", "check", "--routes", "r.yaml"],
        vec!["cupcake", "dump", "-r", "r.json"],
        vec!["cupcake", "resolve", "-r", "r.toml", "-m", "POST", "/x"],
    ];
    for args in commands {
        assert!(Cli::try_parse_from(&args).is_ok(), "failed to parse {args:?}");
    }
    assert!(Cli::try_parse_from(["cupcake", "check"]).is_err());
}

#[test]
fn test_check_lists_routes() {
    let file = manifest(MANIFEST);
    let path = file.path().to_str().unwrap();
    let out = run(&["cupcake", "check", "--routes", path]).unwrap();
    assert!(out.contains("3 routes"), "{out}");
    assert!(out.contains("/api/cupcakes/{id:[0-9]+}"), "{out}");
    assert!(out.contains("  GET    /api/cupcakes/{id:[0-9]+}\n"), "{out}");
    assert!(out.contains("  POST   /api/cupcakes\n"), "{out}");
}

#[test]
fn test_check_fails_on_bad_pattern() {
    let file = manifest("routes:\n  - method: GET\n    path: /a/*/b\n    handler: bad\n");
    let path = file.path().to_str().unwrap();
    let err = run(&["cupcake", "check", "--routes", path]).unwrap_err();
    assert!(format!("{err:#}").contains("/a/*/b"));
}

#[test]
fn test_resolve_prints_captures() {
    let file = manifest(MANIFEST);
    let path = file.path().to_str().unwrap();

    let out = run(&["cupcake", "resolve", "--routes", path, "/api/cupcakes/42"]).unwrap();
    assert_eq!(out, "GET /api/cupcakes/42 -> get_cupcake\n  id = 42\n");

    let out = run(&["cupcake", "resolve", "--routes", path, "/api/assets/css/a.css"]).unwrap();
    assert_eq!(out, "GET /api/assets/css/a.css -> assets\n  * = css/a.css\n");
}

#[test]
fn test_resolve_reports_lookup_failures() {
    let file = manifest(MANIFEST);
    let path = file.path().to_str().unwrap();

    let err = run(&["cupcake", "resolve", "-r", path, "-m", "delete", "/api/cupcakes"]).unwrap_err();
    assert!(format!("{err:#}").contains("405"));

    let err = run(&["cupcake", "resolve", "-r", path, "/api/cupcakes/lemon"]).unwrap_err();
    assert!(format!("{err:#}").contains("404"));
}

#[test]
fn test_dump_prints_tree() {
    let file = manifest(MANIFEST);
    let path = file.path().to_str().unwrap();
    let out = run(&["cupcake", "dump", "--routes", path]).unwrap();
    assert!(out.starts_with("<root>"), "{out}");
    assert!(out.contains("{id:[0-9]+}"), "{out}");
    assert!(out.contains("-> GET"), "{out}");
}
