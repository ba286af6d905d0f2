//! Resource gate checker
//!
//! Loads a resource gate configuration the way a host server would and prints
//! the redirect and authentication decision for each given path.
//!
//! ```bash
//! resource-gate-check --config config.yaml --user alice /admin/users /login /site.css
//! APP__RESOURCE_AUTH__OMIT_REDIRECT=true resource-gate-check -c config.yaml --json /
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod report;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use resource_gate::{InMemoryUserDirectory, ResourceAuthConfig, ResourceAuthorizer};
use tracing_subscriber::EnvFilter;

/// Evaluate request paths against a resource gate configuration
#[derive(Parser, Debug)]
#[command(name = "resource-gate-check")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Config key holding the gate section
    #[arg(long, default_value = "resource_auth")]
    section: String,

    /// Registered user (repeatable). With no users, nothing requires authentication.
    #[arg(long = "user", short = 'u', action = clap::ArgAction::Append)]
    users: Vec<String>,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Print effective gate configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Request paths to evaluate
    #[arg(value_name = "PATH")]
    paths: Vec<String>,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// defaults -> YAML (if provided) -> env (APP__*)
fn layered_config(path: Option<&Path>) -> Result<Figment> {
    let mut figment = Figment::new();
    if let Some(path) = path {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
        figment = figment.merge(Yaml::file(path));
    }
    Ok(figment.merge(Env::prefixed("APP__").split("__")))
}

fn build_gate(config: &ResourceAuthConfig, users: &[String]) -> ResourceAuthorizer {
    let users = users.iter().cloned().collect::<InMemoryUserDirectory>();
    ResourceAuthorizer::from_config(config, Arc::new(users))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let figment = layered_config(cli.config.as_deref())?;
    let config = ResourceAuthConfig::from_figment_at(&figment, &cli.section)
        .with_context(|| format!("invalid `{}` section", cli.section))?;

    let gate = build_gate(&config, &cli.users);

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&gate.snapshot())?);
        return Ok(());
    }

    let reports = report::evaluate_paths(&gate, &cli.paths);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}", report.to_line());
        }
    }

    tracing::info!(paths = reports.len(), "Resource gate check finished");
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_cli_parses_repeated_users() {
        let cli = Cli::try_parse_from([
            "resource-gate-check",
            "-u",
            "alice",
            "--user",
            "bob",
            "-vv",
            "/a",
            "/b",
        ])
        .unwrap();
        assert_eq!(cli.users, vec!["alice", "bob"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.section, "resource_auth");
        assert_eq!(cli.paths, vec!["/a", "/b"]);
    }

    #[test]
    fn test_build_gate_registers_cli_users() {
        let config = ResourceAuthConfig {
            restrict: vec!["/admin".to_owned()],
            ..ResourceAuthConfig::default()
        };

        let open = build_gate(&config, &[]);
        assert!(!open.needs_authentication("/admin"));

        let guarded = build_gate(&config, &["alice".to_owned()]);
        assert!(guarded.needs_authentication("/admin"));
        assert!(!guarded.needs_authentication("/home"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = layered_config(Some(Path::new("/nonexistent/gate.yaml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_layered_config_reads_section() {
        Jail::expect_with(|jail| {
            jail.create_file("gate.yaml", "gate:\n  restrict: [\"/admin\"]\n")?;
            jail.set_env("APP__GATE__OMIT_REDIRECT", "true");

            let figment = layered_config(Some(Path::new("gate.yaml"))).unwrap();
            let config = ResourceAuthConfig::from_figment_at(&figment, "gate").unwrap();
            assert!(config.omit_redirect);
            assert_eq!(config.restrict, vec!["/admin"]);
            Ok(())
        });
    }
}
