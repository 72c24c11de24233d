//! CLI argument parsing for dsl-exec.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dsl-exec: run DSL files through the executor core.
///
/// Locates the `executor_core` binary, hands it a DSL file, and relays its
/// output and exit code.
#[derive(Parser, Debug)]
#[command(name = "dsl-exec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML config file (default: ./dsl-exec.yaml if present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for dsl-exec.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command from a DSL file.
    ///
    /// Exits with the executor's own exit code when it fails.
    Run(RunArgs),

    /// Show where the executor core binary is looked up.
    ///
    /// Lists every candidate path in search order and which one is used.
    Locate(LocateArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// DSL file to execute. Must exist.
    #[arg(value_parser = existing_path)]
    pub dsl_file: PathBuf,

    /// Allow raw command execution.
    #[arg(long)]
    pub allow_raw: bool,

    /// Kill the executor after this many seconds (overrides config).
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Print the executor command line instead of running it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `locate` command.
#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Reject paths that do not exist before any command logic runs.
fn existing_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("Path '{}' does not exist.", value))
    }
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;
    use tempfile::TempDir;

    fn dsl_file(temp_dir: &TempDir) -> String {
        let path = temp_dir.path().join("test.dsl");
        std::fs::write(&path, "command test: target: wsl params: []").unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_run_minimal() {
        let temp_dir = TempDir::new().unwrap();
        let file = dsl_file(&temp_dir);

        let cli = Cli::try_parse_from(["dsl-exec", "run", &file]).unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.dsl_file, PathBuf::from(&file));
            assert!(!args.allow_raw);
            assert!(!args.dry_run);
            assert_eq!(args.timeout, None);
        } else {
            panic!("Expected Run command");
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_run_full() {
        let temp_dir = TempDir::new().unwrap();
        let file = dsl_file(&temp_dir);

        let cli = Cli::try_parse_from([
            "dsl-exec",
            "run",
            &file,
            "--allow-raw",
            "--timeout",
            "30",
            "--dry-run",
            "--config",
            "ci.yaml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("ci.yaml")));
        if let Command::Run(args) = cli.command {
            assert!(args.allow_raw);
            assert!(args.dry_run);
            assert_eq!(args.timeout, Some(30));
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn run_rejects_missing_dsl_file() {
        let err = Cli::try_parse_from(["dsl-exec", "run", "nonexistent_xyz_123.dsl"]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_ne!(err.exit_code(), 0);
        assert!(
            err.to_string()
                .contains("Path 'nonexistent_xyz_123.dsl' does not exist.")
        );
    }

    #[test]
    fn run_requires_dsl_file() {
        let err = Cli::try_parse_from(["dsl-exec", "run"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn run_rejects_zero_timeout() {
        let temp_dir = TempDir::new().unwrap();
        let file = dsl_file(&temp_dir);

        let result = Cli::try_parse_from(["dsl-exec", "run", &file, "--timeout", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_locate() {
        let cli = Cli::try_parse_from(["dsl-exec", "locate"]).unwrap();
        assert!(matches!(cli.command, Command::Locate(LocateArgs { json: false })));

        let cli = Cli::try_parse_from(["dsl-exec", "locate", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Locate(LocateArgs { json: true })));
    }
}
