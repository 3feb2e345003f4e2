//! Seedkeeper — station binding and archive maintenance CLI.
//!
//! # Usage
//!
//! ```text
//! seedkeeper update-bindings --address <host> --process <name> --mask-file <path>
//!     [--key-dir <path>] [--seiscomp-tool <path>] [--slink-tool <path>]
//!     [--command-timeout <secs>] [--on-rollback-failure abort|continue] [--json]
//! seedkeeper backfill --source-dir <path> --sds-root <path> --date <YYYY-MM-DD>
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{backfill::BackfillArgs, update_bindings::UpdateBindingsArgs};
use seedkeeper_bindings::RollbackFailure;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "seedkeeper",
    version,
    about = "Reconcile station key bindings and backfill the SDS archive",
    long_about = None,
)]
struct Cli {
    /// Log filter (env-filter syntax, e.g. `debug`); RUST_LOG applies when unset.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile acquisition-server stations against key binding files.
    UpdateBindings(UpdateBindingsArgs),

    /// Copy one day of archive files into the SDS tree.
    Backfill(BackfillArgs),
}

// ---------------------------------------------------------------------------
// Shared RollbackFailure argument — parsed from CLI strings
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse [`RollbackFailure`] from CLI args.
#[derive(Debug, Clone, Default)]
pub struct RollbackFailureArg(pub RollbackFailure);

impl FromStr for RollbackFailureArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(Self(RollbackFailure::Abort)),
            "continue" => Ok(Self(RollbackFailure::Continue)),
            other => Err(format!(
                "unknown rollback-failure policy '{other}'; expected: abort, continue"
            )),
        }
    }
}

impl fmt::Display for RollbackFailureArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            RollbackFailure::Abort => write!(f, "abort"),
            RollbackFailure::Continue => write!(f, "continue"),
        }
    }
}

impl From<RollbackFailureArg> for RollbackFailure {
    fn from(p: RollbackFailureArg) -> Self {
        p.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());
    match cli.command {
        Commands::UpdateBindings(args) => args.run(),
        Commands::Backfill(args) => args.run(),
    }
}

fn init_tracing(level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    // Logs go to stderr so `--json` output stays parseable.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
