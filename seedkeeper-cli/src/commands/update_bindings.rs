//! `seedkeeper update-bindings` — reconcile station key bindings.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use seedkeeper_bindings::{
    pipeline::{self, UpdateConfig},
    ReconcileSummary,
};

use crate::RollbackFailureArg;

/// Arguments for `seedkeeper update-bindings`.
#[derive(Args, Debug)]
pub struct UpdateBindingsArgs {
    /// Address of the acquisition server to list streams from.
    #[arg(long)]
    pub address: String,

    /// Name of the archiving daemon process the bindings point at.
    #[arg(long)]
    pub process: String,

    /// Path to the file holding the masked station list.
    #[arg(long)]
    pub mask_file: PathBuf,

    /// Key binding directory (defaults to ~/seiscomp/etc/key).
    #[arg(long)]
    pub key_dir: Option<PathBuf>,

    /// Control tool invoked for update-config / restart / status.
    #[arg(long, default_value = "seiscomp")]
    pub seiscomp_tool: PathBuf,

    /// Listing tool invoked to query the acquisition server.
    #[arg(long, default_value = "slinktool")]
    pub slink_tool: PathBuf,

    /// Timeout in seconds applied to every external command.
    #[arg(long, default_value_t = 30)]
    pub command_timeout: u64,

    /// Policy when the rollback restart fails verification.
    #[arg(long, default_value_t = RollbackFailureArg::default())]
    pub on_rollback_failure: RollbackFailureArg,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl UpdateBindingsArgs {
    pub fn run(self) -> Result<()> {
        let key_dir = match self.key_dir {
            Some(dir) => dir,
            None => dirs::home_dir()
                .context("could not determine home directory")?
                .join("seiscomp")
                .join("etc")
                .join("key"),
        };

        let config = UpdateConfig {
            address: self.address,
            process: self.process.clone(),
            mask_file: self.mask_file,
            key_dir,
            slink_tool: self.slink_tool,
            seiscomp_tool: self.seiscomp_tool,
            command_timeout: Duration::from_secs(self.command_timeout),
            on_rollback_failure: self.on_rollback_failure.into(),
        };

        let summary = pipeline::run_blocking(&config)
            .with_context(|| format!("update-bindings failed for '{}'", self.process))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary)
                    .context("failed to render summary JSON")?
            );
        } else {
            print_summary(&summary);
        }
        Ok(())
    }
}

fn print_summary(summary: &ReconcileSummary) {
    println!(
        "✓ reconciled ({} bound, {} masked, {} skipped)",
        summary.bound.len(),
        summary.masked.len(),
        summary.skipped.len()
    );
    for station in &summary.bound {
        println!("  {} {station}", "+".green());
    }
    for station in &summary.masked {
        println!("  {} {station} (masked)", "✗".red());
    }
    for station in &summary.skipped {
        println!("  · {station}");
    }
}
