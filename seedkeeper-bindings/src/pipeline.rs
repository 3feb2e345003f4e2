//! Full update pipeline used by the CLI: catalog → reconcile → persist mask.

use std::path::PathBuf;
use std::time::Duration;

use seedkeeper_core::mask;

use crate::catalog::StationCatalog;
use crate::control::ProcessController;
use crate::error::{io_err, BindingsError};
use crate::reconcile::{reconcile, ReconcileSummary, RollbackFailure};
use crate::store::BindingStore;

/// Everything one reconciliation run needs — no process-wide globals.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Acquisition server address handed to the listing tool.
    pub address: String,
    /// Name of the archiving daemon process bindings point at.
    pub process: String,
    /// Persistent masked-station file.
    pub mask_file: PathBuf,
    /// Daemon key directory holding the binding files.
    pub key_dir: PathBuf,
    /// Listing tool (`slinktool` unless overridden).
    pub slink_tool: PathBuf,
    /// Control tool (`seiscomp` unless overridden).
    pub seiscomp_tool: PathBuf,
    /// Bound on every external command invocation.
    pub command_timeout: Duration,
    pub on_rollback_failure: RollbackFailure,
}

/// Run the pipeline, blocking the current thread until it completes.
pub fn run_blocking(config: &UpdateConfig) -> Result<ReconcileSummary, BindingsError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(config))
}

/// Fetch the catalog, reconcile every station, persist the mask set once.
///
/// The mask set is persisted even when reconciliation aborts, so decisions
/// made before the abort survive (the aborting station is already masked in
/// memory at its failure site).
pub async fn run(config: &UpdateConfig) -> Result<ReconcileSummary, BindingsError> {
    let catalog = StationCatalog::new(
        &config.slink_tool,
        config.address.clone(),
        config.command_timeout,
    );
    let stations = catalog.fetch().await?;
    tracing::info!(
        "catalog at {} lists {} stations",
        config.address,
        stations.len()
    );

    let mut masked = mask::load(&config.mask_file)?;
    let store = BindingStore::new(&config.key_dir);
    let control = ProcessController::new(
        &config.seiscomp_tool,
        config.process.clone(),
        config.command_timeout,
    );

    let result = reconcile(
        &stations,
        &store,
        &control,
        &mut masked,
        config.on_rollback_failure,
    )
    .await;

    match (result, mask::persist(&config.mask_file, &masked)) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(persist_err)) => Err(persist_err.into()),
        (Err(run_err), Ok(())) => Err(run_err),
        (Err(run_err), Err(persist_err)) => {
            tracing::error!("failed to persist mask file after aborted run: {persist_err}");
            Err(run_err)
        }
    }
}
