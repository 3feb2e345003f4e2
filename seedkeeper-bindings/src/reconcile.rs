//! Transactional reconciliation of desired stations against key bindings.
//!
//! Per-station state machine, terminal states `{Bound, Masked, Skipped}`:
//!
//! 1. already bound or already masked → **Skipped** (no commands run)
//! 2. create binding → reconfigure/restart → verified running → **Bound**
//! 3. verification failed → mask, delete binding, restart once more to
//!    return to the last-known-good configuration → **Masked**
//!
//! Stations are processed strictly in catalog order. Binding creation and
//! daemon restart are inherently serialized: each station's verification
//! depends on the daemon having restarted with that binding in place.

use serde::Serialize;

use seedkeeper_core::{MaskSet, StationId};

use crate::control::{ProcessController, Verification};
use crate::error::BindingsError;
use crate::store::BindingStore;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Terminal state for one station in a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StationOutcome {
    Bound,
    Masked,
    Skipped,
}

/// What to do when the rollback restart itself fails verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollbackFailure {
    /// Stop the run; the daemon state is unknown for every remaining station.
    #[default]
    Abort,
    /// Log at error level and keep processing remaining stations.
    Continue,
}

/// Summary of a reconciliation run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub bound: Vec<StationId>,
    pub masked: Vec<StationId>,
    pub skipped: Vec<StationId>,
}

impl ReconcileSummary {
    fn record(&mut self, station: &StationId, outcome: StationOutcome) {
        let bucket = match outcome {
            StationOutcome::Bound => &mut self.bound,
            StationOutcome::Masked => &mut self.masked,
            StationOutcome::Skipped => &mut self.skipped,
        };
        bucket.push(station.clone());
    }
}

// ---------------------------------------------------------------------------
// Reconcile
// ---------------------------------------------------------------------------

/// Reconcile the desired `stations` against the on-disk bindings.
///
/// The caller persists `masked` exactly once after the run. Mask insertions
/// happen at the failure site, before any rollback command runs, so a
/// best-effort persist after an aborted run still captures every decision.
pub async fn reconcile(
    stations: &[StationId],
    store: &BindingStore,
    control: &ProcessController,
    masked: &mut MaskSet,
    on_rollback_failure: RollbackFailure,
) -> Result<ReconcileSummary, BindingsError> {
    let mut summary = ReconcileSummary::default();

    for station in stations {
        let outcome =
            reconcile_station(station, store, control, masked, on_rollback_failure).await?;
        summary.record(station, outcome);
    }

    Ok(summary)
}

async fn reconcile_station(
    station: &StationId,
    store: &BindingStore,
    control: &ProcessController,
    masked: &mut MaskSet,
    on_rollback_failure: RollbackFailure,
) -> Result<StationOutcome, BindingsError> {
    if masked.contains(station) {
        tracing::debug!("station {station} is masked, skipping");
        return Ok(StationOutcome::Skipped);
    }
    if store.exists(station) {
        tracing::debug!(
            "key binding {} already exists",
            store.path_for(station).display()
        );
        return Ok(StationOutcome::Skipped);
    }

    store.create(station, control.process_name())?;

    match control.reconfigure_and_restart().await? {
        Verification::Running => {
            tracing::info!("bound station {station} to {}", control.process_name());
            Ok(StationOutcome::Bound)
        }
        Verification::NotRunning { output, .. } => {
            tracing::warn!(
                "adding key binding for stream {station} caused {} to crash: {}",
                control.process_name(),
                output.trim()
            );

            // Mask first; rollback commands come after, so the decision
            // survives a persist-on-abort.
            masked.insert(station.clone());

            store.delete(station)?;
            if !control.reconfigure_and_restart().await?.is_running() {
                match on_rollback_failure {
                    RollbackFailure::Abort => {
                        return Err(BindingsError::DaemonUnrecoverable {
                            process: control.process_name().to_string(),
                        });
                    }
                    RollbackFailure::Continue => {
                        tracing::error!(
                            "{} is still not running after rolling back {station}; continuing",
                            control.process_name()
                        );
                    }
                }
            }
            Ok(StationOutcome::Masked)
        }
    }
}
