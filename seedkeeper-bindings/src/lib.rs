//! # seedkeeper-bindings
//!
//! Transactional reconciliation of acquisition stations against on-disk key
//! bindings: each new binding is written, the archiving daemon is
//! reconfigured and restarted, and a daemon that fails to come back up rolls
//! the binding back and masks the station permanently.
//!
//! Call [`pipeline::run_blocking`] for the full catalog → reconcile →
//! persist-mask cycle, or drive [`reconcile`] directly.

pub mod catalog;
pub mod control;
mod error;
pub mod pipeline;
pub mod reconcile;
pub mod store;

pub use catalog::{parse_station_lines, StationCatalog};
pub use control::{DaemonStatus, ProcessController, Verification};
pub use error::BindingsError;
pub use pipeline::{run_blocking, UpdateConfig};
pub use reconcile::{reconcile, ReconcileSummary, RollbackFailure, StationOutcome};
pub use store::BindingStore;
