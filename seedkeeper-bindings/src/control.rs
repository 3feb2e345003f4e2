//! Daemon control — the status-gated reconfigure/restart protocol.
//!
//! The control tool's `update-config` and `restart` verbs do not report
//! actionable exit codes; the `status` text is the only reliable signal.
//! Hence the fixed three-step sequence with the final status check as the
//! sole gate.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{spawn_err, BindingsError};

// ---------------------------------------------------------------------------
// DaemonStatus
// ---------------------------------------------------------------------------

/// Tri-state daemon status derived from `status` output. Never persisted;
/// recomputed on every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonStatus {
    Running,
    NotRunning,
    /// Empty output, error text, or an unrecognized phrase.
    Unknown,
}

impl DaemonStatus {
    /// Classify raw status output. Only the literal `is running` counts as up.
    pub fn parse(output: &str) -> Self {
        if output.contains("is running") {
            DaemonStatus::Running
        } else if output.contains("is not running") || output.contains("is stopped") {
            DaemonStatus::NotRunning
        } else {
            DaemonStatus::Unknown
        }
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Outcome of [`ProcessController::reconfigure_and_restart`].
///
/// A daemon that fails the status check is an expected negative outcome, not
/// an error — the reconciler branches on it for rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Status output confirmed the daemon is up.
    Running,
    /// Status output did not confirm the daemon; carries the classified
    /// status and the text that produced it.
    NotRunning {
        status: DaemonStatus,
        output: String,
    },
}

impl Verification {
    pub fn is_running(&self) -> bool {
        matches!(self, Verification::Running)
    }
}

// ---------------------------------------------------------------------------
// ProcessController
// ---------------------------------------------------------------------------

/// Invokes the daemon control tool and interprets its status output.
///
/// Tool path, process name, and per-command timeout are explicit constructor
/// values.
#[derive(Debug, Clone)]
pub struct ProcessController {
    tool: PathBuf,
    process: String,
    timeout: Duration,
}

impl ProcessController {
    pub fn new(tool: impl Into<PathBuf>, process: impl Into<String>, timeout: Duration) -> Self {
        Self {
            tool: tool.into(),
            process: process.into(),
            timeout,
        }
    }

    pub fn process_name(&self) -> &str {
        &self.process
    }

    /// `update-config` → `restart` → `status`, in that fixed order.
    ///
    /// Exit codes and stderr of the first two verbs are logged, never fatal
    /// by themselves. A verb that hangs past the timeout fails the whole
    /// verification, same as a non-`is running` status. Only failing to
    /// spawn the tool at all is an `Err`.
    pub async fn reconfigure_and_restart(&self) -> Result<Verification, BindingsError> {
        for verb in ["update-config", "restart"] {
            if self.invoke(verb).await?.is_none() {
                return Ok(Verification::NotRunning {
                    status: DaemonStatus::Unknown,
                    output: format!(
                        "`{verb} {}` timed out after {}s",
                        self.process,
                        self.timeout.as_secs()
                    ),
                });
            }
        }

        let Some(status_output) = self.invoke("status").await? else {
            return Ok(Verification::NotRunning {
                status: DaemonStatus::Unknown,
                output: format!(
                    "`status {}` timed out after {}s",
                    self.process,
                    self.timeout.as_secs()
                ),
            });
        };

        match DaemonStatus::parse(&status_output) {
            DaemonStatus::Running => Ok(Verification::Running),
            status => Ok(Verification::NotRunning {
                status,
                output: status_output,
            }),
        }
    }

    /// Run `<tool> <verb> <process>` under the timeout.
    ///
    /// Returns `Ok(None)` on timeout, `Ok(Some(stdout))` otherwise.
    async fn invoke(&self, verb: &str) -> Result<Option<String>, BindingsError> {
        let command = format!("{} {verb} {}", self.tool.display(), self.process);

        let child = Command::new(&self.tool)
            .arg(verb)
            .arg(&self.process)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_err(command.as_str(), e))?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| spawn_err(command.as_str(), e))?,
            Err(_) => {
                tracing::warn!("`{command}` timed out after {}s", self.timeout.as_secs());
                return Ok(None);
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !stdout.trim().is_empty() {
            tracing::debug!("{command}: {}", stdout.trim());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::error!("{} {verb} error: {}", self.tool.display(), stderr.trim());
        }
        if !output.status.success() {
            tracing::warn!("`{command}` exited with {}", output.status);
        }

        Ok(Some(stdout))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
