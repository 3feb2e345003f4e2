//! Station catalog retrieval via the acquisition listing tool.
//!
//! The listing command's stdout is the catalog; stderr is advisory. A line
//! with fewer than two whitespace-separated fields is not a station and is
//! skipped without comment.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use seedkeeper_core::StationId;

use crate::error::{spawn_err, BindingsError};

/// Queries an acquisition endpoint for the stations it can serve.
///
/// Tool path and endpoint address are explicit constructor values.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    tool: PathBuf,
    address: String,
    timeout: Duration,
}

impl StationCatalog {
    pub fn new(tool: impl Into<PathBuf>, address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            tool: tool.into(),
            address: address.into(),
            timeout,
        }
    }

    /// Invoke `<tool> -L <address>` and parse its stdout into station ids.
    ///
    /// Non-empty stderr is logged as a warning and never aborts retrieval —
    /// whatever stdout the tool produced is still parsed. Failing to spawn
    /// the tool, or a query that hangs past the timeout, is an error.
    pub async fn fetch(&self) -> Result<Vec<StationId>, BindingsError> {
        let command = format!("{} -L {}", self.tool.display(), self.address);
        tracing::debug!("querying station catalog: {command}");

        let child = Command::new(&self.tool)
            .arg("-L")
            .arg(&self.address)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_err(command.as_str(), e))?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| spawn_err(command.as_str(), e))?,
            Err(_) => {
                return Err(BindingsError::Timeout {
                    command,
                    seconds: self.timeout.as_secs(),
                })
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::warn!("{} error: {}", self.tool.display(), stderr.trim());
        }

        Ok(parse_station_lines(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse listing output into station ids, in original order.
///
/// The first two whitespace-separated fields of each line become
/// `{network}_{station}`; malformed lines are skipped.
pub fn parse_station_lines(output: &str) -> Vec<StationId> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(network), Some(station)) => Some(StationId::from_fields(network, station)),
                _ => None,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
