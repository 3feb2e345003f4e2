//! Domain types shared across the seedkeeper crates.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// StationId
// ---------------------------------------------------------------------------

/// A station identity in `NETWORK_STATION` form (e.g. `CN_LMQ`).
///
/// Opaque once constructed; the underscore join happens exactly once, when the
/// catalog line is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StationId(pub String);

impl StationId {
    /// Join the network and station fields of a catalog line into an id.
    pub fn from_fields(network: &str, station: &str) -> Self {
        Self(format!("{network}_{station}"))
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for StationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StationId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Sncl
// ---------------------------------------------------------------------------

/// Network / station / location / channel identity of a single data stream,
/// as carried in day-file names (`CN.LMQ..HHZ.D.2023.121`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sncl {
    pub network: String,
    pub station: String,
    pub location: String,
    pub channel: String,
}

impl Sncl {
    /// Parse the first four dot-separated components of a file name.
    ///
    /// Returns `None` when fewer than four components are present. The
    /// location code may be empty (`CN.LMQ..HHZ`).
    pub fn parse(name: &str) -> Option<Self> {
        let mut parts = name.split('.');
        Some(Self {
            network: parts.next()?.to_owned(),
            station: parts.next()?.to_owned(),
            location: parts.next()?.to_owned(),
            channel: parts.next()?.to_owned(),
        })
    }
}

impl fmt::Display for Sncl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.network, self.station, self.location, self.channel
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
