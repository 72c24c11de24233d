//! Config struct definition and default implementation.

use serde::Deserialize;
use std::time::Duration;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "dsl-exec.yaml";

/// Configuration for dsl-exec.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Kill the executor after this many seconds. Absent means wait indefinitely.
    pub timeout_seconds: Option<u64>,
}

impl Config {
    /// The configured timeout as a `Duration`.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}
