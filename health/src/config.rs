//! Health-check configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use netboot_types::Addresses;
use netboot_utils::LogFormat;

use crate::targets::{HostMap, PortMap};
use crate::HealthError;

/// Default cap on concurrently running probes.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 256;

/// Configuration for a health-check run.
///
/// Can be loaded from a TOML file via [`HealthConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Per-probe connection timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Upper bound on probes running at once.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Port for each endpoint kind.
    #[serde(default)]
    pub ports: PortMap,

    /// Host or alias for each target. Empty means "use target names".
    #[serde(default)]
    pub hosts: HostMap,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_timeout_ms() -> u64 {
    1000
}

fn default_max_in_flight() -> usize {
    DEFAULT_MAX_IN_FLIGHT
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl HealthConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, HealthError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| HealthError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, HealthError> {
        let config: Self = toml::from_str(s).map_err(|e| HealthError::Config(e.to_string()))?;
        if config.max_in_flight == 0 {
            return Err(HealthError::Config("max_in_flight must be at least 1".into()));
        }
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, HealthError> {
        toml::to_string_pretty(self).map_err(|e| HealthError::Config(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Install the redacting global subscriber with this config's format and level.
    pub fn init_logging(&self) -> Result<(), HealthError> {
        netboot_utils::init_logging(self.log_format, &self.log_level)
            .map_err(|e| HealthError::Config(format!("logging: {e}")))
    }

    /// Hosts to probe for `addresses`: the configured map, or every target
    /// under its own name when none is configured.
    pub fn hosts_for(&self, addresses: &Addresses) -> HostMap {
        if self.hosts.is_empty() {
            HostMap::from_names(addresses)
        } else {
            self.hosts.clone()
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_in_flight: default_max_in_flight(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            ports: PortMap::default(),
            hosts: HostMap::default(),
        }
    }
}
