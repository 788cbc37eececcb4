//! Configuration loading and typed config structures for the wardmap service.
//!
//! The canonical configuration lives in `wardmap-config.yaml` at the
//! project root (overridable via `WARDMAP_CONFIG`). This module defines
//! strongly-typed structs that mirror the YAML structure, and provides a
//! loader that reads the file.
//!
//! The `districts` list is the known-district enumeration: it is fixed
//! for the lifetime of the process, and the store's key set always equals
//! it. In a full deployment this list comes from whatever component owns
//! the map geometry; the config file stands in for it here.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `wardmap-config.yaml`. All fields have
/// defaults, so a missing file or an empty document yields a runnable
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Gateway server bind settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Durable snapshot settings.
    #[serde(default)]
    pub persistence: PersistenceSection,

    /// The known-district enumeration.
    #[serde(default)]
    pub districts: DistrictsSection,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for deployment-specific
    /// settings:
    /// - `WARDMAP_SNAPSHOT_PATH` overrides `persistence.snapshot_path`
    /// - `WARDMAP_PORT` overrides `server.port` (ignored if unparsable)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment-variable overrides on top of the parsed values.
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("WARDMAP_SNAPSHOT_PATH") {
            self.persistence.snapshot_path = path;
        }
        if let Ok(port) = std::env::var("WARDMAP_PORT")
            && let Ok(port) = port.parse::<u16>()
        {
            self.server.port = port;
        }
    }
}

/// Gateway server bind settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    5005
}

/// Durable snapshot settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistenceSection {
    /// Where the JSON snapshot document is read and written.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

impl Default for PersistenceSection {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> String {
    String::from("data/district-status.json")
}

/// The known-district enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DistrictsSection(pub Vec<String>);

impl Default for DistrictsSection {
    fn default() -> Self {
        Self(
            ["ward-a", "ward-b", "ward-c", "ward-d", "ward-e", "ward-f", "ward-g", "ward-h", "ward-i"]
                .map(String::from)
                .to_vec(),
        )
    }
}
