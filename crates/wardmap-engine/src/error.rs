//! Error types for the service binary.

use wardmap_server::ServerError;

use crate::config::ConfigError;

/// Errors that abort service startup.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The configuration file could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The gateway server failed to start or serve.
    #[error("server error: {0}")]
    Server(#[from] ServerError),
}
