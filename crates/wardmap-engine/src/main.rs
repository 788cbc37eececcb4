//! Service binary for the wardmap district status service.
//!
//! Wires together configuration, the durable snapshot, the authoritative
//! status store, and the gateway server, then serves until terminated.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `wardmap-config.yaml`
//! 3. Read the durable snapshot (absent or unreadable -> all-`normal`)
//! 4. Build the status store keyed by the known-district enumeration
//! 5. Run the gateway server until `Ctrl-C`

mod config;
mod error;

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wardmap_core::StatusStore;
use wardmap_db::SnapshotStore;
use wardmap_server::{AppState, ServerConfig, start_server};
use wardmap_types::DistrictId;

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Default configuration file path, overridable via `WARDMAP_CONFIG`.
const DEFAULT_CONFIG_PATH: &str = "wardmap-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the server
/// fails to bind or serve. Persistence problems never abort startup.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("wardmap-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        snapshot_path = config.persistence.snapshot_path,
        district_count = config.districts.0.len(),
        "Configuration loaded"
    );

    let district_ids: Vec<DistrictId> = config
        .districts
        .0
        .iter()
        .cloned()
        .map(DistrictId::from)
        .collect();

    // 3. Read the durable snapshot.
    let snapshots = SnapshotStore::new(config.persistence.snapshot_path.clone());
    let durable = match snapshots.load().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "durable snapshot unavailable, starting from defaults");
            None
        }
    };

    // 4. Build the status store.
    let store = match durable {
        Some(snapshot) => {
            info!(entries = snapshot.len(), "Durable snapshot loaded");
            StatusStore::from_snapshot(district_ids, &snapshot)
        }
        None => {
            info!("No durable snapshot, every district starts at normal");
            StatusStore::with_defaults(district_ids)
        }
    };
    info!(
        districts = store.len(),
        warnings = store.warning_count(),
        "Status store initialized"
    );

    let state = Arc::new(AppState::new(store, snapshots));

    // 5. Run the gateway server.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    start_server(&server_config, state).await?;

    info!("wardmap-engine stopped");
    Ok(())
}

/// Load configuration from `WARDMAP_CONFIG` or the default path.
///
/// A missing file is not an error: the built-in defaults apply, matching
/// the safe-to-delete contract of the durable snapshot.
fn load_config() -> Result<EngineConfig, EngineError> {
    let path = std::env::var("WARDMAP_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
    let path = Path::new(&path);

    if path.exists() {
        Ok(EngineConfig::from_file(path)?)
    } else {
        warn!(path = %path.display(), "config file not found, using built-in defaults");
        Ok(EngineConfig::parse("{}")?)
    }
}
