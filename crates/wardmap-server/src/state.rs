//! Shared application state for the gateway server.
//!
//! [`AppState`] wires the authoritative [`StatusStore`], the
//! [`ChannelHub`] subscriber registry, and the durable [`SnapshotStore`]
//! together, and is shared across handlers as an `Arc` via Axum's
//! `State` extractor.
//!
//! The store is the only shared mutable resource. [`AppState::apply_update`]
//! holds the write lock across the whole validate-set-save-publish
//! sequence, so two concurrent mutations can never interleave and every
//! viewer observes broadcasts in commit order.

use std::collections::BTreeMap;

use tokio::sync::{RwLock, mpsc};
use tracing::warn;
use wardmap_core::{StatusStore, StoreError, ValidationError, validate};
use wardmap_db::SnapshotStore;
use wardmap_types::{Audience, ChannelMessage, DistrictId, StatusRecord};

use crate::hub::{ChannelHub, SubscriberId};

/// Shared state for the Axum application.
pub struct AppState {
    /// The authoritative in-memory store.
    pub store: RwLock<StatusStore>,
    /// Registry of realtime channel subscribers.
    pub hub: ChannelHub,
    /// Durable snapshot persistence.
    pub snapshots: SnapshotStore,
}

impl AppState {
    /// Assemble the application state around an already-populated store.
    pub fn new(store: StatusStore, snapshots: SnapshotStore) -> Self {
        Self {
            store: RwLock::new(store),
            hub: ChannelHub::new(),
            snapshots,
        }
    }

    /// The full current mapping, as an owned copy.
    pub async fn districts(&self) -> BTreeMap<DistrictId, StatusRecord> {
        self.store.read().await.get_all()
    }

    /// Apply one externally requested mutation.
    ///
    /// Runs validate -> set -> save -> publish as one unit under the
    /// store's write lock. A persistence failure is logged as a warning
    /// and does not roll back the mutation or suppress the broadcast:
    /// the in-memory store stays authoritative while the process lives.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the request references an unknown
    /// district or an impermissible status value; in that case nothing
    /// was mutated, persisted, or broadcast.
    pub async fn apply_update(
        &self,
        district: &DistrictId,
        raw_status: &str,
    ) -> Result<StatusRecord, ValidationError> {
        let mut store = self.store.write().await;

        let status = validate(&store, district, raw_status)?;
        let record = match store.set(district, status) {
            Ok(record) => record,
            // The store repeats the validator's key check; both reject
            // with the same client-facing reason.
            Err(StoreError::UnknownDistrict(id)) => {
                return Err(ValidationError::UnknownDistrict(id));
            }
        };

        if let Err(e) = self.snapshots.save(store.as_map()).await {
            warn!(
                district = %district,
                error = %e,
                "snapshot write failed, in-memory state remains authoritative"
            );
        }

        let delivered = self
            .hub
            .publish_update(&ChannelMessage::StatusUpdate {
                district: district.clone(),
                status,
                color: record.color.clone(),
            })
            .await;
        tracing::debug!(district = %district, status = %status, delivered, "status update published");

        Ok(record)
    }

    /// Register a realtime channel subscriber.
    ///
    /// A viewer immediately receives an `initial_status` message holding
    /// the full current mapping; the store's read lock is held across
    /// registration and the snapshot send, so the snapshot can never lag
    /// a committed mutation and no update slips in between. Operators
    /// are registered without an automatic push.
    pub async fn subscribe(
        &self,
        audience: Audience,
    ) -> (SubscriberId, mpsc::UnboundedReceiver<ChannelMessage>) {
        match audience {
            Audience::Operator => self.hub.register(Audience::Operator).await,
            Audience::Viewer => {
                let store = self.store.read().await;
                let (id, rx) = self.hub.register(Audience::Viewer).await;
                self.hub
                    .send_to(
                        id,
                        ChannelMessage::InitialStatus {
                            districts: store.get_all(),
                        },
                    )
                    .await;
                (id, rx)
            }
        }
    }

    /// Drop a subscriber from the registry. Idempotent.
    pub async fn unsubscribe(&self, id: SubscriberId) {
        self.hub.unsubscribe(id).await;
    }
}
