//! Gateway API server for the wardmap status service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** for reading the full district mapping and
//!   submitting status mutations
//! - **`WebSocket` endpoint** (`/ws/status`) carrying the realtime
//!   channel: viewers get an `initial_status` snapshot on join and a
//!   `status_update` per committed mutation, in commit order
//! - **Minimal HTML status page** (`GET /`) showing district and
//!   subscriber counts plus endpoint links
//!
//! # Architecture
//!
//! [`AppState`] owns the authoritative [`StatusStore`] behind a
//! read-write lock, the [`ChannelHub`] subscriber registry, and the
//! durable [`SnapshotStore`]. A mutation runs
//! validate -> set -> save -> publish as one unit under the store's
//! write lock, so concurrent mutations serialize and broadcasts leave in
//! commit order. Reads take only the read lock and run concurrently.
//!
//! [`StatusStore`]: wardmap_core::StatusStore
//! [`SnapshotStore`]: wardmap_db::SnapshotStore

pub mod error;
pub mod handlers;
pub mod hub;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use hub::{ChannelHub, SubscriberId};
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
