//! Durable persistence for the wardmap status store.
//!
//! The durable copy is a single human-readable JSON document whose shape
//! is identical to the in-memory snapshot: district identifier mapped to
//! `{status, color}`. It exists so state survives restarts; while the
//! process is alive the in-memory store is authoritative, and a failed
//! write never rolls back an applied mutation.
//!
//! The file is safe to delete: the next startup regenerates the
//! all-`normal` default.

pub mod error;
pub mod snapshot_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use snapshot_store::SnapshotStore;
