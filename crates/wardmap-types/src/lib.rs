//! Shared type definitions for the wardmap district status service.
//!
//! This crate is the single source of truth for the types used across the
//! wardmap workspace: district identifiers, the two-value status enum with
//! its derived display color, and the messages carried over the realtime
//! channel.
//!
//! # Modules
//!
//! - [`district`] -- District identifiers, status values, status records
//! - [`message`] -- Realtime channel messages and audience tags

pub mod district;
pub mod message;

// Re-export all public types at crate root for convenience.
pub use district::{DistrictId, ParseStatusError, Status, StatusRecord};
pub use message::{Audience, ChannelMessage, JoinRequest};
