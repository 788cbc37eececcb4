//! Messages carried over the realtime status channel.
//!
//! A connection declares its [`Audience`] with a [`JoinRequest`] as its
//! first frame. Viewers then receive one [`ChannelMessage::InitialStatus`]
//! holding the full mapping, followed by a [`ChannelMessage::StatusUpdate`]
//! per committed mutation, in commit order. Operators receive no automatic
//! pushes; they originate mutations through the HTTP gateway.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::district::{DistrictId, Status, StatusRecord};

// ---------------------------------------------------------------------------
// Audience
// ---------------------------------------------------------------------------

/// The two disjoint subscriber groups of the realtime channel.
///
/// Membership is chosen once at join time and is fixed for the lifetime of
/// the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Observes status changes; receives the initial snapshot and every
    /// subsequent update.
    Viewer,
    /// Originates mutation requests; receives no automatic pushes.
    Operator,
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Viewer => f.write_str("viewer"),
            Self::Operator => f.write_str("operator"),
        }
    }
}

/// First frame sent by a client after connecting, declaring its audience.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JoinRequest {
    /// The group this connection belongs to.
    pub audience: Audience,
}

// ---------------------------------------------------------------------------
// ChannelMessage
// ---------------------------------------------------------------------------

/// A message pushed to a viewer over the realtime channel.
///
/// Serialized as tagged JSON, e.g.
/// `{"type":"status_update","district":"ward-a","status":"warning","color":"#ffc107"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelMessage {
    /// Full snapshot delivered once to a newly joined viewer, so it is
    /// never in an undefined state even momentarily.
    InitialStatus {
        /// Every known district mapped to its current record.
        districts: BTreeMap<DistrictId, StatusRecord>,
    },
    /// A single committed mutation, fanned out to all viewers.
    StatusUpdate {
        /// The district that changed.
        district: DistrictId,
        /// Its new status.
        status: Status,
        /// The color derived from the new status.
        color: String,
    },
}
