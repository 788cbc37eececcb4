//! District identifiers, status values, and status records.
//!
//! A district is one named map region whose only mutable fact is its
//! [`Status`]. The display color is not independent state: it is derived
//! from the status by [`Status::color`], and [`StatusRecord::new`] is the
//! only way to build a record, so the two fields can never disagree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display color for districts in the `normal` state.
const COLOR_NORMAL: &str = "#5698c3";

/// Display color for districts in the `warning` state.
const COLOR_WARNING: &str = "#ffc107";

// ---------------------------------------------------------------------------
// DistrictId
// ---------------------------------------------------------------------------

/// Opaque identifier for a district.
///
/// The set of known identifiers is supplied at startup and never changes
/// while the process runs. Identifiers are ordered so snapshots serialize
/// in a stable key order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistrictId(String);

impl DistrictId {
    /// Create an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DistrictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DistrictId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for DistrictId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// The status of a district.
///
/// This is a closed two-value enum: there is no "unknown" state, and every
/// known district always has exactly one of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The district is in its default, unremarkable state.
    Normal,
    /// The district requires attention.
    Warning,
}

impl Status {
    /// The display color derived from this status.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Normal => COLOR_NORMAL,
            Self::Warning => COLOR_WARNING,
        }
    }

    /// The wire representation of this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status string was not one of the permitted values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status value: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "warning" => Ok(Self::Warning),
            other => Err(ParseStatusError(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// StatusRecord
// ---------------------------------------------------------------------------

/// The full state of one district: its status and the derived color.
///
/// The color is stored (not recomputed on serialization) because it is part
/// of the wire and durable formats, but it is never set independently:
/// [`StatusRecord::new`] derives it from the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// The district's current status.
    pub status: Status,
    /// Display color derived from `status`.
    pub color: String,
}

impl StatusRecord {
    /// Build a record for the given status with its derived color.
    pub fn new(status: Status) -> Self {
        Self {
            status,
            color: status.color().to_owned(),
        }
    }
}

impl Default for StatusRecord {
    fn default() -> Self {
        Self::new(Status::Normal)
    }
}
