//! Validation of externally triggered mutation requests.
//!
//! Every mutation passes through [`validate`] before it reaches the store.
//! Validation is total and side-effect-free: it never mutates anything,
//! and on rejection the caller performs no store mutation, no persistence
//! write, and no broadcast.

use wardmap_types::{DistrictId, ParseStatusError, Status};

use crate::store::StatusStore;

/// Reasons a mutation request is rejected before any state change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The request referenced a district outside the known set.
    #[error("district does not exist: {0}")]
    UnknownDistrict(DistrictId),

    /// The request's status was not one of the permitted values.
    #[error(transparent)]
    InvalidStatus(#[from] ParseStatusError),
}

/// Check a mutation request against the known-district set and the
/// permitted status values.
///
/// Returns the parsed [`Status`] on success so the caller applies exactly
/// the value that was validated.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownDistrict`] if `district` is not in
/// the store, or [`ValidationError::InvalidStatus`] if `raw_status` is
/// not `normal` or `warning`.
pub fn validate(
    store: &StatusStore,
    district: &DistrictId,
    raw_status: &str,
) -> Result<Status, ValidationError> {
    if !store.contains(district) {
        return Err(ValidationError::UnknownDistrict(district.clone()));
    }
    let status = raw_status.parse::<Status>()?;
    Ok(status)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn store() -> StatusStore {
        StatusStore::with_defaults(["ward-a", "ward-b"].map(DistrictId::from))
    }

    #[test]
    fn accepts_known_district_and_permitted_status() {
        let store = store();
        let status = validate(&store, &DistrictId::from("ward-a"), "warning").unwrap();
        assert_eq!(status, Status::Warning);
    }

    #[test]
    fn rejects_unknown_district() {
        let store = store();
        let err = validate(&store, &DistrictId::from("nonexistent"), "warning").unwrap_err();
        assert!(err.to_string().contains("district does not exist"));
    }

    #[test]
    fn rejects_invalid_status_value() {
        let store = store();
        let err = validate(&store, &DistrictId::from("ward-a"), "unknown-value").unwrap_err();
        assert!(err.to_string().contains("invalid status value"));
    }

    #[test]
    fn district_check_runs_before_status_check() {
        // Both fields invalid: the reported reason is the missing district.
        let store = store();
        let err = validate(&store, &DistrictId::from("nonexistent"), "bogus").unwrap_err();
        assert!(matches!(err, ValidationError::UnknownDistrict(_)));
    }
}
