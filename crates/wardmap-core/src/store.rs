//! The in-memory status store.
//!
//! The store's key set always equals the known-district enumeration
//! supplied at construction: no key is ever added, removed, or left
//! without a record. Records are replaced one at a time through
//! [`StatusStore::set`], which rebuilds the record from the status so the
//! color invariant holds unconditionally.

use std::collections::BTreeMap;

use wardmap_types::{DistrictId, Status, StatusRecord};

/// Errors raised by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The mutation referenced a district outside the known set.
    #[error("district does not exist: {0}")]
    UnknownDistrict(DistrictId),
}

/// Mapping from district identifier to status record.
///
/// Owns its map outright; callers observe it only through owned copies
/// ([`StatusStore::get_all`]) or shared borrows, and mutate it only
/// through [`StatusStore::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusStore {
    districts: BTreeMap<DistrictId, StatusRecord>,
}

impl StatusStore {
    /// Build a store with every known district at [`Status::Normal`].
    pub fn with_defaults<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = DistrictId>,
    {
        let districts = ids
            .into_iter()
            .map(|id| (id, StatusRecord::default()))
            .collect();
        Self { districts }
    }

    /// Build a store by reconciling a durable snapshot against the known
    /// enumeration.
    ///
    /// Every known district takes its status from the snapshot when
    /// present, rebuilt through [`StatusRecord::new`] so a tampered color
    /// field on disk cannot survive the reload. Districts missing from
    /// the snapshot default to [`Status::Normal`]; snapshot keys outside
    /// the enumeration are dropped.
    pub fn from_snapshot<I>(ids: I, snapshot: &BTreeMap<DistrictId, StatusRecord>) -> Self
    where
        I: IntoIterator<Item = DistrictId>,
    {
        let districts = ids
            .into_iter()
            .map(|id| {
                let record = snapshot
                    .get(&id)
                    .map_or_else(StatusRecord::default, |rec| StatusRecord::new(rec.status));
                (id, record)
            })
            .collect();
        Self { districts }
    }

    /// Look up the record for one district.
    pub fn get(&self, id: &DistrictId) -> Option<&StatusRecord> {
        self.districts.get(id)
    }

    /// Whether the district is in the known set.
    pub fn contains(&self, id: &DistrictId) -> bool {
        self.districts.contains_key(id)
    }

    /// Number of known districts.
    pub fn len(&self) -> usize {
        self.districts.len()
    }

    /// Whether the known-district set is empty.
    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    /// Iterate over the known district identifiers.
    pub fn district_ids(&self) -> impl Iterator<Item = &DistrictId> {
        self.districts.keys()
    }

    /// Number of districts currently at [`Status::Warning`].
    pub fn warning_count(&self) -> usize {
        self.districts
            .values()
            .filter(|rec| rec.status == Status::Warning)
            .count()
    }

    /// An owned copy of the full current snapshot.
    ///
    /// Mutating the returned map has no effect on the store.
    pub fn get_all(&self) -> BTreeMap<DistrictId, StatusRecord> {
        self.districts.clone()
    }

    /// Borrow the snapshot for serialization.
    pub const fn as_map(&self) -> &BTreeMap<DistrictId, StatusRecord> {
        &self.districts
    }

    /// Replace one district's record with a fresh record for `status`.
    ///
    /// Returns the new record. The district must already be known; the
    /// validator performs the same check upstream, and the store repeats
    /// it so a missing key can never be silently inserted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownDistrict`] if the key is absent.
    pub fn set(&mut self, id: &DistrictId, status: Status) -> Result<StatusRecord, StoreError> {
        let slot = self
            .districts
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownDistrict(id.clone()))?;
        *slot = StatusRecord::new(status);
        Ok(slot.clone())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn ids(names: &[&str]) -> Vec<DistrictId> {
        names.iter().map(|n| DistrictId::from(*n)).collect()
    }

    #[test]
    fn defaults_are_all_normal() {
        let store = StatusStore::with_defaults(ids(&["a", "b", "c"]));
        assert_eq!(store.len(), 3);
        assert_eq!(store.warning_count(), 0);
        for record in store.get_all().values() {
            assert_eq!(record.status, Status::Normal);
            assert_eq!(record.color, "#5698c3");
        }
    }

    #[test]
    fn set_replaces_record_and_returns_it() {
        let mut store = StatusStore::with_defaults(ids(&["a", "b"]));
        let record = store.set(&DistrictId::from("a"), Status::Warning).unwrap();
        assert_eq!(record.status, Status::Warning);
        assert_eq!(record.color, "#ffc107");
        assert_eq!(store.get(&DistrictId::from("a")), Some(&record));
        // Untouched districts keep their record.
        assert_eq!(
            store.get(&DistrictId::from("b")).unwrap().status,
            Status::Normal
        );
    }

    #[test]
    fn set_unknown_district_rejects_and_changes_nothing() {
        let mut store = StatusStore::with_defaults(ids(&["a"]));
        let before = store.get_all();
        let err = store.set(&DistrictId::from("zz"), Status::Warning).unwrap_err();
        assert_eq!(err, StoreError::UnknownDistrict(DistrictId::from("zz")));
        assert_eq!(store.get_all(), before);
    }

    #[test]
    fn color_matches_status_for_every_district() {
        let mut store = StatusStore::with_defaults(ids(&["a", "b", "c"]));
        store.set(&DistrictId::from("b"), Status::Warning).unwrap();
        for record in store.get_all().values() {
            assert_eq!(record.color, record.status.color());
        }
    }

    #[test]
    fn snapshot_reconciliation_keys_off_the_enumeration() {
        let mut snapshot = BTreeMap::new();
        snapshot.insert(DistrictId::from("a"), StatusRecord::new(Status::Warning));
        snapshot.insert(DistrictId::from("stale"), StatusRecord::new(Status::Warning));

        let store = StatusStore::from_snapshot(ids(&["a", "b"]), &snapshot);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&DistrictId::from("a")).unwrap().status, Status::Warning);
        // Missing from the snapshot: defaulted.
        assert_eq!(store.get(&DistrictId::from("b")).unwrap().status, Status::Normal);
        // Outside the enumeration: dropped.
        assert!(!store.contains(&DistrictId::from("stale")));
    }

    #[test]
    fn snapshot_reconciliation_restores_tampered_colors() {
        let mut snapshot = BTreeMap::new();
        snapshot.insert(
            DistrictId::from("a"),
            StatusRecord {
                status: Status::Warning,
                color: "#000000".to_owned(),
            },
        );

        let store = StatusStore::from_snapshot(ids(&["a"]), &snapshot);
        let record = store.get(&DistrictId::from("a")).unwrap();
        assert_eq!(record.status, Status::Warning);
        assert_eq!(record.color, "#ffc107");
    }

    #[test]
    fn get_all_is_a_detached_copy() {
        let store = StatusStore::with_defaults(ids(&["a"]));
        let mut copy = store.get_all();
        copy.insert(DistrictId::from("b"), StatusRecord::default());
        assert_eq!(store.len(), 1);
    }
}
