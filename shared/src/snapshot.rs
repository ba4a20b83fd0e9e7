//! Layout snapshot - the full persisted state of one seating plan
//!
//! The snapshot includes a `checksum` field for drift detection. The store
//! and the UI can recompute it to detect a snapshot that was edited or
//! truncated outside the planner.

use crate::models::{DiningTable, Fixture, Group, Guest, RoomSettings};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Layout snapshot - what the persistence collaborator saves and loads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutSnapshot {
    pub room: RoomSettings,
    #[serde(default)]
    pub tables: Vec<DiningTable>,
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
    #[serde(default)]
    pub guests: Vec<Guest>,
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Last update timestamp (millis)
    #[serde(default)]
    pub updated_at: i64,
    /// SHA-256 over the content fields (hex)
    #[serde(default)]
    pub checksum: String,
}

#[derive(Serialize)]
struct ChecksumView<'a> {
    room: &'a RoomSettings,
    tables: &'a [DiningTable],
    fixtures: &'a [Fixture],
    guests: &'a [Guest],
    groups: &'a [Group],
}

impl LayoutSnapshot {
    /// Empty layout with the given room settings
    pub fn empty(room: RoomSettings) -> Self {
        let mut snapshot = Self {
            room,
            tables: Vec::new(),
            fixtures: Vec::new(),
            guests: Vec::new(),
            groups: Vec::new(),
            updated_at: crate::util::now_millis(),
            checksum: String::new(),
        };
        snapshot.update_checksum();
        snapshot
    }

    /// Compute checksum from content (excludes `updated_at` and `checksum`)
    pub fn compute_checksum(&self) -> String {
        let view = ChecksumView {
            room: &self.room,
            tables: &self.tables,
            fixtures: &self.fixtures,
            guests: &self.guests,
            groups: &self.groups,
        };
        let bytes = serde_json::to_vec(&view).unwrap_or_default();
        hex::encode(Sha256::digest(&bytes))
    }

    /// Update the checksum field based on current content
    pub fn update_checksum(&mut self) {
        self.checksum = self.compute_checksum();
    }

    /// Returns false if the stored checksum does not match the content
    pub fn verify_checksum(&self) -> bool {
        self.checksum == self.compute_checksum()
    }
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self::empty(RoomSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_checksum_verifies() {
        let snapshot = LayoutSnapshot::default();
        assert_eq!(snapshot.checksum.len(), 64);
        assert!(snapshot.verify_checksum());
    }

    #[test]
    fn test_checksum_detects_drift() {
        let mut snapshot = LayoutSnapshot::default();
        snapshot.guests.push(Guest::new(1, "Alice"));
        assert!(!snapshot.verify_checksum());

        snapshot.update_checksum();
        assert!(snapshot.verify_checksum());
    }

    #[test]
    fn test_checksum_ignores_timestamp() {
        let mut snapshot = LayoutSnapshot::default();
        let before = snapshot.checksum.clone();
        snapshot.updated_at += 1000;
        assert_eq!(snapshot.compute_checksum(), before);
    }

    #[test]
    fn test_json_roundtrip_keeps_checksum_valid() {
        let mut snapshot = LayoutSnapshot::default();
        snapshot.guests.push(Guest::new(42, "Jon Smith"));
        snapshot.update_checksum();

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: LayoutSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        assert!(back.verify_checksum());
    }
}
