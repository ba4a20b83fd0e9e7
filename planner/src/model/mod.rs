//! Seating model
//!
//! The sole authority for guests, tables, fixtures, groups and room settings.
//!
//! # Invariants
//!
//! - `table.guests.len() <= table.capacity` after every operation
//! - `guest.table == Some(n)` iff there is exactly one table with number `n`
//!   and its guest set contains the guest id
//! - no partner / keep-apart / group reference points at a missing entity
//!
//! Membership is only ever written by [`SeatingModel::seat`] and
//! [`SeatingModel::release`], so both sides of the guest↔table relation move
//! together. Every public operation either fully applies or leaves the model
//! untouched.
//!
//! # Operation files
//!
//! ```text
//! model/
//! ├── tables.rs    # add/delete/geometry/assignment
//! ├── guests.rs    # add/remove/patch
//! ├── fixtures.rs  # add/delete/geometry
//! ├── groups.rs    # add/rename/delete (cascade to null)
//! ├── room.rs      # room settings
//! └── reports.rs   # advisory reports + consistency check
//! ```

mod error;
mod fixtures;
mod groups;
mod guests;
mod reports;
mod room;
mod tables;

#[cfg(test)]
mod tests;

pub use error::{SeatingError, SeatingResult};
pub use guests::GuestAdded;
pub use reports::{ConsistencyIssue, KeepApartConflict, OutOfRoom};
pub use tables::Occupancy;

use crate::layout;
use shared::LayoutSnapshot;
use shared::models::{DiningTable, Fixture, Group, Guest, RoomSettings};
use shared::util::{now_millis, snowflake_id};
use std::collections::{BTreeSet, HashSet};
use tracing::warn;

/// In-memory seating plan
#[derive(Debug, Clone, PartialEq)]
pub struct SeatingModel {
    room: RoomSettings,
    tables: Vec<DiningTable>,
    fixtures: Vec<Fixture>,
    guests: Vec<Guest>,
    groups: Vec<Group>,
}

impl Default for SeatingModel {
    fn default() -> Self {
        Self::new(RoomSettings::default())
    }
}

impl SeatingModel {
    /// Empty plan for the given room
    pub fn new(room: RoomSettings) -> Self {
        Self {
            room,
            tables: Vec::new(),
            fixtures: Vec::new(),
            guests: Vec::new(),
            groups: Vec::new(),
        }
    }

    // ========== Read access ==========

    pub fn room(&self) -> &RoomSettings {
        &self.room
    }

    pub fn tables(&self) -> &[DiningTable] {
        &self.tables
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn guest(&self, guest_id: i64) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id == guest_id)
    }

    pub fn table(&self, table_id: i64) -> Option<&DiningTable> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub fn table_by_number(&self, number: u32) -> Option<&DiningTable> {
        self.tables.iter().find(|t| t.number == number)
    }

    pub fn fixture(&self, fixture_id: i64) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.id == fixture_id)
    }

    pub fn group(&self, group_id: i64) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    /// Guests seated at the table, in roster order
    pub fn guests_at(&self, table_id: i64) -> Vec<&Guest> {
        match self.table(table_id) {
            Some(table) => self
                .guests
                .iter()
                .filter(|g| table.guests.contains(&g.id))
                .collect(),
            None => Vec::new(),
        }
    }

    // ========== Snapshot ==========

    /// Consistent, checksummed copy of the whole plan for persistence
    pub fn snapshot(&self) -> LayoutSnapshot {
        let mut snapshot = LayoutSnapshot {
            room: self.room.clone(),
            tables: self.tables.clone(),
            fixtures: self.fixtures.clone(),
            guests: self.guests.clone(),
            groups: self.groups.clone(),
            updated_at: now_millis(),
            checksum: String::new(),
        };
        snapshot.update_checksum();
        snapshot
    }

    /// Rebuild a model from a persisted snapshot
    ///
    /// `Guest.table` is canonical: table guest sets are re-derived from it.
    /// Anything that would violate an invariant is repaired and logged:
    /// duplicate ids/table numbers are dropped, guests pointing at a missing
    /// table are unassigned, overflowing tables release their surplus guests
    /// (highest ids first), dangling partner/keep-apart/group references are
    /// cleared.
    pub fn from_snapshot(snapshot: LayoutSnapshot) -> Self {
        if !snapshot.checksum.is_empty() && !snapshot.verify_checksum() {
            warn!("Layout snapshot checksum mismatch, loading with repairs");
        }

        let LayoutSnapshot {
            room,
            tables,
            fixtures,
            guests,
            groups,
            ..
        } = snapshot;

        let mut model = Self::new(room);

        let mut seen_ids = HashSet::new();
        let mut seen_numbers = HashSet::new();
        for mut table in tables {
            if !seen_ids.insert(table.id) || !seen_numbers.insert(table.number) {
                warn!(table_id = table.id, number = table.number, "Dropping duplicate table");
                continue;
            }
            if table.capacity == 0 {
                warn!(number = table.number, "Table had zero capacity, raising to 1");
                table.capacity = 1;
            }
            table.guests.clear();
            model.tables.push(table);
        }

        for fixture in fixtures {
            if !seen_ids.insert(fixture.id) {
                warn!(fixture_id = fixture.id, "Dropping duplicate fixture");
                continue;
            }
            model.fixtures.push(fixture);
        }

        for group in groups {
            if !seen_ids.insert(group.id) {
                warn!(group_id = group.id, "Dropping duplicate group");
                continue;
            }
            model.groups.push(group);
        }

        for guest in guests {
            if !seen_ids.insert(guest.id) {
                warn!(guest_id = guest.id, "Dropping duplicate guest");
                continue;
            }
            model.guests.push(guest);
        }

        model.repair_references();
        model.rebuild_membership();
        model
    }

    fn repair_references(&mut self) {
        let guest_ids: HashSet<i64> = self.guests.iter().map(|g| g.id).collect();
        let group_ids: HashSet<i64> = self.groups.iter().map(|g| g.id).collect();

        for guest in &mut self.guests {
            if let Some(partner) = guest.partner_id
                && (partner == guest.id || !guest_ids.contains(&partner))
            {
                warn!(guest_id = guest.id, partner_id = partner, "Clearing dangling partner");
                guest.partner_id = None;
            }
            let before = guest.keep_apart.len();
            let own_id = guest.id;
            guest
                .keep_apart
                .retain(|id| *id != own_id && guest_ids.contains(id));
            if guest.keep_apart.len() != before {
                warn!(guest_id = guest.id, "Dropped dangling keep-apart references");
            }
            if let Some(group) = guest.group_id
                && !group_ids.contains(&group)
            {
                warn!(guest_id = guest.id, group_id = group, "Clearing dangling group");
                guest.group_id = None;
            }
        }
    }

    fn rebuild_membership(&mut self) {
        // Ascending id order decides who keeps a seat at an overfull table
        let mut order: Vec<usize> = (0..self.guests.len()).collect();
        order.sort_by_key(|&i| self.guests[i].id);

        for gi in order {
            let Some(number) = self.guests[gi].table else {
                continue;
            };
            let guest_id = self.guests[gi].id;
            match self.tables.iter_mut().find(|t| t.number == number) {
                Some(table) if !table.is_full() => {
                    table.guests.insert(guest_id);
                }
                Some(table) => {
                    warn!(guest_id, number, capacity = table.capacity, "Table over capacity, unassigning guest");
                    self.guests[gi].table = None;
                }
                None => {
                    warn!(guest_id, number, "Guest referenced missing table, unassigning");
                    self.guests[gi].table = None;
                }
            }
        }
    }

    // ========== Internal helpers ==========

    fn guest_index(&self, guest_id: i64) -> Option<usize> {
        self.guests.iter().position(|g| g.id == guest_id)
    }

    fn table_index(&self, table_id: i64) -> Option<usize> {
        self.tables.iter().position(|t| t.id == table_id)
    }

    fn table_index_by_number(&self, number: u32) -> Option<usize> {
        self.tables.iter().position(|t| t.number == number)
    }

    fn fixture_index(&self, fixture_id: i64) -> Option<usize> {
        self.fixtures.iter().position(|f| f.id == fixture_id)
    }

    fn group_index(&self, group_id: i64) -> Option<usize> {
        self.groups.iter().position(|g| g.id == group_id)
    }

    /// Fresh id not used by any entity in the plan
    fn next_id(&self) -> i64 {
        loop {
            let id = snowflake_id();
            let taken = self.guests.iter().any(|g| g.id == id)
                || self.tables.iter().any(|t| t.id == id)
                || self.fixtures.iter().any(|f| f.id == id)
                || self.groups.iter().any(|g| g.id == id);
            if !taken {
                return id;
            }
        }
    }

    /// Smallest positive table number not currently in use
    fn next_table_number(&self) -> u32 {
        let used: BTreeSet<u32> = self.tables.iter().map(|t| t.number).collect();
        (1..).find(|n| !used.contains(n)).unwrap_or(1)
    }

    fn snap_point(&self, x: f64, y: f64) -> (f64, f64) {
        layout::snap_point(x, y, &self.room)
    }

    /// Check that `guest_idx` can be seated at `table_idx` without mutating
    fn check_seat(&self, guest_idx: usize, table_idx: usize) -> SeatingResult<()> {
        let table = &self.tables[table_idx];
        if self.guests[guest_idx].table == Some(table.number) {
            return Ok(());
        }
        if table.is_full() {
            return Err(SeatingError::CapacityExceeded {
                table_number: table.number,
                capacity: table.capacity,
            });
        }
        Ok(())
    }

    /// Seat a guest, moving it out of its previous table. The only writer of
    /// table membership together with [`Self::release`].
    fn seat(&mut self, guest_idx: usize, table_idx: usize) -> SeatingResult<()> {
        self.check_seat(guest_idx, table_idx)?;
        let number = self.tables[table_idx].number;
        if self.guests[guest_idx].table == Some(number) {
            return Ok(());
        }
        self.release(guest_idx);
        let guest = &mut self.guests[guest_idx];
        self.tables[table_idx].guests.insert(guest.id);
        guest.table = Some(number);
        Ok(())
    }

    /// Unseat a guest; returns the table number it was released from
    fn release(&mut self, guest_idx: usize) -> Option<u32> {
        let guest = &mut self.guests[guest_idx];
        let number = guest.table.take()?;
        if let Some(table) = self.tables.iter_mut().find(|t| t.number == number) {
            table.guests.remove(&guest.id);
        }
        Some(number)
    }
}
