//! Advisory reports and the invariant check
//!
//! Nothing here mutates or refuses anything: keep-apart, partners and
//! overlap are annotations the UI highlights.

use super::SeatingModel;
use crate::layout::Rect;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Two guests at the same table where one asked to be kept apart from the other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeepApartConflict {
    pub guest_id: i64,
    pub other_id: i64,
    pub table_number: u32,
}

/// Something placed (partly) outside the room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum OutOfRoom {
    Table(i64),
    Fixture(i64),
}

/// A broken invariant found by [`SeatingModel::verify_consistency`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ConsistencyIssue {
    OverCapacity {
        table_number: u32,
        occupancy: usize,
        capacity: u32,
    },
    DuplicateTableNumber(u32),
    UnknownTable {
        guest_id: i64,
        table_number: u32,
    },
    MissingMember {
        guest_id: i64,
        table_number: u32,
    },
    StaleMember {
        table_number: u32,
        guest_id: i64,
    },
    DanglingPartner {
        guest_id: i64,
        partner_id: i64,
    },
    DanglingKeepApart {
        guest_id: i64,
        other_id: i64,
    },
    DanglingGroup {
        guest_id: i64,
        group_id: i64,
    },
}

impl SeatingModel {
    pub fn keep_apart_conflicts(&self) -> Vec<KeepApartConflict> {
        let seats: HashMap<i64, u32> = self
            .guests
            .iter()
            .filter_map(|g| g.table.map(|n| (g.id, n)))
            .collect();

        let mut conflicts = Vec::new();
        for guest in &self.guests {
            let Some(number) = guest.table else {
                continue;
            };
            for other in &guest.keep_apart {
                if seats.get(other) == Some(&number) {
                    conflicts.push(KeepApartConflict {
                        guest_id: guest.id,
                        other_id: *other,
                        table_number: number,
                    });
                }
            }
        }
        conflicts
    }

    /// Partner pairs (as listed by the first guest) seated at different
    /// tables, or with only one of them seated
    pub fn separated_partners(&self) -> Vec<(i64, i64)> {
        self.guests
            .iter()
            .filter_map(|g| {
                let partner = self.guest(g.partner_id?)?;
                let together = g.table.is_some() && g.table == partner.table;
                let both_unseated = g.table.is_none() && partner.table.is_none();
                (!together && !both_unseated).then_some((g.id, partner.id))
            })
            .collect()
    }

    /// Pairs of table numbers whose bounding boxes overlap
    ///
    /// Empty when the room allows overlap.
    pub fn overlapping_tables(&self) -> Vec<(u32, u32)> {
        if self.room.allow_overlap {
            return Vec::new();
        }
        let mut pairs = Vec::new();
        for (i, a) in self.tables.iter().enumerate() {
            let ra = Rect::from(a);
            for b in &self.tables[i + 1..] {
                if ra.overlaps(&Rect::from(b)) {
                    pairs.push((a.number.min(b.number), a.number.max(b.number)));
                }
            }
        }
        pairs.sort_unstable();
        pairs
    }

    /// Tables and fixtures whose bounding box leaves the room
    pub fn items_outside_room(&self) -> Vec<OutOfRoom> {
        let (w, h) = (self.room.width, self.room.height);
        let tables = self
            .tables
            .iter()
            .filter(|t| !Rect::from(*t).within(w, h))
            .map(|t| OutOfRoom::Table(t.id));
        let fixtures = self
            .fixtures
            .iter()
            .filter(|f| !Rect::from(*f).within(w, h))
            .map(|f| OutOfRoom::Fixture(f.id));
        tables.chain(fixtures).collect()
    }

    /// Re-check every model invariant; empty means consistent
    pub fn verify_consistency(&self) -> Vec<ConsistencyIssue> {
        let mut issues = Vec::new();

        let mut numbers = HashSet::new();
        for table in &self.tables {
            if !numbers.insert(table.number) {
                issues.push(ConsistencyIssue::DuplicateTableNumber(table.number));
            }
            if table.guests.len() > table.capacity as usize {
                issues.push(ConsistencyIssue::OverCapacity {
                    table_number: table.number,
                    occupancy: table.guests.len(),
                    capacity: table.capacity,
                });
            }
            for guest_id in &table.guests {
                let seated_here = self
                    .guest(*guest_id)
                    .is_some_and(|g| g.table == Some(table.number));
                if !seated_here {
                    issues.push(ConsistencyIssue::StaleMember {
                        table_number: table.number,
                        guest_id: *guest_id,
                    });
                }
            }
        }

        for guest in &self.guests {
            if let Some(number) = guest.table {
                match self.table_by_number(number) {
                    None => issues.push(ConsistencyIssue::UnknownTable {
                        guest_id: guest.id,
                        table_number: number,
                    }),
                    Some(table) if !table.guests.contains(&guest.id) => {
                        issues.push(ConsistencyIssue::MissingMember {
                            guest_id: guest.id,
                            table_number: number,
                        })
                    }
                    Some(_) => {}
                }
            }
            if let Some(partner_id) = guest.partner_id
                && self.guest(partner_id).is_none()
            {
                issues.push(ConsistencyIssue::DanglingPartner {
                    guest_id: guest.id,
                    partner_id,
                });
            }
            for other_id in &guest.keep_apart {
                if self.guest(*other_id).is_none() {
                    issues.push(ConsistencyIssue::DanglingKeepApart {
                        guest_id: guest.id,
                        other_id: *other_id,
                    });
                }
            }
            if let Some(group_id) = guest.group_id
                && self.group(group_id).is_none()
            {
                issues.push(ConsistencyIssue::DanglingGroup {
                    guest_id: guest.id,
                    group_id,
                });
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{DiningTableCreate, FixtureKind, GuestPatch, TablePreset, TableShape};
    use std::collections::BTreeSet;

    #[test]
    fn test_keep_apart_conflict_reported_not_enforced() {
        let mut m = SeatingModel::default();
        let t = m.add_table(TableShape::Round).unwrap();
        let a = m.add_guest("Uncle Joe", None).unwrap().guest;
        let b = m.add_guest("Aunt May", None).unwrap().guest;
        m.update_guest_fields(
            a.id,
            GuestPatch {
                keep_apart: Some(BTreeSet::from([b.id])),
                ..Default::default()
            },
        )
        .unwrap();

        m.assign_guest_to_table(a.id, t.id).unwrap();
        m.assign_guest_to_table(b.id, t.id).unwrap();

        assert_eq!(
            m.keep_apart_conflicts(),
            vec![KeepApartConflict {
                guest_id: a.id,
                other_id: b.id,
                table_number: 1
            }]
        );
    }

    #[test]
    fn test_separated_partners() {
        let mut m = SeatingModel::default();
        let t1 = m.add_table(TableShape::Round).unwrap();
        let t2 = m.add_table(TableShape::Round).unwrap();
        let a = m.add_guest("Alice", None).unwrap().guest;
        let b = m.add_guest("Bob", None).unwrap().guest;
        m.update_guest_fields(
            a.id,
            GuestPatch {
                partner_id: Some(Some(b.id)),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(m.separated_partners().is_empty());

        m.assign_guest_to_table(a.id, t1.id).unwrap();
        assert_eq!(m.separated_partners(), vec![(a.id, b.id)]);

        m.assign_guest_to_table(b.id, t2.id).unwrap();
        assert_eq!(m.separated_partners(), vec![(a.id, b.id)]);

        m.assign_guest_to_table(b.id, t1.id).unwrap();
        assert!(m.separated_partners().is_empty());
    }

    #[test]
    fn test_overlapping_tables() {
        let mut m = SeatingModel::default();
        m.add_table(DiningTableCreate {
            preset: TablePreset::round_8(),
            position: Some((100.0, 100.0)),
        })
        .unwrap();
        m.add_table(DiningTableCreate {
            preset: TablePreset::round_8(),
            position: Some((160.0, 160.0)),
        })
        .unwrap();
        m.add_table(DiningTableCreate {
            preset: TablePreset::round_8(),
            position: Some((600.0, 600.0)),
        })
        .unwrap();
        assert_eq!(m.overlapping_tables(), vec![(1, 2)]);

        let mut room = m.room().clone();
        room.allow_overlap = true;
        m.update_room_settings(room).unwrap();
        assert!(m.overlapping_tables().is_empty());
    }

    #[test]
    fn test_items_outside_room() {
        let mut m = SeatingModel::default();
        let inside = m.add_table(TableShape::Round).unwrap();
        let outside = m
            .add_table(DiningTableCreate {
                preset: TablePreset::round_8(),
                position: Some((1140.0, 100.0)),
            })
            .unwrap();
        let stage = m.add_fixture(FixtureKind::Stage, 0.0, 700.0).unwrap();

        let report = m.items_outside_room();
        assert_eq!(
            report,
            vec![OutOfRoom::Table(outside.id), OutOfRoom::Fixture(stage.id)]
        );
        assert!(!report.contains(&OutOfRoom::Table(inside.id)));
    }
}
