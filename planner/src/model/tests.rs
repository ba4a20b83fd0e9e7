//! Cross-operation property tests for the seating model

use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::models::{DiningTableCreate, GuestPatch, TablePreset, TableShape};

fn preset(capacity: u32) -> DiningTableCreate {
    TablePreset {
        capacity,
        ..TablePreset::round_8()
    }
    .into()
}

fn assert_consistent(m: &SeatingModel) {
    let issues = m.verify_consistency();
    assert!(issues.is_empty(), "inconsistent model: {issues:?}");
    for table in m.tables() {
        assert!(table.guests.len() <= table.capacity as usize);
    }
}

#[test]
fn test_capacity_two_table_number_five() {
    let mut m = SeatingModel::default();
    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(m.add_table(preset(2)).unwrap().id);
    }
    for id in &ids[..4] {
        m.delete_table(*id);
    }
    let table = m.table(ids[4]).unwrap().clone();
    assert_eq!(table.number, 5);
    assert_eq!(m.tables().len(), 1);

    let alice = m.add_guest("Alice", None).unwrap().guest;
    let bob = m.add_guest("Bob", None).unwrap().guest;
    let carol = m.add_guest("Carol", None).unwrap().guest;

    m.assign_guest_to_table(alice.id, table.id).unwrap();
    assert_eq!(m.table(table.id).unwrap().guests, BTreeSet::from([alice.id]));

    m.assign_guest_to_table(bob.id, table.id).unwrap();
    assert_eq!(
        m.table(table.id).unwrap().guests,
        BTreeSet::from([alice.id, bob.id])
    );

    let before = m.clone();
    assert_eq!(
        m.assign_guest_to_table(carol.id, table.id),
        Err(SeatingError::CapacityExceeded {
            table_number: 5,
            capacity: 2
        })
    );
    assert_eq!(m, before);
    assert_eq!(m.guest(carol.id).unwrap().table, None);
    assert_consistent(&m);
}

#[test]
fn test_reassign_moves_exactly_one() {
    let mut m = SeatingModel::default();
    let a = m.add_table(preset(4)).unwrap();
    let b = m.add_table(preset(4)).unwrap();
    let g = m.add_guest("Dana", Some(a.number)).unwrap().guest;
    let other = m.add_guest("Eli", Some(a.number)).unwrap().guest;

    m.assign_guest_to_table(g.id, b.id).unwrap();
    assert_eq!(m.table(a.id).unwrap().guests, BTreeSet::from([other.id]));
    assert_eq!(m.table(b.id).unwrap().guests, BTreeSet::from([g.id]));
    assert_eq!(m.guest(g.id).unwrap().table, Some(b.number));
    assert_consistent(&m);
}

#[test]
fn test_reassign_to_same_table_is_noop() {
    let mut m = SeatingModel::default();
    let t = m.add_table(preset(1)).unwrap();
    let g = m.add_guest("Finn", Some(t.number)).unwrap().guest;

    // Full, but the guest is already there
    let before = m.clone();
    m.assign_guest_to_table(g.id, t.id).unwrap();
    assert_eq!(m, before);
}

#[test]
fn test_delete_table_releases_guests() {
    let mut m = SeatingModel::default();
    let t = m.add_table(preset(3)).unwrap();
    let keep = m.add_table(preset(3)).unwrap();
    let seated: Vec<i64> = ["Gus", "Hana", "Ivy"]
        .iter()
        .map(|n| m.add_guest(n, Some(t.number)).unwrap().guest.id)
        .collect();
    let elsewhere = m.add_guest("Jude", Some(keep.number)).unwrap().guest;

    let removed = m.delete_table(t.id).unwrap();
    assert_eq!(removed.guests.len(), 3);
    for id in seated {
        assert_eq!(m.guest(id).unwrap().table, None);
    }
    assert_eq!(m.guest(elsewhere.id).unwrap().table, Some(keep.number));
    assert_eq!(m.guests().len(), 4);
    assert_consistent(&m);
}

#[test]
fn test_unassign_guest() {
    let mut m = SeatingModel::default();
    let t = m.add_table(preset(2)).unwrap();
    let g = m.add_guest("Kai", Some(t.number)).unwrap().guest;

    assert_eq!(m.unassign_guest(g.id).unwrap(), Some(t.number));
    assert_eq!(m.unassign_guest(g.id).unwrap(), None);
    assert!(m.table(t.id).unwrap().guests.is_empty());
    assert_eq!(m.unassigned_guests().len(), 1);
    assert_eq!(m.unassign_guest(404), Err(SeatingError::GuestNotFound(404)));
}

#[test]
fn test_snapshot_roundtrip() {
    let mut m = SeatingModel::default();
    let t = m.add_table(TableShape::Rectangular).unwrap();
    let a = m.add_guest("Lena", Some(t.number)).unwrap().guest;
    let group = m.add_group("Work", None).unwrap();
    m.update_guest_fields(
        a.id,
        GuestPatch {
            group_id: Some(Some(group.id)),
            ..Default::default()
        },
    )
    .unwrap();

    let snapshot = m.snapshot();
    assert!(snapshot.verify_checksum());
    let restored = SeatingModel::from_snapshot(snapshot);
    assert_eq!(restored, m);
}

#[test]
fn test_from_snapshot_repairs() {
    let mut m = SeatingModel::default();
    let t = m.add_table(preset(2)).unwrap();
    let g1 = m.add_guest("Mia", None).unwrap().guest;
    let g2 = m.add_guest("Noah", None).unwrap().guest;
    let g3 = m.add_guest("Omar", None).unwrap().guest;

    let mut snapshot = m.snapshot();
    // Corrupt: three guests on a two-seat table, a stale member, a guest on a
    // missing table and dangling references
    for guest in &mut snapshot.guests {
        guest.table = Some(t.number);
    }
    snapshot.tables[0].guests.insert(999);
    let ghost = snapshot.guests.iter_mut().find(|g| g.id == g1.id).unwrap();
    ghost.partner_id = Some(12345);
    ghost.keep_apart.insert(54321);
    ghost.group_id = Some(777);
    let mut stray = Guest::new(g3.id + 1_000_000, "Pia");
    stray.table = Some(42);
    snapshot.guests.push(stray.clone());

    let restored = SeatingModel::from_snapshot(snapshot);
    assert!(restored.verify_consistency().is_empty());

    let mut by_id: Vec<i64> = [g1.id, g2.id, g3.id].to_vec();
    by_id.sort_unstable();
    let table = restored.table(t.id).unwrap();
    assert_eq!(table.guests, BTreeSet::from([by_id[0], by_id[1]]));
    assert_eq!(restored.guest(by_id[2]).unwrap().table, None);
    assert_eq!(restored.guest(stray.id).unwrap().table, None);

    let ghost = restored.guest(g1.id).unwrap();
    assert_eq!(ghost.partner_id, None);
    assert!(ghost.keep_apart.is_empty());
    assert_eq!(ghost.group_id, None);
}

#[test]
fn test_from_snapshot_drops_duplicate_table_numbers() {
    let mut m = SeatingModel::default();
    m.add_table(preset(2)).unwrap();
    let second = m.add_table(preset(2)).unwrap();

    let mut snapshot = m.snapshot();
    snapshot.tables[1].number = 1;
    let restored = SeatingModel::from_snapshot(snapshot);
    assert_eq!(restored.tables().len(), 1);
    assert!(restored.table(second.id).is_none());
    assert!(restored.verify_consistency().is_empty());
}

#[test]
fn test_random_operations_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut m = SeatingModel::default();

    for step in 0..600 {
        let table_ids: Vec<i64> = m.tables().iter().map(|t| t.id).collect();
        let guest_ids: Vec<i64> = m.guests().iter().map(|g| g.id).collect();
        let pick_table = |rng: &mut StdRng| -> Option<i64> {
            (!table_ids.is_empty()).then(|| table_ids[rng.gen_range(0..table_ids.len())])
        };
        let pick_guest = |rng: &mut StdRng| -> Option<i64> {
            (!guest_ids.is_empty()).then(|| guest_ids[rng.gen_range(0..guest_ids.len())])
        };

        match rng.gen_range(0..8) {
            0 => {
                m.add_table(preset(rng.gen_range(1..5))).unwrap();
            }
            1 => {
                if rng.gen_bool(0.3)
                    && let Some(t) = pick_table(&mut rng)
                {
                    m.delete_table(t);
                }
            }
            2 => {
                let number = rng.gen_bool(0.5).then(|| rng.gen_range(1..6));
                m.add_guest(&format!("Guest {step}"), number).unwrap();
            }
            3 => {
                if rng.gen_bool(0.2)
                    && let Some(g) = pick_guest(&mut rng)
                {
                    m.remove_guest(g);
                }
            }
            4 | 5 => {
                if let (Some(g), Some(t)) = (pick_guest(&mut rng), pick_table(&mut rng)) {
                    let before = m.clone();
                    let full = m.table(t).unwrap().is_full()
                        && m.guest(g).unwrap().table != Some(m.table(t).unwrap().number);
                    let result = m.assign_guest_to_table(g, t);
                    if full {
                        assert!(matches!(result, Err(SeatingError::CapacityExceeded { .. })));
                        assert_eq!(m, before);
                    } else {
                        assert!(result.is_ok());
                    }
                }
            }
            6 => {
                if let Some(g) = pick_guest(&mut rng) {
                    m.unassign_guest(g).unwrap();
                }
            }
            _ => {
                if let Some(g) = pick_guest(&mut rng) {
                    let table = rng.gen_bool(0.7).then(|| rng.gen_range(1..6));
                    let _ = m.update_guest_fields(
                        g,
                        GuestPatch {
                            table: Some(table),
                            ..Default::default()
                        },
                    );
                }
            }
        }
        assert_consistent(&m);
    }
}
