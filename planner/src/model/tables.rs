//! Table operations: creation, geometry, deletion and guest assignment

use super::{SeatingError, SeatingModel, SeatingResult};
use crate::layout::{normalize_rotation, snap_size};
use crate::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use serde::{Deserialize, Serialize};
use shared::models::{DiningTable, DiningTableCreate, TableShape};
use tracing::{debug, info, warn};
use validator::Validate;

/// Where new tables land when the caller gives no position
pub const DEFAULT_TABLE_ANCHOR: (f64, f64) = (100.0, 100.0);

/// Derived occupancy of one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub count: usize,
    pub capacity: u32,
    pub is_full: bool,
}

impl SeatingModel {
    /// Add a table from a preset (or bare shape)
    ///
    /// The table gets the smallest unused positive number and is named
    /// `Table n`; the preset name is only the palette label. Position and size
    /// are snapped when snap-to-grid is on.
    pub fn add_table(&mut self, create: impl Into<DiningTableCreate>) -> SeatingResult<DiningTable> {
        let DiningTableCreate { preset, position } = create.into();
        preset.validate()?;

        // range() lets NaN and infinity through
        if !(preset.width.is_finite() && preset.height.is_finite()) {
            return Err(SeatingError::InvalidGeometry(format!(
                "size {}x{}",
                preset.width, preset.height
            )));
        }
        let (x, y) = position.unwrap_or(DEFAULT_TABLE_ANCHOR);
        if !(x.is_finite() && y.is_finite()) {
            return Err(SeatingError::InvalidGeometry(format!("position ({x}, {y})")));
        }
        let (x, y) = self.snap_point(x, y);
        let (width, height) = snap_size(preset.width, preset.height, &self.room);
        let number = self.next_table_number();

        let table = DiningTable {
            id: self.next_id(),
            number,
            name: format!("Table {number}"),
            x,
            y,
            width,
            height,
            capacity: preset.capacity,
            shape: preset.shape,
            rotation: 0.0,
            locked: false,
            notes: None,
            guests: Default::default(),
        };

        info!(
            table_id = table.id,
            number,
            capacity = table.capacity,
            shape = ?table.shape,
            preset = %preset.name,
            "Table added"
        );
        self.tables.push(table.clone());
        Ok(table)
    }

    /// Remove a table, releasing every guest seated at it
    ///
    /// Unknown ids are a no-op and return `None`.
    pub fn delete_table(&mut self, table_id: i64) -> Option<DiningTable> {
        let idx = self.table_index(table_id)?;
        let number = self.tables[idx].number;

        let released: Vec<usize> = self
            .guests
            .iter()
            .enumerate()
            .filter(|(_, g)| g.table == Some(number))
            .map(|(i, _)| i)
            .collect();
        for gi in &released {
            self.release(*gi);
        }

        let table = self.tables.remove(idx);
        info!(
            table_id,
            number,
            released = released.len(),
            "Table deleted"
        );
        Some(table)
    }

    /// Move a table; returns `false` when the table is locked
    pub fn update_table_position(&mut self, table_id: i64, x: f64, y: f64) -> SeatingResult<bool> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(SeatingError::InvalidGeometry(format!("position ({x}, {y})")));
        }
        let idx = self
            .table_index(table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;
        if self.tables[idx].locked {
            debug!(table_id, "Table locked, position unchanged");
            return Ok(false);
        }
        let (sx, sy) = self.snap_point(x, y);
        let table = &mut self.tables[idx];
        table.x = sx;
        table.y = sy;
        debug!(table_id, x = sx, y = sy, "Table moved");
        Ok(true)
    }

    /// Resize a table; returns `false` when the table is locked
    pub fn update_table_size(&mut self, table_id: i64, width: f64, height: f64) -> SeatingResult<bool> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SeatingError::InvalidGeometry(format!("size {width}x{height}")));
        }
        let idx = self
            .table_index(table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;
        if self.tables[idx].locked {
            debug!(table_id, "Table locked, size unchanged");
            return Ok(false);
        }
        let (w, h) = snap_size(width, height, &self.room);
        let table = &mut self.tables[idx];
        table.width = w;
        table.height = h;
        debug!(table_id, width = w, height = h, "Table resized");
        Ok(true)
    }

    /// Rotate a table (degrees); returns `false` when the table is locked
    pub fn update_table_rotation(&mut self, table_id: i64, degrees: f64) -> SeatingResult<bool> {
        if !degrees.is_finite() {
            return Err(SeatingError::InvalidGeometry(format!("rotation {degrees}")));
        }
        let idx = self
            .table_index(table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;
        if self.tables[idx].locked {
            debug!(table_id, "Table locked, rotation unchanged");
            return Ok(false);
        }
        self.tables[idx].rotation = normalize_rotation(degrees);
        Ok(true)
    }

    /// Flip the locked flag; returns the new state
    pub fn toggle_table_lock(&mut self, table_id: i64) -> SeatingResult<bool> {
        let idx = self
            .table_index(table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;
        let table = &mut self.tables[idx];
        table.locked = !table.locked;
        debug!(table_id, locked = table.locked, "Table lock toggled");
        Ok(table.locked)
    }

    pub fn rename_table(&mut self, table_id: i64, name: &str) -> SeatingResult<()> {
        validate_required_text(name, "table name", MAX_NAME_LEN)?;
        let idx = self
            .table_index(table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;
        self.tables[idx].name = name.trim().to_string();
        Ok(())
    }

    pub fn set_table_notes(&mut self, table_id: i64, notes: Option<String>) -> SeatingResult<()> {
        validate_optional_text(&notes, "table notes", MAX_NOTE_LEN)?;
        let idx = self
            .table_index(table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;
        self.tables[idx].notes = notes.filter(|n| !n.trim().is_empty());
        Ok(())
    }

    pub fn set_table_shape(&mut self, table_id: i64, shape: TableShape) -> SeatingResult<()> {
        let idx = self
            .table_index(table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;
        self.tables[idx].shape = shape;
        Ok(())
    }

    /// Change capacity; it may not drop below the current occupancy
    pub fn set_table_capacity(&mut self, table_id: i64, capacity: u32) -> SeatingResult<()> {
        if capacity == 0 {
            return Err(SeatingError::Validation(
                "capacity must be a positive integer".to_string(),
            ));
        }
        let idx = self
            .table_index(table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;
        let table = &mut self.tables[idx];
        if table.guests.len() > capacity as usize {
            warn!(
                table_id,
                occupancy = table.guests.len(),
                capacity,
                "Refusing capacity below occupancy"
            );
            return Err(SeatingError::CapacityExceeded {
                table_number: table.number,
                capacity,
            });
        }
        table.capacity = capacity;
        Ok(())
    }

    /// Seat a guest at a table
    ///
    /// Refuses with `CapacityExceeded` (state unchanged) when the table is
    /// full. A guest already seated elsewhere is moved in one step.
    pub fn assign_guest_to_table(&mut self, guest_id: i64, table_id: i64) -> SeatingResult<()> {
        let gi = self
            .guest_index(guest_id)
            .ok_or(SeatingError::GuestNotFound(guest_id))?;
        let ti = self
            .table_index(table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;

        let from = self.guests[gi].table;
        if let Err(e) = self.seat(gi, ti) {
            warn!(guest_id, table_id, error = %e, "Assignment refused");
            return Err(e);
        }
        info!(
            guest_id,
            from = ?from,
            to = self.tables[ti].number,
            "Guest assigned"
        );
        Ok(())
    }

    /// Seat a guest by table number (import shorthand, guest patches)
    pub fn assign_guest_to_table_number(&mut self, guest_id: i64, number: u32) -> SeatingResult<()> {
        let table_id = self
            .table_by_number(number)
            .map(|t| t.id)
            .ok_or(SeatingError::TableNumberNotFound(number))?;
        self.assign_guest_to_table(guest_id, table_id)
    }

    /// Unseat a guest; returns the table number it left, if any
    pub fn unassign_guest(&mut self, guest_id: i64) -> SeatingResult<Option<u32>> {
        let gi = self
            .guest_index(guest_id)
            .ok_or(SeatingError::GuestNotFound(guest_id))?;
        let from = self.release(gi);
        if let Some(number) = from {
            info!(guest_id, from = number, "Guest unassigned");
        }
        Ok(from)
    }

    pub fn compute_table_occupancy(&self, table_id: i64) -> SeatingResult<Occupancy> {
        let table = self
            .table(table_id)
            .ok_or(SeatingError::TableNotFound(table_id))?;
        Ok(Occupancy {
            count: table.occupancy(),
            capacity: table.capacity,
            is_full: table.is_full(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{RoomSettings, TablePreset};

    fn model() -> SeatingModel {
        SeatingModel::new(RoomSettings::default())
    }

    #[test]
    fn test_add_table_defaults() {
        let mut m = model();
        let t = m.add_table(TableShape::Round).unwrap();
        assert_eq!(t.number, 1);
        assert_eq!(t.name, "Table 1");
        assert_eq!((t.x, t.y), DEFAULT_TABLE_ANCHOR);
        assert_eq!(t.capacity, 8);
        assert!(t.guests.is_empty());
        assert_eq!(m.tables().len(), 1);
    }

    #[test]
    fn test_add_table_snaps_position() {
        let mut m = model();
        let t = m
            .add_table(DiningTableCreate {
                preset: TablePreset::round_10(),
                position: Some((233.0, 119.0)),
            })
            .unwrap();
        assert_eq!((t.x, t.y), (240.0, 120.0));
        assert_eq!(t.capacity, 10);
    }

    #[test]
    fn test_add_table_rejects_zero_capacity() {
        let mut m = model();
        let preset = TablePreset {
            capacity: 0,
            ..TablePreset::round_8()
        };
        let err = m.add_table(preset).unwrap_err();
        assert!(matches!(err, SeatingError::Validation(_)));
        assert!(m.tables().is_empty());
    }

    #[test]
    fn test_table_numbers_reuse_smallest_gap() {
        let mut m = model();
        let t1 = m.add_table(TableShape::Round).unwrap();
        let t2 = m.add_table(TableShape::Round).unwrap();
        let t3 = m.add_table(TableShape::Round).unwrap();
        assert_eq!((t1.number, t2.number, t3.number), (1, 2, 3));

        m.delete_table(t2.id);
        let t4 = m.add_table(TableShape::Rectangular).unwrap();
        assert_eq!(t4.number, 2);
        let t5 = m.add_table(TableShape::Rectangular).unwrap();
        assert_eq!(t5.number, 4);
    }

    #[test]
    fn test_locked_table_refuses_geometry() {
        let mut m = model();
        let t = m.add_table(TableShape::Round).unwrap();
        assert!(m.toggle_table_lock(t.id).unwrap());

        assert!(!m.update_table_position(t.id, 400.0, 400.0).unwrap());
        assert!(!m.update_table_size(t.id, 300.0, 300.0).unwrap());
        assert!(!m.update_table_rotation(t.id, 45.0).unwrap());
        let stored = m.table(t.id).unwrap();
        assert_eq!((stored.x, stored.y), (t.x, t.y));
        assert_eq!((stored.width, stored.height), (t.width, t.height));
        assert_eq!(stored.rotation, 0.0);

        assert!(!m.toggle_table_lock(t.id).unwrap());
        assert!(m.update_table_position(t.id, 400.0, 400.0).unwrap());
        assert_eq!(m.table(t.id).unwrap().x, 400.0);
    }

    #[test]
    fn test_position_and_size_snap() {
        let mut m = model();
        let t = m.add_table(TableShape::Round).unwrap();
        m.update_table_position(t.id, 23.0, 47.0).unwrap();
        m.update_table_size(t.id, 131.0, 9.0).unwrap();
        let t = m.table(t.id).unwrap();
        assert_eq!((t.x, t.y), (20.0, 40.0));
        assert_eq!((t.width, t.height), (140.0, 20.0));
    }

    #[test]
    fn test_invalid_size_rejected() {
        let mut m = model();
        let t = m.add_table(TableShape::Round).unwrap();
        assert!(matches!(
            m.update_table_size(t.id, 0.0, 10.0),
            Err(SeatingError::InvalidGeometry(_))
        ));
        assert!(matches!(
            m.update_table_position(t.id, f64::NAN, 10.0),
            Err(SeatingError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_unknown_table_is_not_found() {
        let mut m = model();
        assert_eq!(
            m.update_table_position(99, 1.0, 1.0),
            Err(SeatingError::TableNotFound(99))
        );
        assert!(m.delete_table(99).is_none());
    }

    #[test]
    fn test_set_capacity_below_occupancy_refused() {
        let mut m = model();
        let t = m.add_table(TableShape::Round).unwrap();
        let a = m.add_guest("Alice", None).unwrap().guest;
        let b = m.add_guest("Bob", None).unwrap().guest;
        m.assign_guest_to_table(a.id, t.id).unwrap();
        m.assign_guest_to_table(b.id, t.id).unwrap();

        assert!(matches!(
            m.set_table_capacity(t.id, 1),
            Err(SeatingError::CapacityExceeded { .. })
        ));
        assert_eq!(m.table(t.id).unwrap().capacity, 8);
        m.set_table_capacity(t.id, 2).unwrap();
        assert!(m.compute_table_occupancy(t.id).unwrap().is_full);
        assert!(matches!(
            m.set_table_capacity(t.id, 0),
            Err(SeatingError::Validation(_))
        ));
    }

    #[test]
    fn test_rename_and_notes() {
        let mut m = model();
        let t = m.add_table(TableShape::Round).unwrap();
        m.rename_table(t.id, "  Family  ").unwrap();
        assert_eq!(m.table(t.id).unwrap().name, "Family");
        assert!(m.rename_table(t.id, "   ").is_err());

        m.set_table_notes(t.id, Some("near the stage".into())).unwrap();
        assert_eq!(m.table(t.id).unwrap().notes.as_deref(), Some("near the stage"));
        m.set_table_notes(t.id, Some(" ".into())).unwrap();
        assert_eq!(m.table(t.id).unwrap().notes, None);
    }

    #[test]
    fn test_occupancy() {
        let mut m = model();
        let t = m.add_table(TableShape::Round).unwrap();
        let g = m.add_guest("Alice", None).unwrap().guest;
        m.assign_guest_to_table(g.id, t.id).unwrap();
        assert_eq!(
            m.compute_table_occupancy(t.id).unwrap(),
            Occupancy {
                count: 1,
                capacity: 8,
                is_full: false
            }
        );
        assert_eq!(
            m.compute_table_occupancy(12345),
            Err(SeatingError::TableNotFound(12345))
        );
    }

    #[test]
    fn test_add_table_rejects_non_finite_size() {
        let mut m = SeatingModel::new(RoomSettings {
            snap_to_grid: false,
            ..Default::default()
        });
        let preset = TablePreset {
            width: f64::NAN,
            ..TablePreset::round_8()
        };
        assert!(matches!(
            m.add_table(preset),
            Err(SeatingError::InvalidGeometry(_))
        ));
        let preset = TablePreset {
            height: f64::INFINITY,
            ..TablePreset::round_8()
        };
        assert!(matches!(
            m.add_table(preset),
            Err(SeatingError::InvalidGeometry(_))
        ));
        assert!(m.tables().is_empty());
    }

    #[test]
    fn test_preset_name_is_palette_label_only() {
        let mut m = model();
        let t = m.add_table(TablePreset::round_10()).unwrap();
        assert_eq!(t.name, "Table 1");
        assert_eq!(t.capacity, 10);

        let unnamed = TablePreset {
            name: String::new(),
            ..TablePreset::round_10()
        };
        assert!(matches!(
            m.add_table(unnamed),
            Err(SeatingError::Validation(_))
        ));
    }
}
