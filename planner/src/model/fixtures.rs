//! Fixture operations
//!
//! Same lock and snapping rules as tables; fixtures never hold guests.

use super::{SeatingError, SeatingModel, SeatingResult};
use crate::layout::{normalize_rotation, snap_size};
use crate::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text};
use shared::models::{Fixture, FixtureKind};
use tracing::{debug, info};

impl SeatingModel {
    /// Place a fixture at a (snapped) position with its kind's (snapped) default size
    pub fn add_fixture(&mut self, kind: FixtureKind, x: f64, y: f64) -> SeatingResult<Fixture> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(SeatingError::InvalidGeometry(format!("position ({x}, {y})")));
        }
        let (width, height) = kind.default_size();
        let (width, height) = snap_size(width, height, &self.room);
        let (x, y) = self.snap_point(x, y);
        let fixture = Fixture {
            id: self.next_id(),
            kind,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            locked: false,
            label: None,
            color: None,
        };
        info!(fixture_id = fixture.id, kind = ?kind, x = fixture.x, y = fixture.y, "Fixture added");
        self.fixtures.push(fixture.clone());
        Ok(fixture)
    }

    pub fn delete_fixture(&mut self, fixture_id: i64) -> Option<Fixture> {
        let idx = self.fixture_index(fixture_id)?;
        let fixture = self.fixtures.remove(idx);
        info!(fixture_id, kind = ?fixture.kind, "Fixture deleted");
        Some(fixture)
    }

    /// Move a fixture; returns `false` when it is locked
    pub fn update_fixture_position(&mut self, fixture_id: i64, x: f64, y: f64) -> SeatingResult<bool> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(SeatingError::InvalidGeometry(format!("position ({x}, {y})")));
        }
        let idx = self
            .fixture_index(fixture_id)
            .ok_or(SeatingError::FixtureNotFound(fixture_id))?;
        if self.fixtures[idx].locked {
            return Ok(false);
        }
        let (sx, sy) = self.snap_point(x, y);
        let fixture = &mut self.fixtures[idx];
        fixture.x = sx;
        fixture.y = sy;
        debug!(fixture_id, x = sx, y = sy, "Fixture moved");
        Ok(true)
    }

    /// Resize a fixture; returns `false` when it is locked
    pub fn update_fixture_size(&mut self, fixture_id: i64, width: f64, height: f64) -> SeatingResult<bool> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SeatingError::InvalidGeometry(format!("size {width}x{height}")));
        }
        let idx = self
            .fixture_index(fixture_id)
            .ok_or(SeatingError::FixtureNotFound(fixture_id))?;
        if self.fixtures[idx].locked {
            return Ok(false);
        }
        let (w, h) = snap_size(width, height, &self.room);
        let fixture = &mut self.fixtures[idx];
        fixture.width = w;
        fixture.height = h;
        debug!(fixture_id, width = w, height = h, "Fixture resized");
        Ok(true)
    }

    /// Rotate a fixture; returns `false` when it is locked
    pub fn update_fixture_rotation(&mut self, fixture_id: i64, degrees: f64) -> SeatingResult<bool> {
        if !degrees.is_finite() {
            return Err(SeatingError::InvalidGeometry(format!("rotation {degrees}")));
        }
        let idx = self
            .fixture_index(fixture_id)
            .ok_or(SeatingError::FixtureNotFound(fixture_id))?;
        if self.fixtures[idx].locked {
            return Ok(false);
        }
        self.fixtures[idx].rotation = normalize_rotation(degrees);
        Ok(true)
    }

    /// Flip the locked flag; returns the new state
    pub fn toggle_fixture_lock(&mut self, fixture_id: i64) -> SeatingResult<bool> {
        let idx = self
            .fixture_index(fixture_id)
            .ok_or(SeatingError::FixtureNotFound(fixture_id))?;
        let fixture = &mut self.fixtures[idx];
        fixture.locked = !fixture.locked;
        Ok(fixture.locked)
    }

    pub fn set_fixture_label(&mut self, fixture_id: i64, label: Option<String>) -> SeatingResult<()> {
        validate_optional_text(&label, "fixture label", MAX_NAME_LEN)?;
        let idx = self
            .fixture_index(fixture_id)
            .ok_or(SeatingError::FixtureNotFound(fixture_id))?;
        self.fixtures[idx].label = label.filter(|l| !l.trim().is_empty());
        Ok(())
    }

    pub fn set_fixture_color(&mut self, fixture_id: i64, color: Option<String>) -> SeatingResult<()> {
        validate_optional_text(&color, "fixture color", MAX_SHORT_TEXT_LEN)?;
        let idx = self
            .fixture_index(fixture_id)
            .ok_or(SeatingError::FixtureNotFound(fixture_id))?;
        self.fixtures[idx].color = color.filter(|c| !c.trim().is_empty());
        Ok(())
    }
}
