use super::{SeatingError, SeatingModel, SeatingResult};
use shared::models::RoomSettings;
use tracing::info;
use validator::Validate;

impl SeatingModel {
    /// Replace the room settings
    ///
    /// Stored coordinates are left as they are; a new grid size only affects
    /// later mutations.
    pub fn update_room_settings(&mut self, settings: RoomSettings) -> SeatingResult<()> {
        settings
            .validate()
            .map_err(|e| SeatingError::InvalidRoomSettings(e.to_string()))?;
        let dims = [settings.width, settings.height, settings.grid_size, settings.scale];
        if !dims.iter().all(|v| v.is_finite()) {
            return Err(SeatingError::InvalidRoomSettings(format!(
                "non-finite dimension in {dims:?}"
            )));
        }
        info!(
            width = settings.width,
            height = settings.height,
            grid_size = settings.grid_size,
            snap_to_grid = settings.snap_to_grid,
            "Room settings updated"
        );
        self.room = settings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TableShape;

    #[test]
    fn test_settings_change_does_not_resnap() {
        let mut m = SeatingModel::new(RoomSettings {
            snap_to_grid: false,
            ..Default::default()
        });
        let t = m.add_table(TableShape::Round).unwrap();
        m.update_table_position(t.id, 23.0, 47.0).unwrap();

        m.update_room_settings(RoomSettings {
            snap_to_grid: true,
            grid_size: 20.0,
            ..Default::default()
        })
        .unwrap();
        let stored = m.table(t.id).unwrap();
        assert_eq!((stored.x, stored.y), (23.0, 47.0));

        m.update_table_position(t.id, 23.0, 47.0).unwrap();
        let stored = m.table(t.id).unwrap();
        assert_eq!((stored.x, stored.y), (20.0, 40.0));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut m = SeatingModel::default();
        let err = m
            .update_room_settings(RoomSettings {
                grid_size: 0.0,
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, SeatingError::InvalidRoomSettings(_)));
        assert_eq!(m.room(), &RoomSettings::default());
    }

    #[test]
    fn test_non_finite_settings_rejected() {
        let mut m = SeatingModel::default();
        for settings in [
            RoomSettings {
                width: f64::NAN,
                ..Default::default()
            },
            RoomSettings {
                grid_size: f64::INFINITY,
                ..Default::default()
            },
        ] {
            let err = m.update_room_settings(settings).unwrap_err();
            assert!(matches!(err, SeatingError::InvalidRoomSettings(_)));
        }
        assert_eq!(m.room(), &RoomSettings::default());
    }
}
