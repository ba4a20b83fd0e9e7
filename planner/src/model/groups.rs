//! Group operations
//!
//! Deleting a group nulls `group_id` on its members; guests are never deleted.

use super::{SeatingError, SeatingModel, SeatingResult};
use crate::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text};
use shared::models::{DEFAULT_GROUP_COLOR, Group, Guest};
use tracing::info;

impl SeatingModel {
    pub fn add_group(&mut self, name: &str, color: Option<String>) -> SeatingResult<Group> {
        validate_required_text(name, "group name", MAX_NAME_LEN)?;
        validate_optional_text(&color, "group color", MAX_SHORT_TEXT_LEN)?;

        let group = Group {
            id: self.next_id(),
            name: name.trim().to_string(),
            color: color
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GROUP_COLOR.to_string()),
        };
        info!(group_id = group.id, name = %group.name, "Group added");
        self.groups.push(group.clone());
        Ok(group)
    }

    pub fn rename_group(&mut self, group_id: i64, name: &str) -> SeatingResult<()> {
        validate_required_text(name, "group name", MAX_NAME_LEN)?;
        let idx = self
            .group_index(group_id)
            .ok_or(SeatingError::GroupNotFound(group_id))?;
        self.groups[idx].name = name.trim().to_string();
        Ok(())
    }

    pub fn set_group_color(&mut self, group_id: i64, color: &str) -> SeatingResult<()> {
        validate_required_text(color, "group color", MAX_SHORT_TEXT_LEN)?;
        let idx = self
            .group_index(group_id)
            .ok_or(SeatingError::GroupNotFound(group_id))?;
        self.groups[idx].color = color.trim().to_string();
        Ok(())
    }

    /// Remove a group, detaching (not deleting) its members
    pub fn delete_group(&mut self, group_id: i64) -> Option<Group> {
        let idx = self.group_index(group_id)?;
        let group = self.groups.remove(idx);

        let mut detached = 0usize;
        for guest in self.guests.iter_mut().filter(|g| g.group_id == Some(group_id)) {
            guest.group_id = None;
            detached += 1;
        }
        info!(group_id, detached, "Group deleted");
        Some(group)
    }

    pub fn group_members(&self, group_id: i64) -> Vec<&Guest> {
        self.guests
            .iter()
            .filter(|g| g.group_id == Some(group_id))
            .collect()
    }
}
