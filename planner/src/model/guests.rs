//! Guest operations: add, remove and field patches

use super::{SeatingError, SeatingModel, SeatingResult};
use crate::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use shared::models::{Guest, GuestPatch};
use tracing::{info, warn};

/// Result of [`SeatingModel::add_guest`]
///
/// The guest is always created. `table_refusal` explains why a requested
/// initial table was not applied (full or unknown number).
#[derive(Debug, Clone, PartialEq)]
pub struct GuestAdded {
    pub guest: Guest,
    pub table_refusal: Option<SeatingError>,
}

impl SeatingModel {
    /// Create a guest, optionally seating it at table number `initial_table`
    ///
    /// A full or unknown table leaves the guest unassigned; creation itself
    /// only fails on an empty name.
    pub fn add_guest(&mut self, name: &str, initial_table: Option<u32>) -> SeatingResult<GuestAdded> {
        validate_required_text(name, "guest name", MAX_NAME_LEN)?;

        let guest = Guest::new(self.next_id(), name.trim());
        let guest_id = guest.id;
        self.guests.push(guest);
        let gi = self.guests.len() - 1;

        let mut table_refusal = None;
        if let Some(number) = initial_table {
            let result = match self.table_index_by_number(number) {
                Some(ti) => self.seat(gi, ti),
                None => Err(SeatingError::TableNumberNotFound(number)),
            };
            if let Err(e) = result {
                warn!(guest_id, number, error = %e, "Requested table unavailable, guest left unassigned");
                table_refusal = Some(e);
            }
        }

        let guest = self.guests[gi].clone();
        info!(guest_id, table = ?guest.table, "Guest added");
        Ok(GuestAdded {
            guest,
            table_refusal,
        })
    }

    /// Delete a guest and every reference to it
    ///
    /// Clears its seat, and any partner / keep-apart entries on other guests
    /// that point at it. Unknown ids are a no-op.
    pub fn remove_guest(&mut self, guest_id: i64) -> Option<Guest> {
        let gi = self.guest_index(guest_id)?;
        self.release(gi);
        let guest = self.guests.remove(gi);

        let mut cleared = 0usize;
        for other in &mut self.guests {
            if other.partner_id == Some(guest_id) {
                other.partner_id = None;
                cleared += 1;
            }
            if other.keep_apart.remove(&guest_id) {
                cleared += 1;
            }
        }

        info!(guest_id, cleared_references = cleared, "Guest removed");
        Some(guest)
    }

    /// Apply a partial update
    ///
    /// Everything is validated first; a table change goes through the same
    /// capacity check as [`Self::assign_guest_to_table`]. If any part is
    /// refused, nothing is applied.
    pub fn update_guest_fields(&mut self, guest_id: i64, patch: GuestPatch) -> SeatingResult<Guest> {
        let gi = self
            .guest_index(guest_id)
            .ok_or(SeatingError::GuestNotFound(guest_id))?;

        // ---- validation (no mutation) ----
        if let Some(name) = &patch.name {
            validate_required_text(name, "guest name", MAX_NAME_LEN)?;
        }
        if let Some(notes) = &patch.notes
            && notes.len() > MAX_NOTE_LEN
        {
            return Err(SeatingError::Validation(format!(
                "guest notes is too long ({} chars, max {MAX_NOTE_LEN})",
                notes.len()
            )));
        }
        if let Some(tags) = &patch.tags {
            for tag in tags {
                validate_required_text(tag, "tag", MAX_SHORT_TEXT_LEN)?;
            }
        }
        if let Some(Some(partner)) = patch.partner_id
            && (partner == guest_id || self.guest_index(partner).is_none())
        {
            return Err(SeatingError::InvalidPartner(partner));
        }
        if let Some(keep_apart) = &patch.keep_apart
            && let Some(bad) = keep_apart
                .iter()
                .find(|id| **id == guest_id || self.guest_index(**id).is_none())
        {
            return Err(SeatingError::InvalidKeepApart(*bad));
        }
        if let Some(Some(group)) = patch.group_id
            && self.group_index(group).is_none()
        {
            return Err(SeatingError::GroupNotFound(group));
        }
        let target_table = match patch.table {
            Some(Some(number)) => {
                let ti = self
                    .table_index_by_number(number)
                    .ok_or(SeatingError::TableNumberNotFound(number))?;
                self.check_seat(gi, ti)?;
                Some(Some(ti))
            }
            Some(None) => Some(None),
            None => None,
        };

        // ---- apply ----
        let guest = &mut self.guests[gi];
        if let Some(name) = patch.name {
            guest.name = name.trim().to_string();
        }
        if let Some(notes) = patch.notes {
            guest.notes = notes;
        }
        if let Some(tags) = patch.tags {
            guest.tags = tags.into_iter().map(|t| t.trim().to_string()).collect();
        }
        if let Some(meal) = patch.meal {
            guest.meal = meal;
        }
        if let Some(dietary) = patch.dietary {
            guest.dietary = dietary;
        }
        if let Some(is_vip) = patch.is_vip {
            guest.is_vip = is_vip;
        }
        if let Some(is_child) = patch.is_child {
            guest.is_child = is_child;
        }
        if let Some(side) = patch.side {
            guest.side = side;
        }
        if let Some(partner) = patch.partner_id {
            guest.partner_id = partner;
        }
        if let Some(group) = patch.group_id {
            guest.group_id = group;
        }
        if let Some(keep_apart) = patch.keep_apart {
            guest.keep_apart = keep_apart;
        }

        match target_table {
            Some(Some(ti)) => self.seat(gi, ti)?,
            Some(None) => {
                self.release(gi);
            }
            None => {}
        }

        info!(guest_id, "Guest updated");
        Ok(self.guests[gi].clone())
    }

    /// Guests without a table, in roster order
    pub fn unassigned_guests(&self) -> Vec<&Guest> {
        self.guests.iter().filter(|g| g.table.is_none()).collect()
    }
}
