//! Guest Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Meal choice offered on the RSVP card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSelection {
    Beef,
    Chicken,
    Fish,
    Vegetarian,
    Vegan,
    ChildMeal,
}

impl MealSelection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beef => "Beef",
            Self::Chicken => "Chicken",
            Self::Fish => "Fish",
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::ChildMeal => "Child meal",
        }
    }
}

/// Dietary restriction code
///
/// `Other` carries free text for restrictions the caterer tracks by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    NutAllergy,
    ShellfishAllergy,
    Halal,
    Kosher,
    Other(String),
}

impl DietaryRestriction {
    pub fn label(&self) -> &str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten-free",
            Self::DairyFree => "Dairy-free",
            Self::NutAllergy => "Nut allergy",
            Self::ShellfishAllergy => "Shellfish allergy",
            Self::Halal => "Halal",
            Self::Kosher => "Kosher",
            Self::Other(text) => text,
        }
    }
}

/// Which side of the family a guest belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Bride,
    Groom,
    Both,
}

/// Guest entity
///
/// `table` holds the table *number* (not id). It is only written by the
/// seating model together with the table's own guest set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<u32>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal: Option<MealSelection>,
    #[serde(default)]
    pub dietary: BTreeSet<DietaryRestriction>,
    /// Guests this one should not share a table with (advisory, one-directional)
    #[serde(default)]
    pub keep_apart: BTreeSet<i64>,
    #[serde(default)]
    pub is_vip: bool,
    #[serde(default)]
    pub is_child: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
}

impl Guest {
    /// Fresh, unassigned guest with empty notes/tags/dietary/keep-apart
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            table: None,
            notes: String::new(),
            tags: BTreeSet::new(),
            partner_id: None,
            group_id: None,
            meal: None,
            dietary: BTreeSet::new(),
            keep_apart: BTreeSet::new(),
            is_vip: false,
            is_child: false,
            side: None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.table.is_some()
    }
}

/// Partial update for a guest
///
/// Outer `Option` = "leave unchanged"; inner `Option` (where present) = "clear".
/// `table: Some(None)` unassigns, `table: Some(Some(n))` assigns to table number `n`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestPatch {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<BTreeSet<String>>,
    pub meal: Option<Option<MealSelection>>,
    pub dietary: Option<BTreeSet<DietaryRestriction>>,
    pub is_vip: Option<bool>,
    pub is_child: Option<bool>,
    pub side: Option<Option<Side>>,
    pub partner_id: Option<Option<i64>>,
    pub group_id: Option<Option<i64>>,
    pub keep_apart: Option<BTreeSet<i64>>,
    pub table: Option<Option<u32>>,
}

impl GuestPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.notes.is_none()
            && self.tags.is_none()
            && self.meal.is_none()
            && self.dietary.is_none()
            && self.is_vip.is_none()
            && self.is_child.is_none()
            && self.side.is_none()
            && self.partner_id.is_none()
            && self.group_id.is_none()
            && self.keep_apart.is_none()
            && self.table.is_none()
    }
}
