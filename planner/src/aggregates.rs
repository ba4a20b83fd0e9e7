//! Meal and dietary aggregates
//!
//! Pure functions of the guest list: the same multiset of guests yields the
//! same result regardless of order. Keyed by enum, so not serialized
//! directly; the kitchen summary in `print` is the serializable form.

use crate::model::SeatingModel;
use shared::models::{DietaryRestriction, Guest, MealSelection};
use std::collections::BTreeMap;

/// Counts for one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBreakdown {
    pub guest_count: usize,
    pub meal_counts: BTreeMap<MealSelection, usize>,
    pub dietary_counts: BTreeMap<DietaryRestriction, usize>,
    /// Guests at this table with at least one dietary restriction
    pub guests_with_restrictions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub meal_counts: BTreeMap<MealSelection, usize>,
    pub dietary_counts: BTreeMap<DietaryRestriction, usize>,
    /// Keyed by table number
    pub per_table: BTreeMap<u32, TableBreakdown>,
    /// Guests without a meal selection
    pub meal_missing: usize,
    pub assigned_count: usize,
    pub unassigned_count: usize,
}

pub fn compute_aggregates(guests: &[Guest]) -> Aggregates {
    let mut agg = Aggregates::default();

    for guest in guests {
        match guest.meal {
            Some(meal) => *agg.meal_counts.entry(meal).or_default() += 1,
            None => agg.meal_missing += 1,
        }
        for restriction in &guest.dietary {
            *agg.dietary_counts.entry(restriction.clone()).or_default() += 1;
        }

        let Some(number) = guest.table else {
            agg.unassigned_count += 1;
            continue;
        };
        agg.assigned_count += 1;

        let table = agg.per_table.entry(number).or_default();
        table.guest_count += 1;
        if let Some(meal) = guest.meal {
            *table.meal_counts.entry(meal).or_default() += 1;
        }
        if !guest.dietary.is_empty() {
            table.guests_with_restrictions += 1;
        }
        for restriction in &guest.dietary {
            *table.dietary_counts.entry(restriction.clone()).or_default() += 1;
        }
    }

    agg
}

impl SeatingModel {
    pub fn aggregates(&self) -> Aggregates {
        compute_aggregates(self.guests())
    }
}
