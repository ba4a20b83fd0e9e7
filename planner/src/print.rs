//! Print projections
//!
//! Plain data for place cards, escort cards and the kitchen sheet. No markup;
//! the print layer decides how it looks.

use crate::aggregates::compute_aggregates;
use crate::model::SeatingModel;
use serde::Serialize;
use shared::models::MealSelection;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceCardGuest {
    pub name: String,
    pub meal: Option<MealSelection>,
}

/// Cards for one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceCardTable {
    pub table_number: u32,
    pub table_name: String,
    pub guests: Vec<PlaceCardGuest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EscortCard {
    pub name: String,
    pub table_number: u32,
    pub meal: Option<MealSelection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KitchenTable {
    pub table_number: u32,
    pub table_name: String,
    pub guest_count: usize,
    /// Meal label -> count
    pub meals: BTreeMap<String, usize>,
    /// Dietary label -> count
    pub dietary: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KitchenSummary {
    pub tables: Vec<KitchenTable>,
    pub meal_totals: BTreeMap<String, usize>,
    pub dietary_totals: BTreeMap<String, usize>,
    pub meal_missing: usize,
    /// Guests without a table are still cooked for
    pub unassigned_count: usize,
}

/// Re-key counts by display label, summing entries that share one
fn by_label<'a, K: 'a>(
    counts: impl IntoIterator<Item = (&'a K, &'a usize)>,
    label: impl Fn(&K) -> &str,
) -> BTreeMap<String, usize> {
    counts.into_iter().fold(BTreeMap::new(), |mut map, (key, n)| {
        *map.entry(label(key).to_string()).or_default() += *n;
        map
    })
}

fn sort_key(name: &str) -> (String, String) {
    (name.to_lowercase(), name.to_string())
}

impl SeatingModel {
    /// Place cards grouped by table, ascending table number; names sorted
    pub fn place_cards(&self) -> Vec<PlaceCardTable> {
        let mut tables: Vec<_> = self.tables().iter().collect();
        tables.sort_by_key(|t| t.number);

        tables
            .into_iter()
            .map(|table| {
                let mut guests: Vec<PlaceCardGuest> = self
                    .guests_at(table.id)
                    .into_iter()
                    .map(|g| PlaceCardGuest {
                        name: g.name.clone(),
                        meal: g.meal,
                    })
                    .collect();
                guests.sort_by_cached_key(|g| sort_key(&g.name));
                PlaceCardTable {
                    table_number: table.number,
                    table_name: table.name.clone(),
                    guests,
                }
            })
            .collect()
    }

    /// One escort card per seated guest, alphabetical (case-insensitive)
    pub fn escort_cards(&self) -> Vec<EscortCard> {
        let mut cards: Vec<EscortCard> = self
            .guests()
            .iter()
            .filter_map(|g| {
                Some(EscortCard {
                    name: g.name.clone(),
                    table_number: g.table?,
                    meal: g.meal,
                })
            })
            .collect();
        cards.sort_by_cached_key(|c| sort_key(&c.name));
        cards
    }

    pub fn kitchen_summary(&self) -> KitchenSummary {
        let agg = compute_aggregates(self.guests());

        let tables = agg
            .per_table
            .iter()
            .map(|(number, breakdown)| KitchenTable {
                table_number: *number,
                table_name: self
                    .table_by_number(*number)
                    .map(|t| t.name.clone())
                    .unwrap_or_default(),
                guest_count: breakdown.guest_count,
                meals: by_label(&breakdown.meal_counts, |meal| meal.label()),
                dietary: by_label(&breakdown.dietary_counts, |d| d.label()),
            })
            .collect();

        KitchenSummary {
            tables,
            meal_totals: by_label(&agg.meal_counts, |meal| meal.label()),
            dietary_totals: by_label(&agg.dietary_counts, |d| d.label()),
            meal_missing: agg.meal_missing,
            unassigned_count: agg.unassigned_count,
        }
    }
}
