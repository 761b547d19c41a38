//! Cell index for the weekly grid.
//!
//! Maps `(day_of_week, start_time)` to the slots occupying that cell. The
//! index is rebuilt from scratch whenever the week's slots or the coach filter
//! change and is never edited in place.

use std::collections::HashMap;
use std::str::FromStr;

use crate::models::grid::CellKey;
use crate::models::slot::{Slot, SlotType};

/// Which coach's slots the grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoachFilter {
    #[default]
    All,
    Coach(i64),
}

impl CoachFilter {
    pub fn matches(&self, slot: &Slot) -> bool {
        match self {
            CoachFilter::All => true,
            CoachFilter::Coach(id) => slot.coach_id == *id,
        }
    }
}

impl FromStr for CoachFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(CoachFilter::All);
        }
        value
            .parse::<i64>()
            .map(CoachFilter::Coach)
            .map_err(|_| format!("Unknown coach filter '{}'", value))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotIndex {
    cells: HashMap<CellKey, Vec<Slot>>,
    len: usize,
}

impl SlotIndex {
    /// Group `slots` by cell, keeping input order within each cell.
    pub fn build(slots: &[Slot], filter: CoachFilter) -> Self {
        let mut cells: HashMap<CellKey, Vec<Slot>> = HashMap::new();
        let mut len = 0;

        for slot in slots.iter().filter(|slot| filter.matches(slot)) {
            cells
                .entry(CellKey::new(slot.day_of_week, slot.start_time.clone()))
                .or_default()
                .push(slot.clone());
            len += 1;
        }

        Self { cells, len }
    }

    /// Slots in the cell. Empty for an unoccupied cell.
    pub fn slots_at(&self, day_of_week: u8, start_time: &str) -> &[Slot] {
        self.cells
            .get(&CellKey::new(day_of_week, start_time))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn slots_in(&self, key: &CellKey) -> &[Slot] {
        self.cells.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of indexed slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Occupied cell keys in day then time order.
    pub fn occupied_cells(&self) -> Vec<&CellKey> {
        let mut keys: Vec<&CellKey> = self.cells.keys().collect();
        keys.sort();
        keys
    }

    /// Per-type slot counts in [`SlotType::ALL`] order, zero counts omitted.
    pub fn type_counts(&self) -> Vec<(SlotType, usize)> {
        SlotType::ALL
            .into_iter()
            .map(|slot_type| {
                let count = self
                    .cells
                    .values()
                    .flatten()
                    .filter(|slot| slot.slot_type == slot_type)
                    .count();
                (slot_type, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}
