use super::shared::{format_week, row_to_slot, SLOT_COLUMNS};
use super::SlotService;
use crate::models::slot::Slot;
use anyhow::{Context, Result};
use chrono::NaiveDate;

impl<'a> SlotService<'a> {
    /// All slots of one week in insertion order.
    pub fn list_for_week(&self, week_start: NaiveDate) -> Result<Vec<Slot>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM slots WHERE week_start = ? ORDER BY id",
                SLOT_COLUMNS
            ))
            .context("Failed to prepare week query")?;

        let slots = stmt
            .query_map([format_week(week_start)], row_to_slot)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read slots")?;

        Ok(slots)
    }
}
