use super::shared::{format_week, row_to_slot, SLOT_COLUMNS};
use super::SlotService;
use crate::models::slot::{Slot, SlotChanges};
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::types::Value;
use rusqlite::{self, params, params_from_iter};

impl<'a> SlotService<'a> {
    /// Create a new slot in the database.
    pub fn create(&self, mut slot: Slot) -> Result<Slot> {
        slot.validate().map_err(|e| anyhow!(e))?;

        let now = Local::now();
        let stamp = now.to_rfc3339();

        self.conn
            .execute(
                "INSERT INTO slots (
                    slot_type, student_name, coach_id, coach_name, day_of_week,
                    start_time, end_time, week_start, notes, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    slot.slot_type.code(),
                    slot.student_name,
                    slot.coach_id,
                    slot.coach_name,
                    slot.day_of_week,
                    slot.start_time,
                    slot.end_time,
                    format_week(slot.week_start),
                    slot.notes,
                    &stamp,
                    &stamp,
                ],
            )
            .context("Failed to insert slot")?;

        slot.id = Some(self.conn.last_insert_rowid());
        slot.created_at = Some(now);
        slot.updated_at = Some(now);

        log::debug!("Created slot {:?} for week {}", slot.id, slot.week_start);
        Ok(slot)
    }

    /// Retrieve a slot by ID.
    pub fn get(&self, id: i64) -> Result<Option<Slot>> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM slots WHERE id = ?", SLOT_COLUMNS),
            [id],
            row_to_slot,
        );

        match result {
            Ok(slot) => Ok(Some(slot)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply a partial update. Only the columns named in `changes` are written.
    pub fn update(&self, id: i64, changes: &SlotChanges) -> Result<()> {
        let mut merged = self
            .get(id)?
            .ok_or_else(|| anyhow!("Slot with id {} not found", id))?;
        merged.apply_changes(changes);
        merged.validate().map_err(|e| anyhow!(e))?;

        if changes.is_empty() {
            return Ok(());
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(slot_type) = changes.slot_type {
            assignments.push("slot_type = ?");
            values.push(Value::Text(slot_type.code().to_string()));
        }
        if let Some(student_name) = &changes.student_name {
            assignments.push("student_name = ?");
            values.push(match student_name {
                Some(name) => Value::Text(name.clone()),
                None => Value::Null,
            });
        }
        if let Some(coach) = &changes.coach {
            assignments.push("coach_id = ?");
            values.push(Value::Integer(coach.id));
            assignments.push("coach_name = ?");
            values.push(Value::Text(coach.name.clone()));
        }
        if let Some(day) = changes.day_of_week {
            assignments.push("day_of_week = ?");
            values.push(Value::Integer(day as i64));
        }
        if let Some(start) = &changes.start_time {
            assignments.push("start_time = ?");
            values.push(Value::Text(start.clone()));
        }
        if let Some(end) = &changes.end_time {
            assignments.push("end_time = ?");
            values.push(Value::Text(end.clone()));
        }
        if let Some(notes) = &changes.notes {
            assignments.push("notes = ?");
            values.push(Value::Text(notes.clone()));
        }

        assignments.push("updated_at = ?");
        values.push(Value::Text(Local::now().to_rfc3339()));
        values.push(Value::Integer(id));

        let sql = format!("UPDATE slots SET {} WHERE id = ?", assignments.join(", "));
        let rows_affected = self
            .conn
            .execute(&sql, params_from_iter(values.iter()))
            .context("Failed to update slot")?;

        if rows_affected == 0 {
            return Err(anyhow!("Slot with id {} not found", id));
        }

        Ok(())
    }

    /// Delete a slot by ID.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM slots WHERE id = ?", [id])
            .context("Failed to delete slot")?;

        if rows_affected == 0 {
            return Err(anyhow!("Slot with id {} not found", id));
        }

        Ok(())
    }
}
