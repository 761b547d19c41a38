use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{self, Row};

use crate::models::slot::{Slot, SlotType};

pub(super) const SLOT_COLUMNS: &str = "id, slot_type, student_name, coach_id, coach_name,
    day_of_week, start_time, end_time, week_start, notes, created_at, updated_at";

pub(super) const WEEK_FORMAT: &str = "%Y-%m-%d";

pub(super) fn format_week(week_start: NaiveDate) -> String {
    week_start.format(WEEK_FORMAT).to_string()
}

fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

pub(super) fn to_local_datetime(column: usize, value: String) -> rusqlite::Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|err| conversion_error(column, err))
}

pub(super) fn row_to_slot(row: &Row<'_>) -> rusqlite::Result<Slot> {
    let code: String = row.get(1)?;
    let slot_type = SlotType::from_code(&code).ok_or_else(|| {
        conversion_error(
            1,
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Unknown slot type '{}'", code),
            ),
        )
    })?;

    let week: String = row.get(8)?;
    let week_start =
        NaiveDate::parse_from_str(&week, WEEK_FORMAT).map_err(|err| conversion_error(8, err))?;

    Ok(Slot {
        id: Some(row.get(0)?),
        slot_type,
        student_name: row.get(2)?,
        coach_id: row.get(3)?,
        coach_name: row.get(4)?,
        day_of_week: row.get(5)?,
        start_time: row.get(6)?,
        end_time: row.get(7)?,
        week_start,
        notes: row.get(9)?,
        created_at: Some(to_local_datetime(10, row.get(10)?)?),
        updated_at: Some(to_local_datetime(11, row.get(11)?)?),
    })
}
