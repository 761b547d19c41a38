// Grid module
// Axes of the weekly scheduling grid: day columns and time rows

use std::fmt;

use crate::utils::date::{format_minutes, parse_hhmm, DAY_NAMES};

/// One column of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    /// ISO day index, 0 = Monday.
    pub day_of_week: u8,
    pub name: String,
}

impl DayColumn {
    pub fn new(day_of_week: u8) -> Self {
        Self {
            day_of_week,
            name: DAY_NAMES[(day_of_week % 7) as usize].to_string(),
        }
    }
}

/// One row of the grid. Times are `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRow {
    pub start_time: String,
    pub end_time: String,
    pub label: String,
}

impl TimeRow {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        let start_time = start_time.into();
        Self {
            label: start_time.clone(),
            start_time,
            end_time: end_time.into(),
        }
    }
}

/// Address of a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub day_of_week: u8,
    pub start_time: String,
}

impl CellKey {
    pub fn new(day_of_week: u8, start_time: impl Into<String>) -> Self {
        Self {
            day_of_week,
            start_time: start_time.into(),
        }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day_of_week, self.start_time)
    }
}

/// Static description of both grid axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGridDefinition {
    pub days: Vec<DayColumn>,
    pub rows: Vec<TimeRow>,
}

impl TimeGridDefinition {
    pub fn new(days: Vec<DayColumn>, rows: Vec<TimeRow>) -> Self {
        Self { days, rows }
    }

    /// Build evenly spaced rows from `first` up to `last`.
    ///
    /// A trailing partial interval is dropped so every row spans `interval_minutes`.
    pub fn with_interval(
        days: &[u8],
        first: &str,
        last: &str,
        interval_minutes: u32,
    ) -> Result<Self, String> {
        let first_minutes =
            parse_hhmm(first).ok_or_else(|| format!("Invalid grid start time '{}'", first))?;
        let last_minutes =
            parse_hhmm(last).ok_or_else(|| format!("Invalid grid end time '{}'", last))?;

        if interval_minutes == 0 {
            return Err("Row interval must be at least one minute".to_string());
        }
        if last_minutes <= first_minutes {
            return Err("Grid end time must be after its start time".to_string());
        }
        if let Some(day) = days.iter().find(|day| **day > 6) {
            return Err(format!("Day index {} is out of range", day));
        }

        let mut rows = Vec::new();
        let mut cursor = first_minutes;
        while cursor + interval_minutes <= last_minutes {
            rows.push(TimeRow::new(
                format_minutes(cursor),
                format_minutes(cursor + interval_minutes),
            ));
            cursor += interval_minutes;
        }

        let days = days.iter().copied().map(DayColumn::new).collect();
        Ok(Self { days, rows })
    }

    /// Row whose window starts at `start_time`.
    pub fn row_starting_at(&self, start_time: &str) -> Option<&TimeRow> {
        self.rows.iter().find(|row| row.start_time == start_time)
    }

    pub fn column(&self, day_of_week: u8) -> Option<&DayColumn> {
        self.days.iter().find(|day| day.day_of_week == day_of_week)
    }

    /// Whether a cell address lies on this grid.
    pub fn contains(&self, key: &CellKey) -> bool {
        self.column(key.day_of_week).is_some() && self.row_starting_at(&key.start_time).is_some()
    }
}

impl Default for TimeGridDefinition {
    /// Monday to Sunday, 06:00 to 22:00 in 30 minute rows.
    fn default() -> Self {
        Self::with_interval(&[0, 1, 2, 3, 4, 5, 6], "06:00", "22:00", 30)
            .unwrap_or_else(|_| Self::new(Vec::new(), Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_grid_covers_six_to_ten() {
        let grid = TimeGridDefinition::default();
        assert_eq!(grid.days.len(), 7);
        assert_eq!(grid.rows.len(), 32);
        assert_eq!(grid.rows[0], TimeRow::new("06:00", "06:30"));
        assert_eq!(grid.rows[31], TimeRow::new("21:30", "22:00"));
        assert_eq!(grid.days[0].name, "Monday");
        assert_eq!(grid.days[6].name, "Sunday");
    }

    #[test]
    fn quarter_hour_rows() {
        let grid = TimeGridDefinition::with_interval(&[0, 1, 2, 3, 4], "15:00", "16:00", 15).unwrap();
        let starts: Vec<&str> = grid.rows.iter().map(|r| r.start_time.as_str()).collect();
        assert_eq!(starts, vec!["15:00", "15:15", "15:30", "15:45"]);
        assert_eq!(grid.days.len(), 5);
    }

    #[test]
    fn trailing_partial_row_is_dropped() {
        let grid = TimeGridDefinition::with_interval(&[0], "09:00", "10:10", 30).unwrap();
        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.rows[1].end_time, "10:00");
    }

    #[test]
    fn with_interval_rejects_bad_input() {
        assert!(TimeGridDefinition::with_interval(&[0], "10:00", "09:00", 30).is_err());
        assert!(TimeGridDefinition::with_interval(&[0], "9am", "10:00", 30).is_err());
        assert!(TimeGridDefinition::with_interval(&[0], "09:00", "10:00", 0).is_err());
        assert!(TimeGridDefinition::with_interval(&[7], "09:00", "10:00", 30).is_err());
    }

    #[test]
    fn row_lookup_and_contains() {
        let grid = TimeGridDefinition::default();
        assert_eq!(grid.row_starting_at("15:00").unwrap().end_time, "15:30");
        assert!(grid.row_starting_at("15:10").is_none());
        assert!(grid.contains(&CellKey::new(3, "15:00")));
        assert!(!grid.contains(&CellKey::new(3, "05:30")));
    }

    #[test]
    fn cell_key_display_joins_day_and_time() {
        assert_eq!(CellKey::new(2, "15:00").to_string(), "2-15:00");
    }
}
