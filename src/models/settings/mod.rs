// Settings module
// Application configuration loaded from settings.toml

use serde::{Deserialize, Serialize};

use crate::models::grid::TimeGridDefinition;
use crate::utils::date::parse_hhmm;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite file holding slots and coaches. Relative paths resolve
    /// against the data directory.
    pub database_path: String,
    /// ISO day indices shown as columns, in display order (0 = Monday).
    pub day_columns: Vec<u8>,
    pub day_start: String,
    pub day_end: String,
    pub slot_interval_minutes: u32,
    pub show_inactive_coaches: bool,
    pub allow_delete: bool,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: "schedule.db".to_string(),
            day_columns: vec![0, 1, 2, 3, 4, 5, 6],
            day_start: "06:00".to_string(),
            day_end: "22:00".to_string(),
            slot_interval_minutes: 30,
            show_inactive_coaches: false,
            allow_delete: true,
            theme: "light".to_string(),
        }
    }
}

impl Settings {
    /// Validate settings values
    pub fn validate(&self) -> Result<(), String> {
        if self.database_path.trim().is_empty() {
            return Err("Database path cannot be empty".to_string());
        }

        if self.day_columns.is_empty() {
            return Err("At least one day column is required".to_string());
        }

        if let Some(day) = self.day_columns.iter().find(|day| **day > 6) {
            return Err(format!("Day column {} must be between 0 and 6", day));
        }

        let mut seen = [false; 7];
        for day in &self.day_columns {
            if seen[*day as usize] {
                return Err(format!("Day column {} is listed twice", day));
            }
            seen[*day as usize] = true;
        }

        let start = parse_hhmm(&self.day_start)
            .ok_or_else(|| format!("Invalid day start '{}', expected HH:MM", self.day_start))?;
        let end = parse_hhmm(&self.day_end)
            .ok_or_else(|| format!("Invalid day end '{}', expected HH:MM", self.day_end))?;
        if end <= start {
            return Err("Day end must be after day start".to_string());
        }

        if !(5..=240).contains(&self.slot_interval_minutes) {
            return Err("Slot interval must be between 5 and 240 minutes".to_string());
        }

        if self.slot_interval_minutes > end - start {
            return Err("Slot interval is longer than the scheduling day".to_string());
        }

        if self.theme != "light" && self.theme != "dark" {
            return Err(format!("Unknown theme '{}'", self.theme));
        }

        Ok(())
    }

    pub fn is_dark(&self) -> bool {
        self.theme == "dark"
    }

    /// Grid axes described by these settings.
    pub fn grid_definition(&self) -> Result<TimeGridDefinition, String> {
        TimeGridDefinition::with_interval(
            &self.day_columns,
            &self.day_start,
            &self.day_end,
            self.slot_interval_minutes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid_definition().unwrap(), TimeGridDefinition::default());
    }

    #[test]
    fn rejects_duplicate_days() {
        let settings = Settings {
            day_columns: vec![0, 1, 1],
            ..Settings::default()
        };
        assert!(settings.validate().unwrap_err().contains("twice"));
    }

    #[test]
    fn rejects_out_of_range_day() {
        let settings = Settings {
            day_columns: vec![0, 9],
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_inverted_day() {
        let settings = Settings {
            day_start: "18:00".to_string(),
            day_end: "08:00".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_unknown_theme() {
        let settings = Settings {
            theme: "neon".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn weekday_only_grid() {
        let settings = Settings {
            day_columns: vec![0, 1, 2, 3, 4],
            slot_interval_minutes: 15,
            ..Settings::default()
        };
        let grid = settings.grid_definition().unwrap();
        assert_eq!(grid.days.len(), 5);
        assert_eq!(grid.rows.len(), 64);
    }
}
