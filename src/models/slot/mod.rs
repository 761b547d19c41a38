// Slot module
// A single scheduled occupancy of a coach for one time range on one day of one week

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Category of a slot. `Available` marks a reserved but unoccupied slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotType {
    OneToOne,
    AfterSchoolClub,
    GroupDevelopment,
    Observation,
    Available,
}

impl SlotType {
    pub const ALL: [SlotType; 5] = [
        SlotType::OneToOne,
        SlotType::AfterSchoolClub,
        SlotType::GroupDevelopment,
        SlotType::Observation,
        SlotType::Available,
    ];

    /// Stable code stored in the database.
    pub fn code(&self) -> &'static str {
        match self {
            SlotType::OneToOne => "121",
            SlotType::AfterSchoolClub => "ASC",
            SlotType::GroupDevelopment => "GDS",
            SlotType::Observation => "OBS",
            SlotType::Available => "AVAILABLE",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|slot_type| slot_type.code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlotType::OneToOne => "1-2-1",
            SlotType::AfterSchoolClub => "After School Club",
            SlotType::GroupDevelopment => "Group Development",
            SlotType::Observation => "Observation",
            SlotType::Available => "Available",
        }
    }

    /// Hex colour used for the slot block in the grid.
    pub fn color(&self) -> &'static str {
        match self {
            SlotType::OneToOne => "#3B82F6",
            SlotType::AfterSchoolClub => "#F59E0B",
            SlotType::GroupDevelopment => "#10B981",
            SlotType::Observation => "#8B5CF6",
            SlotType::Available => "#9CA3AF",
        }
    }

    pub fn requires_student(&self) -> bool {
        !matches!(self, SlotType::Available)
    }
}

/// Scheduled slot.
///
/// `start_time` and `end_time` are zero-padded 24-hour `HH:MM` strings, so
/// ordering them as strings orders them in time. `day_of_week` uses ISO
/// order: 0 = Monday through 6 = Sunday, counted from `week_start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub id: Option<i64>,
    pub slot_type: SlotType,
    pub student_name: Option<String>,
    pub coach_id: i64,
    /// Copy of the coach's name taken when the coach was assigned.
    pub coach_name: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub week_start: NaiveDate,
    pub notes: String,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Slot {
    /// Create a builder for constructing slots
    pub fn builder() -> SlotBuilder {
        SlotBuilder::new()
    }

    /// Validate the stored invariants of a slot.
    pub fn validate(&self) -> Result<(), String> {
        if self.day_of_week > 6 {
            return Err(format!("Day of week {} is out of range", self.day_of_week));
        }

        if self.start_time.is_empty() || self.end_time.is_empty() {
            return Err("Slot start and end times are required".to_string());
        }

        if self.start_time >= self.end_time {
            return Err("Slot end time must be after start time".to_string());
        }

        if self.slot_type.requires_student() && self.student_display().is_empty() {
            return Err(format!(
                "A student name is required for {} slots",
                self.slot_type.label()
            ));
        }

        Ok(())
    }

    /// Trimmed student name, or an empty string.
    pub fn student_display(&self) -> &str {
        self.student_name.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn time_range_label(&self) -> String {
        format!("{}–{}", self.start_time, self.end_time)
    }

    /// Apply a partial update in place. Used by stores that keep slots in memory.
    pub fn apply_changes(&mut self, changes: &SlotChanges) {
        if let Some(slot_type) = changes.slot_type {
            self.slot_type = slot_type;
        }
        if let Some(student_name) = &changes.student_name {
            self.student_name = student_name.clone();
        }
        if let Some(coach) = &changes.coach {
            self.coach_id = coach.id;
            self.coach_name = coach.name.clone();
        }
        if let Some(day) = changes.day_of_week {
            self.day_of_week = day;
        }
        if let Some(start) = &changes.start_time {
            self.start_time = start.clone();
        }
        if let Some(end) = &changes.end_time {
            self.end_time = end.clone();
        }
        if let Some(notes) = &changes.notes {
            self.notes = notes.clone();
        }
    }
}

/// Coach reference stamped onto a slot. The name always travels with the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachAssignment {
    pub id: i64,
    pub name: String,
}

/// Partial update for a slot. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotChanges {
    pub slot_type: Option<SlotType>,
    /// `Some(None)` clears the student name.
    pub student_name: Option<Option<String>>,
    pub coach: Option<CoachAssignment>,
    pub day_of_week: Option<u8>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notes: Option<String>,
}

impl SlotChanges {
    /// Changes that only move a slot to a new day and time window.
    pub fn relocation(day_of_week: u8, start_time: &str, end_time: &str) -> Self {
        Self {
            day_of_week: Some(day_of_week),
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Builder for creating slots with optional fields
pub struct SlotBuilder {
    slot_type: SlotType,
    student_name: Option<String>,
    coach: Option<CoachAssignment>,
    day_of_week: u8,
    start_time: Option<String>,
    end_time: Option<String>,
    week_start: Option<NaiveDate>,
    notes: String,
}

impl SlotBuilder {
    pub fn new() -> Self {
        Self {
            slot_type: SlotType::OneToOne,
            student_name: None,
            coach: None,
            day_of_week: 0,
            start_time: None,
            end_time: None,
            week_start: None,
            notes: String::new(),
        }
    }

    pub fn slot_type(mut self, slot_type: SlotType) -> Self {
        self.slot_type = slot_type;
        self
    }

    pub fn student(mut self, name: impl Into<String>) -> Self {
        self.student_name = Some(name.into());
        self
    }

    pub fn coach(mut self, id: i64, name: impl Into<String>) -> Self {
        self.coach = Some(CoachAssignment {
            id,
            name: name.into(),
        });
        self
    }

    pub fn day(mut self, day_of_week: u8) -> Self {
        self.day_of_week = day_of_week;
        self
    }

    pub fn times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = Some(start.into());
        self.end_time = Some(end.into());
        self
    }

    pub fn week_start(mut self, week_start: NaiveDate) -> Self {
        self.week_start = Some(week_start);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn build(self) -> Result<Slot, String> {
        let coach = self.coach.ok_or("Slot coach is required")?;
        let start_time = self.start_time.ok_or("Slot start time is required")?;
        let end_time = self.end_time.ok_or("Slot end time is required")?;
        let week_start = self.week_start.ok_or("Slot week start is required")?;

        let student_name = if self.slot_type.requires_student() {
            self.student_name
        } else {
            None
        };

        let slot = Slot {
            id: None,
            slot_type: self.slot_type,
            student_name,
            coach_id: coach.id,
            coach_name: coach.name,
            day_of_week: self.day_of_week,
            start_time,
            end_time,
            week_start,
            notes: self.notes,
            created_at: None,
            updated_at: None,
        };

        slot.validate()?;
        Ok(slot)
    }
}

impl Default for SlotBuilder {
    fn default() -> Self {
        Self::new()
    }
}
