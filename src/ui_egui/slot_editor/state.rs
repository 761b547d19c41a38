use std::collections::HashSet;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::coach::{coach_name, Coach};
use crate::models::slot::{CoachAssignment, Slot, SlotChanges, SlotType};
use crate::services::store::{apply_mutation, MutationOutcome, SlotMutation, SlotStore};

/// Input a [`FieldError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Coach,
    Time,
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Select a coach")]
    MissingCoach,
    #[error("Start and end times are required")]
    MissingTime,
    #[error("End time must be after the start time")]
    EndNotAfterStart,
    #[error("Student name is required for this slot type")]
    MissingStudentName,
}

impl FieldError {
    pub fn field(&self) -> EditorField {
        match self {
            FieldError::MissingCoach => EditorField::Coach,
            FieldError::MissingTime | FieldError::EndNotAfterStart => EditorField::Time,
            FieldError::MissingStudentName => EditorField::Student,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("Please correct {} field(s) before saving", .0.len())]
    Invalid(Vec<FieldError>),
    #[error("Coach {0} is no longer available")]
    UnknownCoach(i64),
    #[error("Only saved slots can be deleted")]
    NotEditing,
    #[error("Deleting slots is disabled")]
    DeleteUnavailable,
    #[error("A save for this slot is already in progress")]
    Busy,
    #[error("{0}")]
    Store(String),
}

/// What the app should do with the editor after a store result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Open,
    Closed,
}

/// State for the slot editing window
#[derive(Debug, Clone, PartialEq)]
pub struct SlotEditorState {
    /// Slot being edited (None for a new slot)
    pub slot_id: Option<i64>,
    pub week_start: NaiveDate,
    pub slot_type: SlotType,
    pub student_name: String,
    pub coach_id: Option<i64>,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub notes: String,

    pub allow_delete: bool,
    /// Set while a save or delete is with the store
    pub pending: bool,
    /// Set while some other change to this slot (a drag) is with the store
    pub slot_in_flight: bool,
    pub error_message: Option<String>,
    /// Non-blocking warnings (displayed in amber)
    pub warning_messages: Vec<String>,
    /// Coach stamped on the stored slot, kept for coaches since deactivated
    stored_coach: Option<CoachAssignment>,
}

impl SlotEditorState {
    /// Open the editor for `slot`, or for a new slot in the given cell.
    pub fn open(
        slot: Option<&Slot>,
        week_start: NaiveDate,
        default_day: u8,
        default_start: &str,
        default_end: &str,
    ) -> Self {
        match slot {
            Some(slot) => Self {
                slot_id: slot.id,
                week_start: slot.week_start,
                slot_type: slot.slot_type,
                student_name: slot.student_name.clone().unwrap_or_default(),
                coach_id: Some(slot.coach_id),
                day_of_week: slot.day_of_week,
                start_time: slot.start_time.clone(),
                end_time: slot.end_time.clone(),
                notes: slot.notes.clone(),
                allow_delete: true,
                pending: false,
                slot_in_flight: false,
                error_message: None,
                warning_messages: Vec::new(),
                stored_coach: Some(CoachAssignment {
                    id: slot.coach_id,
                    name: slot.coach_name.clone(),
                }),
            },
            None => Self {
                slot_id: None,
                week_start,
                slot_type: SlotType::OneToOne,
                student_name: String::new(),
                coach_id: None,
                day_of_week: default_day,
                start_time: default_start.to_string(),
                end_time: default_end.to_string(),
                notes: String::new(),
                allow_delete: true,
                pending: false,
                slot_in_flight: false,
                error_message: None,
                warning_messages: Vec::new(),
                stored_coach: None,
            },
        }
    }

    pub fn with_delete(mut self, allow_delete: bool) -> Self {
        self.allow_delete = allow_delete;
        self
    }

    pub fn is_editing(&self) -> bool {
        self.slot_id.is_some()
    }

    /// Track whether the edited slot has a write outstanding from anywhere.
    pub fn sync_in_flight(&mut self, in_flight: &HashSet<i64>) {
        self.slot_in_flight = self.slot_id.is_some_and(|id| in_flight.contains(&id));
    }

    /// Save and delete are refused while any write to this slot is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending || self.slot_in_flight
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Slot"
        } else {
            "New Slot"
        }
    }

    /// Name for the chosen coach, falling back to the name stamped on the
    /// stored slot when that coach is no longer listed.
    pub fn selected_coach_name<'a>(&'a self, coaches: &'a [Coach]) -> Option<&'a str> {
        let id = self.coach_id?;
        coach_name(coaches, id).or_else(|| {
            self.stored_coach
                .as_ref()
                .filter(|stored| stored.id == id)
                .map(|stored| stored.name.as_str())
        })
    }

    /// Every failing rule, checked independently.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.coach_id.is_none() {
            errors.push(FieldError::MissingCoach);
        }

        let start = self.start_time.trim();
        let end = self.end_time.trim();
        if start.is_empty() || end.is_empty() {
            errors.push(FieldError::MissingTime);
        } else if start >= end {
            errors.push(FieldError::EndNotAfterStart);
        }

        if self.slot_type.requires_student() && self.student_name.trim().is_empty() {
            errors.push(FieldError::MissingStudentName);
        }

        errors
    }

    pub fn errors_for(&self, field: EditorField) -> Vec<FieldError> {
        self.validate()
            .into_iter()
            .filter(|error| error.field() == field)
            .collect()
    }

    /// Warn when the chosen coach already has another slot in this cell.
    pub fn check_warnings(&mut self, week_slots: &[Slot]) {
        self.warning_messages.clear();
        let Some(coach_id) = self.coach_id else {
            return;
        };

        let clashes = week_slots
            .iter()
            .filter(|slot| {
                slot.id != self.slot_id
                    && slot.coach_id == coach_id
                    && slot.day_of_week == self.day_of_week
                    && slot.start_time == self.start_time.trim()
            })
            .count();

        if clashes > 0 {
            self.warning_messages.push(format!(
                "This coach already has {} other slot(s) starting at {} on this day",
                clashes,
                self.start_time.trim()
            ));
        }
    }

    /// Build the store write for the current fields.
    pub fn prepare_save(&mut self, coaches: &[Coach]) -> Result<SlotMutation, EditorError> {
        if self.is_busy() {
            return Err(EditorError::Busy);
        }

        let errors = self.validate();
        if !errors.is_empty() {
            return Err(EditorError::Invalid(errors));
        }

        let coach_id = self
            .coach_id
            .ok_or_else(|| EditorError::Invalid(vec![FieldError::MissingCoach]))?;
        let coach = CoachAssignment {
            id: coach_id,
            name: self
                .selected_coach_name(coaches)
                .ok_or(EditorError::UnknownCoach(coach_id))?
                .to_string(),
        };

        let student_name = if self.slot_type.requires_student() {
            Some(self.student_name.trim().to_string())
        } else {
            None
        };

        let mutation = match self.slot_id {
            Some(id) => SlotMutation::Update {
                id,
                changes: SlotChanges {
                    slot_type: Some(self.slot_type),
                    student_name: Some(student_name),
                    coach: Some(coach),
                    day_of_week: Some(self.day_of_week),
                    start_time: Some(self.start_time.trim().to_string()),
                    end_time: Some(self.end_time.trim().to_string()),
                    notes: Some(self.notes.trim().to_string()),
                },
            },
            None => {
                let mut builder = Slot::builder()
                    .slot_type(self.slot_type)
                    .coach(coach.id, coach.name)
                    .day(self.day_of_week)
                    .times(self.start_time.trim(), self.end_time.trim())
                    .week_start(self.week_start)
                    .notes(self.notes.trim());
                if let Some(name) = student_name {
                    builder = builder.student(name);
                }
                SlotMutation::Create(builder.build().map_err(EditorError::Store)?)
            }
        };

        self.pending = true;
        self.error_message = None;
        Ok(mutation)
    }

    pub fn prepare_delete(&mut self) -> Result<SlotMutation, EditorError> {
        if self.is_busy() {
            return Err(EditorError::Busy);
        }
        let id = self.slot_id.ok_or(EditorError::NotEditing)?;
        if !self.allow_delete {
            return Err(EditorError::DeleteUnavailable);
        }

        self.pending = true;
        self.error_message = None;
        Ok(SlotMutation::Delete(id))
    }

    /// Apply the store's answer to an outstanding save or delete.
    pub fn complete(&mut self, result: Result<MutationOutcome, String>) -> EditorStatus {
        self.pending = false;
        match result {
            Ok(_) => EditorStatus::Closed,
            Err(message) => {
                self.error_message = Some(message);
                EditorStatus::Open
            }
        }
    }

    /// Save through `store` without the background worker.
    pub fn save(
        &mut self,
        store: &dyn SlotStore,
        coaches: &[Coach],
    ) -> Result<MutationOutcome, EditorError> {
        let mutation = self.prepare_save(coaches)?;
        self.run(store, mutation)
    }

    pub fn delete(&mut self, store: &dyn SlotStore) -> Result<MutationOutcome, EditorError> {
        let mutation = self.prepare_delete()?;
        self.run(store, mutation)
    }

    fn run(
        &mut self,
        store: &dyn SlotStore,
        mutation: SlotMutation,
    ) -> Result<MutationOutcome, EditorError> {
        let result = apply_mutation(store, mutation).map_err(|err| err.to_string());
        match self.complete(result.clone()) {
            EditorStatus::Closed => result.map_err(EditorError::Store),
            EditorStatus::Open => Err(EditorError::Store(
                self.error_message.clone().unwrap_or_default(),
            )),
        }
    }
}
