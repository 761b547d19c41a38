// Test fixtures - reusable test data
// Provides consistent weeks, slots and stores across the integration tests

#![allow(dead_code)]

use std::path::Path;

use chrono::NaiveDate;
use coach_scheduler::models::coach::Coach;
use coach_scheduler::models::slot::{Slot, SlotType};
use coach_scheduler::services::store::{SlotStore, SqliteStore};

/// Monday 26 Jan 2026
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 26).unwrap()
}

/// Monday of the following week
pub fn next_monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()
}

/// Open a file-backed store inside `dir`.
pub fn open_store(dir: &Path) -> SqliteStore {
    let path = dir.join("schedule.db");
    SqliteStore::open(path.to_str().unwrap()).expect("Failed to open store")
}

pub fn first_coach(store: &dyn SlotStore) -> Coach {
    store
        .list_coaches(true)
        .expect("Failed to list coaches")
        .into_iter()
        .next()
        .expect("Store should be seeded with coaches")
}

pub fn one_to_one(coach: &Coach, student: &str, day: u8, start: &str, end: &str) -> Slot {
    Slot::builder()
        .slot_type(SlotType::OneToOne)
        .student(student)
        .coach(coach.id, coach.name.clone())
        .day(day)
        .times(start, end)
        .week_start(monday())
        .notes("Bring a water bottle")
        .build()
        .expect("Fixture slot should be valid")
}
