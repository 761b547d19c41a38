//! Slot persistence contract used by the grid.
//!
//! The grid never talks to SQLite directly: it produces [`SlotMutation`]s and
//! reads week lists through a [`SlotStore`]. [`SqliteStore`] is the bundled
//! implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::models::coach::Coach;
use crate::models::slot::{Slot, SlotChanges};
use crate::services::coach::CoachService;
use crate::services::database::Database;
use crate::services::slot::SlotService;

/// A single write against the store.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotMutation {
    Create(Slot),
    Update { id: i64, changes: SlotChanges },
    Delete(i64),
}

impl SlotMutation {
    /// Id of the slot being written, if it already exists.
    pub fn slot_id(&self) -> Option<i64> {
        match self {
            SlotMutation::Create(slot) => slot.id,
            SlotMutation::Update { id, .. } => Some(*id),
            SlotMutation::Delete(id) => Some(*id),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            SlotMutation::Create(_) => "create",
            SlotMutation::Update { .. } => "update",
            SlotMutation::Delete(_) => "delete",
        }
    }
}

/// Result of a successful [`SlotMutation`].
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Created(Slot),
    Updated(i64),
    Deleted(i64),
}

#[cfg_attr(test, mockall::automock)]
pub trait SlotStore {
    fn list_slots_for_week(&self, week_start: NaiveDate) -> Result<Vec<Slot>>;

    /// Persist a new slot and return it with its id.
    fn create_slot(&self, slot: Slot) -> Result<Slot>;

    /// Partial update. Fields absent from `changes` stay as stored.
    fn update_slot(&self, id: i64, changes: &SlotChanges) -> Result<()>;

    fn delete_slot(&self, id: i64) -> Result<()>;

    fn list_coaches(&self, active_only: bool) -> Result<Vec<Coach>>;
}

/// Run one mutation against a store.
pub fn apply_mutation(store: &dyn SlotStore, mutation: SlotMutation) -> Result<MutationOutcome> {
    match mutation {
        SlotMutation::Create(slot) => store.create_slot(slot).map(MutationOutcome::Created),
        SlotMutation::Update { id, changes } => store
            .update_slot(id, &changes)
            .map(|_| MutationOutcome::Updated(id)),
        SlotMutation::Delete(id) => store.delete_slot(id).map(|_| MutationOutcome::Deleted(id)),
    }
}

/// [`SlotStore`] backed by the application's SQLite database.
pub struct SqliteStore {
    database: Database,
}

impl SqliteStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Open the database at `path`, create tables and seed coaches if needed.
    pub fn open(path: &str) -> Result<Self> {
        let database = Database::new(path)?;
        database
            .initialize_schema()
            .context("Failed to initialize database schema")?;
        CoachService::new(database.connection()).seed_defaults()?;
        Ok(Self::new(database))
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    fn slots(&self) -> SlotService<'_> {
        SlotService::new(self.database.connection())
    }
}

impl SlotStore for SqliteStore {
    fn list_slots_for_week(&self, week_start: NaiveDate) -> Result<Vec<Slot>> {
        self.slots().list_for_week(week_start)
    }

    fn create_slot(&self, slot: Slot) -> Result<Slot> {
        self.slots().create(slot)
    }

    fn update_slot(&self, id: i64, changes: &SlotChanges) -> Result<()> {
        self.slots().update(id, changes)
    }

    fn delete_slot(&self, id: i64) -> Result<()> {
        self.slots().delete(id)
    }

    fn list_coaches(&self, active_only: bool) -> Result<Vec<Coach>> {
        CoachService::new(self.database.connection()).list(active_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::slot::SlotType;

    fn store() -> SqliteStore {
        SqliteStore::open(":memory:").unwrap()
    }

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn available_slot(coach: &Coach) -> Slot {
        Slot::builder()
            .slot_type(SlotType::Available)
            .coach(coach.id, coach.name.clone())
            .day(3)
            .times("16:00", "16:30")
            .week_start(week())
            .build()
            .unwrap()
    }

    #[test]
    fn open_seeds_coaches() {
        let store = store();
        assert_eq!(store.list_coaches(true).unwrap().len(), 3);
    }

    #[test]
    fn apply_runs_each_mutation_kind() {
        let store = store();
        let coach = store.list_coaches(true).unwrap().remove(0);

        let created = match apply_mutation(&store, SlotMutation::Create(available_slot(&coach))).unwrap() {
            MutationOutcome::Created(slot) => slot,
            other => panic!("unexpected outcome {:?}", other),
        };
        let id = created.id.unwrap();

        let outcome = apply_mutation(
            &store,
            SlotMutation::Update {
                id,
                changes: SlotChanges::relocation(5, "10:00", "10:30"),
            },
        )
        .unwrap();
        assert_eq!(outcome, MutationOutcome::Updated(id));
        assert_eq!(store.list_slots_for_week(week()).unwrap()[0].day_of_week, 5);

        assert_eq!(
            apply_mutation(&store, SlotMutation::Delete(id)).unwrap(),
            MutationOutcome::Deleted(id)
        );
        assert!(store.list_slots_for_week(week()).unwrap().is_empty());
    }

    #[test]
    fn apply_surfaces_store_failures() {
        let store = store();
        assert!(apply_mutation(&store, SlotMutation::Delete(42)).is_err());
    }

    #[test]
    fn mutation_slot_ids() {
        assert_eq!(SlotMutation::Delete(3).slot_id(), Some(3));
        assert_eq!(
            SlotMutation::Update {
                id: 4,
                changes: SlotChanges::default()
            }
            .slot_id(),
            Some(4)
        );
    }
}
