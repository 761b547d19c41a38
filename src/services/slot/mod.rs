//! Slot service entry point.
//! Database-backed slot operations split into CRUD and week queries.

use rusqlite::Connection;

pub mod crud;
pub mod queries;
mod shared;

/// Service for managing schedule slots stored in SQLite.
pub struct SlotService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> SlotService<'a> {
    /// Create a new SlotService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::slot::{CoachAssignment, Slot, SlotChanges, SlotType};
    use crate::services::coach::CoachService;
    use crate::services::database::Database;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        let coaches = CoachService::new(db.connection());
        coaches.create("Sam").unwrap();
        coaches.create("Priya").unwrap();
        db
    }

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 26).unwrap()
    }

    fn sample_slot() -> Slot {
        Slot::builder()
            .student("Maya")
            .coach(1, "Sam")
            .day(1)
            .times("15:00", "15:30")
            .week_start(week())
            .notes("Bring cones")
            .build()
            .unwrap()
    }

    #[test]
    fn test_create_slot() {
        let db = setup_test_db();
        let service = SlotService::new(db.connection());

        let created = service.create(sample_slot()).unwrap();
        assert!(created.id.is_some());
        assert!(created.created_at.is_some());
        assert!(created.updated_at.is_some());
        assert_eq!(created.student_name.as_deref(), Some("Maya"));
    }

    #[test]
    fn test_create_rejects_invalid_slot() {
        let db = setup_test_db();
        let service = SlotService::new(db.connection());

        let mut slot = sample_slot();
        slot.end_time = "14:00".to_string();
        assert!(service.create(slot).is_err());
    }

    #[test]
    fn test_get_slot_round_trips_fields() {
        let db = setup_test_db();
        let service = SlotService::new(db.connection());

        let created = service.create(sample_slot()).unwrap();
        let found = service.get(created.id.unwrap()).unwrap().unwrap();

        assert_eq!(found.slot_type, SlotType::OneToOne);
        assert_eq!(found.coach_name, "Sam");
        assert_eq!(found.day_of_week, 1);
        assert_eq!(found.week_start, week());
        assert_eq!(found.notes, "Bring cones");
    }

    #[test]
    fn test_get_nonexistent_slot() {
        let db = setup_test_db();
        let service = SlotService::new(db.connection());
        assert!(service.get(999).unwrap().is_none());
    }

    #[test]
    fn test_relocation_leaves_other_columns_untouched() {
        let db = setup_test_db();
        let service = SlotService::new(db.connection());

        let created = service.create(sample_slot()).unwrap();
        let id = created.id.unwrap();

        service
            .update(id, &SlotChanges::relocation(4, "17:00", "17:30"))
            .unwrap();

        let moved = service.get(id).unwrap().unwrap();
        assert_eq!(moved.day_of_week, 4);
        assert_eq!(moved.start_time, "17:00");
        assert_eq!(moved.end_time, "17:30");
        assert_eq!(moved.student_name, created.student_name);
        assert_eq!(moved.coach_id, created.coach_id);
        assert_eq!(moved.coach_name, created.coach_name);
        assert_eq!(moved.notes, created.notes);
        assert_eq!(moved.slot_type, created.slot_type);
        assert_eq!(moved.week_start, created.week_start);
    }

    #[test]
    fn test_update_coach_restamps_name() {
        let db = setup_test_db();
        let service = SlotService::new(db.connection());

        let id = service.create(sample_slot()).unwrap().id.unwrap();
        service
            .update(
                id,
                &SlotChanges {
                    coach: Some(CoachAssignment {
                        id: 2,
                        name: "Priya".to_string(),
                    }),
                    ..SlotChanges::default()
                },
            )
            .unwrap();

        let updated = service.get(id).unwrap().unwrap();
        assert_eq!(updated.coach_id, 2);
        assert_eq!(updated.coach_name, "Priya");
    }

    #[test]
    fn test_update_rejects_inverted_window() {
        let db = setup_test_db();
        let service = SlotService::new(db.connection());

        let id = service.create(sample_slot()).unwrap().id.unwrap();
        let result = service.update(
            id,
            &SlotChanges {
                end_time: Some("14:00".to_string()),
                ..SlotChanges::default()
            },
        );
        assert!(result.is_err());
        assert_eq!(service.get(id).unwrap().unwrap().end_time, "15:30");
    }

    #[test]
    fn test_update_nonexistent_slot() {
        let db = setup_test_db();
        let service = SlotService::new(db.connection());

        let result = service.update(999, &SlotChanges::relocation(0, "09:00", "09:30"));
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_switch_to_available_clears_student() {
        let db = setup_test_db();
        let service = SlotService::new(db.connection());

        let id = service.create(sample_slot()).unwrap().id.unwrap();
        service
            .update(
                id,
                &SlotChanges {
                    slot_type: Some(SlotType::Available),
                    student_name: Some(None),
                    ..SlotChanges::default()
                },
            )
            .unwrap();

        let updated = service.get(id).unwrap().unwrap();
        assert_eq!(updated.slot_type, SlotType::Available);
        assert_eq!(updated.student_name, None);
    }

    #[test]
    fn test_delete_slot() {
        let db = setup_test_db();
        let service = SlotService::new(db.connection());

        let id = service.create(sample_slot()).unwrap().id.unwrap();
        service.delete(id).unwrap();
        assert!(service.get(id).unwrap().is_none());
    }

    #[test]
    fn test_delete_nonexistent_slot() {
        let db = setup_test_db();
        let service = SlotService::new(db.connection());
        assert!(service.delete(999).is_err());
    }
}
