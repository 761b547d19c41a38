use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_coaches_table(conn)?;
    create_slots_table(conn)?;
    run_slot_migrations(conn)?;
    Ok(())
}

fn create_coaches_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS coaches (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create coaches table")?;

    Ok(())
}

fn create_slots_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS slots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slot_type TEXT NOT NULL,
            student_name TEXT,
            coach_id INTEGER NOT NULL REFERENCES coaches(id),
            coach_name TEXT NOT NULL,
            day_of_week INTEGER NOT NULL CHECK (day_of_week BETWEEN 0 AND 6),
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            week_start TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create slots table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_slots_week_start ON slots(week_start)",
        [],
    )
    .context("Failed to create slots week index")?;

    Ok(())
}

fn run_slot_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "slots",
        "notes",
        "ALTER TABLE slots ADD COLUMN notes TEXT NOT NULL DEFAULT ''",
    )?;

    Ok(())
}
