//! Coach service.
//! Coaches are read by the grid for the filter control and for stamping
//! coach names onto slots. Renaming and retiring coaches happens outside the
//! scheduler; a retired coach is a row with `active = 0`.

use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;

use crate::models::coach::Coach;

/// Names inserted into an empty database so a new install has a usable selector.
pub const DEFAULT_COACHES: [&str; 3] = ["Head Coach", "Assistant Coach", "Guest Coach"];

pub struct CoachService<'a> {
    conn: &'a Connection,
}

impl<'a> CoachService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, name: &str) -> Result<Coach> {
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("Coach name cannot be empty"));
        }

        self.conn
            .execute("INSERT INTO coaches (name, active) VALUES (?, 1)", [name])
            .context("Failed to insert coach")?;

        Ok(Coach::new(self.conn.last_insert_rowid(), name))
    }

    /// List coaches ordered by name.
    pub fn list(&self, active_only: bool) -> Result<Vec<Coach>> {
        let sql = if active_only {
            "SELECT id, name, active FROM coaches WHERE active = 1 ORDER BY name COLLATE NOCASE"
        } else {
            "SELECT id, name, active FROM coaches ORDER BY name COLLATE NOCASE"
        };

        let mut stmt = self.conn.prepare(sql).context("Failed to prepare coach query")?;
        let coaches = stmt
            .query_map([], |row| {
                Ok(Coach {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    active: row.get::<_, i32>(2)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read coaches")?;

        Ok(coaches)
    }

    /// Insert [`DEFAULT_COACHES`] when the table is empty. Returns how many were added.
    pub fn seed_defaults(&self) -> Result<usize> {
        let existing: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM coaches", [], |row| row.get(0))
            .context("Failed to count coaches")?;

        if existing > 0 {
            return Ok(0);
        }

        for name in DEFAULT_COACHES {
            self.create(name)?;
        }
        log::info!("Seeded {} default coaches", DEFAULT_COACHES.len());
        Ok(DEFAULT_COACHES.len())
    }
}
