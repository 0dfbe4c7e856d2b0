// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Database Management
//!
//! SQLite persistence for dogs, per-command progress, logged sessions,
//! and reminder schedules. `record_session` is the one compound write:
//! it stores the session, advances the command's progress record, and
//! updates the dog's totals and streak in a single pass.

use crate::catalog::CommandCatalog;
use crate::models::{Dog, Progress, Schedule, TrainingLevel, TrainingSession};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Row, Sqlite, SqlitePool};
use tracing::{debug, warn};
use uuid::Uuid;

/// Database manager for training data
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };

        // Run migrations
        db.migrate().await?;

        Ok(db)
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS dogs (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                breed TEXT NOT NULL,
                age_years INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                total_sessions_completed INTEGER NOT NULL DEFAULT 0,
                current_streak INTEGER NOT NULL DEFAULT 0,
                longest_streak INTEGER NOT NULL DEFAULT 0,
                last_training_date TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS progress (
                id TEXT PRIMARY KEY,
                dog_id TEXT NOT NULL REFERENCES dogs(id),
                command_id TEXT NOT NULL,
                level TEXT NOT NULL DEFAULT 'not_started',
                sessions_completed INTEGER NOT NULL DEFAULT 0,
                last_practiced TEXT,
                notes TEXT NOT NULL DEFAULT '',
                UNIQUE(dog_id, command_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_progress_dog ON progress(dog_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                dog_id TEXT NOT NULL REFERENCES dogs(id),
                command_id TEXT NOT NULL,
                completed_at TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                notes TEXT NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_dog ON sessions(dog_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schedules (
                id TEXT PRIMARY KEY,
                dog_id TEXT NOT NULL REFERENCES dogs(id),
                title TEXT NOT NULL,
                days TEXT NOT NULL,
                time TEXT NOT NULL,
                enabled BOOLEAN NOT NULL DEFAULT 1
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a new dog profile
    pub async fn create_dog(&self, dog: &Dog) -> Result<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO dogs (id, name, breed, age_years, created_at,
                              total_sessions_completed, current_streak,
                              longest_streak, last_training_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(dog.id.to_string())
        .bind(&dog.name)
        .bind(&dog.breed)
        .bind(dog.age_years as i64)
        .bind(dog.created_at.to_rfc3339())
        .bind(dog.total_sessions_completed as i64)
        .bind(dog.current_streak as i64)
        .bind(dog.longest_streak as i64)
        .bind(dog.last_training_date.map(|d| d.to_string()))
        .execute(&self.pool)
        .await?;

        Ok(dog.id)
    }

    /// Get a dog by ID
    pub async fn get_dog(&self, dog_id: Uuid) -> Result<Option<Dog>> {
        let row = sqlx::query("SELECT * FROM dogs WHERE id = ?1")
            .bind(dog_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row_to_dog(&row)?)),
            None => Ok(None),
        }
    }

    /// Get a dog by name
    pub async fn get_dog_by_name(&self, name: &str) -> Result<Option<Dog>> {
        let row = sqlx::query("SELECT * FROM dogs WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row_to_dog(&row)?)),
            None => Ok(None),
        }
    }

    /// All dogs, oldest profile first
    pub async fn list_dogs(&self) -> Result<Vec<Dog>> {
        let rows = sqlx::query("SELECT * FROM dogs ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_dog).collect()
    }

    /// Number of dog profiles
    pub async fn count_dogs(&self) -> Result<usize> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM dogs")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count")?;
        Ok(count as usize)
    }

    /// Seed one not-started progress record per catalog command
    ///
    /// Existing records are left untouched, so re-running after a catalog
    /// update only fills in the new commands.
    pub async fn init_progress(&self, dog_id: Uuid, catalog: &CommandCatalog) -> Result<()> {
        for command in catalog.commands() {
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO progress (id, dog_id, command_id, level,
                                                sessions_completed, notes)
                VALUES (?1, ?2, ?3, ?4, 0, '')
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(dog_id.to_string())
            .bind(&command.id)
            .bind(TrainingLevel::NotStarted.as_str())
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// The dog's progress snapshot, in insertion order
    ///
    /// Rows whose stored level does not parse are skipped with a warning;
    /// the coaching engine never sees a malformed level.
    pub async fn get_progress(&self, dog_id: Uuid) -> Result<Vec<Progress>> {
        let rows = sqlx::query("SELECT * FROM progress WHERE dog_id = ?1 ORDER BY rowid")
            .bind(dog_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        let mut progress = Vec::with_capacity(rows.len());
        for row in &rows {
            if let Some(record) = row_to_progress(row)? {
                progress.push(record);
            }
        }

        Ok(progress)
    }

    /// Log a training session that just finished
    ///
    /// See [`Database::record_session_at`] for the write behavior.
    pub async fn record_session(
        &self,
        dog_id: Uuid,
        command_id: &str,
        duration_minutes: u32,
        notes: &str,
        level_after: Option<TrainingLevel>,
    ) -> Result<TrainingSession> {
        self.record_session_at(dog_id, command_id, duration_minutes, notes, level_after, Utc::now())
            .await
    }

    /// Log a training session with an explicit completion time
    ///
    /// The explicit timestamp exists for importing historical sessions.
    /// Three writes happen together: the session row is inserted, the
    /// command's progress record is upserted (session count, last
    /// practiced, and optionally the level; a not-started command moves
    /// to learning on its first session), and the dog's totals, streak,
    /// and last training date are updated.
    pub async fn record_session_at(
        &self,
        dog_id: Uuid,
        command_id: &str,
        duration_minutes: u32,
        notes: &str,
        level_after: Option<TrainingLevel>,
        completed_at: DateTime<Utc>,
    ) -> Result<TrainingSession> {
        let dog = self
            .get_dog(dog_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Dog not found: {}", dog_id))?;

        let session = TrainingSession {
            id: Uuid::new_v4(),
            dog_id,
            command_id: command_id.to_string(),
            completed_at,
            duration_minutes,
            notes: notes.to_string(),
        };

        sqlx::query(
            r#"
            INSERT INTO sessions (id, dog_id, command_id, completed_at, duration_minutes, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(session.id.to_string())
        .bind(session.dog_id.to_string())
        .bind(&session.command_id)
        .bind(session.completed_at.to_rfc3339())
        .bind(session.duration_minutes as i64)
        .bind(&session.notes)
        .execute(&self.pool)
        .await?;

        self.advance_progress(dog_id, command_id, level_after, completed_at)
            .await?;

        // Dog totals and streak
        let today = completed_at.date_naive();
        let current_streak = advance_streak(dog.current_streak, dog.last_training_date, today);
        let longest_streak = dog.longest_streak.max(current_streak);

        sqlx::query(
            r#"
            UPDATE dogs
            SET total_sessions_completed = ?1, current_streak = ?2,
                longest_streak = ?3, last_training_date = ?4
            WHERE id = ?5
            "#,
        )
        .bind((dog.total_sessions_completed + 1) as i64)
        .bind(current_streak as i64)
        .bind(longest_streak as i64)
        .bind(today.to_string())
        .bind(dog_id.to_string())
        .execute(&self.pool)
        .await?;

        debug!(
            dog.id = %dog_id,
            command.id = %command_id,
            streak = current_streak,
            "Training session recorded"
        );

        Ok(session)
    }

    /// Upsert the per-command progress record for a finished session
    async fn advance_progress(
        &self,
        dog_id: Uuid,
        command_id: &str,
        level_after: Option<TrainingLevel>,
        completed_at: DateTime<Utc>,
    ) -> Result<()> {
        let row = sqlx::query(
            "SELECT * FROM progress WHERE dog_id = ?1 AND command_id = ?2",
        )
        .bind(dog_id.to_string())
        .bind(command_id)
        .fetch_optional(&self.pool)
        .await?;

        let existing = match row {
            Some(ref row) => row_to_progress(row)?,
            None => None,
        };

        match existing {
            Some(record) => {
                let level = level_after.unwrap_or(match record.level {
                    // First session on an untouched command starts it learning
                    TrainingLevel::NotStarted => TrainingLevel::Learning,
                    level => level,
                });

                sqlx::query(
                    r#"
                    UPDATE progress
                    SET level = ?1, sessions_completed = ?2, last_practiced = ?3
                    WHERE dog_id = ?4 AND command_id = ?5
                    "#,
                )
                .bind(level.as_str())
                .bind((record.sessions_completed + 1) as i64)
                .bind(completed_at.to_rfc3339())
                .bind(dog_id.to_string())
                .bind(command_id)
                .execute(&self.pool)
                .await?;
            }
            None => {
                let level = level_after.unwrap_or(TrainingLevel::Learning);

                // OR REPLACE also repairs a row whose level failed to parse
                sqlx::query(
                    r#"
                    INSERT OR REPLACE INTO progress (id, dog_id, command_id, level,
                                                     sessions_completed, last_practiced, notes)
                    VALUES (?1, ?2, ?3, ?4, 1, ?5, '')
                    "#,
                )
                .bind(Uuid::new_v4().to_string())
                .bind(dog_id.to_string())
                .bind(command_id)
                .bind(level.as_str())
                .bind(completed_at.to_rfc3339())
                .execute(&self.pool)
                .await?;
            }
        }

        Ok(())
    }

    /// Sessions for a dog, most recent first
    pub async fn list_sessions(&self, dog_id: Uuid) -> Result<Vec<TrainingSession>> {
        let rows = sqlx::query(
            "SELECT * FROM sessions WHERE dog_id = ?1 ORDER BY completed_at DESC",
        )
        .bind(dog_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_session).collect()
    }

    /// Create a reminder schedule
    pub async fn create_schedule(&self, schedule: &Schedule) -> Result<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO schedules (id, dog_id, title, days, time, enabled)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(schedule.id.to_string())
        .bind(schedule.dog_id.to_string())
        .bind(&schedule.title)
        .bind(serde_json::to_string(&schedule.days)?)
        .bind(&schedule.time)
        .bind(schedule.enabled)
        .execute(&self.pool)
        .await?;

        Ok(schedule.id)
    }

    /// Schedules for a dog
    pub async fn list_schedules(&self, dog_id: Uuid) -> Result<Vec<Schedule>> {
        let rows = sqlx::query("SELECT * FROM schedules WHERE dog_id = ?1 ORDER BY rowid")
            .bind(dog_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_schedule).collect()
    }

    /// Enable or disable a schedule
    pub async fn set_schedule_enabled(&self, schedule_id: Uuid, enabled: bool) -> Result<()> {
        sqlx::query("UPDATE schedules SET enabled = ?1 WHERE id = ?2")
            .bind(enabled)
            .bind(schedule_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Streak rule: same-day sessions keep the streak, next-day sessions
/// extend it, and anything later starts over at 1
fn advance_streak(current: u32, last_training: Option<NaiveDate>, today: NaiveDate) -> u32 {
    match last_training {
        Some(last) if last == today => current.max(1),
        Some(last) if today.signed_duration_since(last).num_days() == 1 => current + 1,
        _ => 1,
    }
}

fn row_to_dog(row: &sqlx::sqlite::SqliteRow) -> Result<Dog> {
    let id_str: String = row.try_get("id")?;
    let created_at_str: String = row.try_get("created_at")?;
    let last_training: Option<String> = row.try_get("last_training_date")?;

    Ok(Dog {
        id: Uuid::parse_str(&id_str)?,
        name: row.try_get("name")?,
        breed: row.try_get("breed")?,
        age_years: row.try_get::<i64, _>("age_years")? as u8,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)?.with_timezone(&Utc),
        total_sessions_completed: row.try_get::<i64, _>("total_sessions_completed")? as u32,
        current_streak: row.try_get::<i64, _>("current_streak")? as u32,
        longest_streak: row.try_get::<i64, _>("longest_streak")? as u32,
        last_training_date: last_training
            .map(|d| d.parse::<NaiveDate>())
            .transpose()?,
    })
}

/// Convert a progress row, skipping rows with an unknown level
fn row_to_progress(row: &sqlx::sqlite::SqliteRow) -> Result<Option<Progress>> {
    let id_str: String = row.try_get("id")?;
    let dog_id_str: String = row.try_get("dog_id")?;
    let command_id: String = row.try_get("command_id")?;
    let level_str: String = row.try_get("level")?;
    let last_practiced: Option<String> = row.try_get("last_practiced")?;

    let level = match TrainingLevel::parse(&level_str) {
        Some(level) => level,
        None => {
            warn!(
                command.id = %command_id,
                level = %level_str,
                "Skipping progress row with unknown level"
            );
            return Ok(None);
        }
    };

    Ok(Some(Progress {
        id: Uuid::parse_str(&id_str)?,
        dog_id: Uuid::parse_str(&dog_id_str)?,
        command_id,
        level,
        sessions_completed: row.try_get::<i64, _>("sessions_completed")? as u32,
        last_practiced: last_practiced
            .map(|t| DateTime::parse_from_rfc3339(&t).map(|t| t.with_timezone(&Utc)))
            .transpose()?,
        notes: row.try_get("notes")?,
    }))
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> Result<TrainingSession> {
    let id_str: String = row.try_get("id")?;
    let dog_id_str: String = row.try_get("dog_id")?;
    let completed_at_str: String = row.try_get("completed_at")?;

    Ok(TrainingSession {
        id: Uuid::parse_str(&id_str)?,
        dog_id: Uuid::parse_str(&dog_id_str)?,
        command_id: row.try_get("command_id")?,
        completed_at: DateTime::parse_from_rfc3339(&completed_at_str)?.with_timezone(&Utc),
        duration_minutes: row.try_get::<i64, _>("duration_minutes")? as u32,
        notes: row.try_get("notes")?,
    })
}

fn row_to_schedule(row: &sqlx::sqlite::SqliteRow) -> Result<Schedule> {
    let id_str: String = row.try_get("id")?;
    let dog_id_str: String = row.try_get("dog_id")?;
    let days_json: String = row.try_get("days")?;

    Ok(Schedule {
        id: Uuid::parse_str(&id_str)?,
        dog_id: Uuid::parse_str(&dog_id_str)?,
        title: row.try_get("title")?,
        days: serde_json::from_str(&days_json)?,
        time: row.try_get("time")?,
        enabled: row.try_get("enabled")?,
    })
}
