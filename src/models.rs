// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! This module contains the core data structures used throughout Pawsteps.
//! These models provide a unified representation of training data shared by
//! the catalog, the persistence layer, and the coaching engine.
//!
//! ## Design Principles
//!
//! - **Closed enums**: Categories and mastery levels are closed sets, so
//!   invalid states are unrepresentable inside the crate
//! - **Total consumers**: The coaching engine never fails on a snapshot;
//!   anything that cannot be resolved is skipped, not raised
//! - **Serializable**: All models support JSON serialization for export
//!   and for the CLI's machine-readable output
//!
//! ## Core Models
//!
//! - [`Command`]: A catalog entry describing one trainable behavior
//! - [`Progress`]: Per-dog, per-command mastery state and session count
//! - [`Dog`]: A dog profile with session totals and streak counters
//! - [`TrainingSession`]: One logged training session
//! - [`Schedule`]: A recurring training reminder definition

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category a training command belongs to
///
/// The catalog is organized into three fixed categories, ordered from
/// foundational obedience to trick-level work. Several coaching rules
/// iterate the categories in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandCategory {
    /// Foundational obedience commands (sit, stay, come)
    Basic,
    /// Household manners (leave it, wait, settle)
    Manners,
    /// Tricks and advanced work (shake, spin, roll over)
    Advanced,
}

impl CommandCategory {
    /// All categories in their fixed evaluation order
    pub const ALL: [CommandCategory; 3] = [
        CommandCategory::Basic,
        CommandCategory::Manners,
        CommandCategory::Advanced,
    ];

    /// Get the human-readable name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            CommandCategory::Basic => "basic",
            CommandCategory::Manners => "manners",
            CommandCategory::Advanced => "advanced",
        }
    }
}

/// Mastery stage of a command for one dog
///
/// Progress advances through the stages in order, though the model does
/// not enforce monotonic movement; a trainer may demote a command back
/// to `Learning` after a regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLevel {
    /// No training sessions yet
    NotStarted,
    /// Actively being taught
    Learning,
    /// Known but still being reinforced
    Practicing,
    /// Reliably performed on cue
    Mastered,
}

impl TrainingLevel {
    /// Storage representation of this level
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingLevel::NotStarted => "not_started",
            TrainingLevel::Learning => "learning",
            TrainingLevel::Practicing => "practicing",
            TrainingLevel::Mastered => "mastered",
        }
    }

    /// Parse a stored level string
    ///
    /// Returns `None` for anything outside the four known levels; callers
    /// at the storage boundary decide whether to skip or reject the row.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "not_started" => Some(TrainingLevel::NotStarted),
            "learning" => Some(TrainingLevel::Learning),
            "practicing" => Some(TrainingLevel::Practicing),
            "mastered" => Some(TrainingLevel::Mastered),
            _ => None,
        }
    }
}

/// A catalog entry describing one trainable dog behavior
///
/// Commands are defined by the catalog and never mutated at runtime. The
/// coaching engine reads `id`, `name`, `category`, `difficulty`, and
/// `estimated_minutes`; the step-by-step content is presentation material
/// for the CLI and any downstream UI.
///
/// # Examples
///
/// ```rust
/// use pawsteps::models::{Command, CommandCategory};
///
/// let command = Command {
///     id: "sit".to_string(),
///     name: "Sit".to_string(),
///     description: "Dog lowers into a seated position on cue".to_string(),
///     category: CommandCategory::Basic,
///     difficulty: 1,
///     estimated_minutes: 5,
///     steps: vec!["Hold a treat above the nose".to_string()],
///     tips: vec!["Keep sessions short".to_string()],
///     common_mistakes: vec!["Repeating the cue".to_string()],
/// };
/// assert_eq!(command.difficulty, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    /// Unique identifier for the command (stable across catalog versions)
    pub id: String,
    /// Human-readable name of the command
    pub name: String,
    /// Short description of the behavior
    pub description: String,
    /// Category this command belongs to
    pub category: CommandCategory,
    /// Difficulty rating from 1 (easiest) to 3 (hardest)
    pub difficulty: u8,
    /// Estimated minutes for one training session
    pub estimated_minutes: u32,
    /// Ordered training steps
    #[serde(default)]
    pub steps: Vec<String>,
    /// Trainer tips
    #[serde(default)]
    pub tips: Vec<String>,
    /// Mistakes trainers commonly make with this command
    #[serde(default)]
    pub common_mistakes: Vec<String>,
}

/// Per-dog, per-command mastery state
///
/// One record is expected per catalog command once a dog's progress has
/// been initialized, but consumers tolerate missing or duplicate entries;
/// the coaching engine treats the snapshot as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    /// Unique identifier for this progress record
    pub id: Uuid,
    /// Dog this record belongs to
    pub dog_id: Uuid,
    /// Catalog command this record tracks
    pub command_id: String,
    /// Current mastery level
    pub level: TrainingLevel,
    /// Number of completed sessions for this command
    pub sessions_completed: u32,
    /// When this command was last practiced
    pub last_practiced: Option<DateTime<Utc>>,
    /// Free-form trainer notes
    pub notes: String,
}

impl Progress {
    /// Create a fresh, not-started progress record
    pub fn new(dog_id: Uuid, command_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            dog_id,
            command_id: command_id.into(),
            level: TrainingLevel::NotStarted,
            sessions_completed: 0,
            last_practiced: None,
            notes: String::new(),
        }
    }
}

/// A dog profile with training totals
///
/// Session totals and streak counters are maintained by the persistence
/// layer whenever a session is logged; the coaching engine only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dog {
    /// Unique identifier for the dog
    pub id: Uuid,
    /// The dog's name
    pub name: String,
    /// Breed, free-form
    pub breed: String,
    /// Age in years
    pub age_years: u8,
    /// When this profile was created
    pub created_at: DateTime<Utc>,
    /// Total training sessions logged across all commands
    pub total_sessions_completed: u32,
    /// Consecutive training days up to the last session
    pub current_streak: u32,
    /// Longest streak ever reached
    pub longest_streak: u32,
    /// Calendar date of the most recent session
    pub last_training_date: Option<NaiveDate>,
}

impl Dog {
    /// Create a new dog profile with zeroed counters
    pub fn new(name: impl Into<String>, breed: impl Into<String>, age_years: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            breed: breed.into(),
            age_years,
            created_at: Utc::now(),
            total_sessions_completed: 0,
            current_streak: 0,
            longest_streak: 0,
            last_training_date: None,
        }
    }
}

/// One logged training session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSession {
    /// Unique identifier for the session
    pub id: Uuid,
    /// Dog that was trained
    pub dog_id: Uuid,
    /// Command that was practiced
    pub command_id: String,
    /// When the session finished
    pub completed_at: DateTime<Utc>,
    /// Session length in minutes
    pub duration_minutes: u32,
    /// Free-form session notes
    pub notes: String,
}

/// A recurring training reminder definition
///
/// Schedules describe *when* the trainer intends to train; delivering the
/// reminder (push notification, calendar entry) is left to the caller.
/// Day names are kept as strings so unknown values degrade to a skipped
/// day rather than a rejected schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Unique identifier for the schedule
    pub id: Uuid,
    /// Dog this schedule is for
    pub dog_id: Uuid,
    /// Reminder title shown to the trainer
    pub title: String,
    /// Weekday names the reminder fires on (e.g. "monday")
    pub days: Vec<String>,
    /// Time of day in "HH:MM" 24-hour format
    pub time: String,
    /// Whether the reminder is active
    pub enabled: bool,
}

impl Schedule {
    /// Create a new enabled schedule
    pub fn new(
        dog_id: Uuid,
        title: impl Into<String>,
        days: Vec<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            dog_id,
            title: title.into(),
            days,
            time: time.into(),
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_sample_command() -> Command {
        Command {
            id: "sit".to_string(),
            name: "Sit".to_string(),
            description: "Dog lowers into a seated position on cue".to_string(),
            category: CommandCategory::Basic,
            difficulty: 1,
            estimated_minutes: 5,
            steps: vec![
                "Hold a treat above the nose".to_string(),
                "Move it back over the head".to_string(),
            ],
            tips: vec!["Keep sessions short".to_string()],
            common_mistakes: vec!["Repeating the cue".to_string()],
        }
    }

    #[test]
    fn test_command_serialization() {
        let command = create_sample_command();

        let json = serde_json::to_string(&command).expect("Failed to serialize command");
        assert!(json.contains("\"basic\"")); // category should be snake_case
        assert!(json.contains("Sit"));

        let deserialized: Command = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(deserialized.id, command.id);
        assert_eq!(deserialized.category, CommandCategory::Basic);
        assert_eq!(deserialized.steps.len(), 2);
    }

    #[test]
    fn test_command_optional_lists_default() {
        // Catalog files may omit the content lists entirely
        let json = r#"{
            "id": "wait",
            "name": "Wait",
            "description": "Pause until released",
            "category": "manners",
            "difficulty": 2,
            "estimated_minutes": 10
        }"#;

        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(command.category, CommandCategory::Manners);
        assert!(command.steps.is_empty());
        assert!(command.tips.is_empty());
        assert!(command.common_mistakes.is_empty());
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&CommandCategory::Basic).unwrap(),
            "\"basic\""
        );
        assert_eq!(
            serde_json::to_string(&CommandCategory::Advanced).unwrap(),
            "\"advanced\""
        );

        let category: CommandCategory = serde_json::from_str("\"manners\"").unwrap();
        assert_eq!(category, CommandCategory::Manners);
    }

    #[test]
    fn test_training_level_round_trip() {
        for level in [
            TrainingLevel::NotStarted,
            TrainingLevel::Learning,
            TrainingLevel::Practicing,
            TrainingLevel::Mastered,
        ] {
            assert_eq!(TrainingLevel::parse(level.as_str()), Some(level));
        }
    }

    #[test]
    fn test_training_level_parse_rejects_unknown() {
        assert_eq!(TrainingLevel::parse("graduated"), None);
        assert_eq!(TrainingLevel::parse(""), None);
        assert_eq!(TrainingLevel::parse("MASTERED"), None);
    }

    #[test]
    fn test_progress_new_defaults() {
        let dog_id = Uuid::new_v4();
        let progress = Progress::new(dog_id, "sit");

        assert_eq!(progress.dog_id, dog_id);
        assert_eq!(progress.command_id, "sit");
        assert_eq!(progress.level, TrainingLevel::NotStarted);
        assert_eq!(progress.sessions_completed, 0);
        assert!(progress.last_practiced.is_none());
    }

    #[test]
    fn test_dog_new_zeroed_counters() {
        let dog = Dog::new("Rex", "Border Collie", 3);

        assert_eq!(dog.name, "Rex");
        assert_eq!(dog.total_sessions_completed, 0);
        assert_eq!(dog.current_streak, 0);
        assert_eq!(dog.longest_streak, 0);
        assert!(dog.last_training_date.is_none());
    }

    #[test]
    fn test_schedule_serialization() {
        let schedule = Schedule::new(
            Uuid::new_v4(),
            "Morning session",
            vec!["monday".to_string(), "wednesday".to_string()],
            "07:30",
        );

        let json = serde_json::to_string(&schedule).unwrap();
        let deserialized: Schedule = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.title, "Morning session");
        assert_eq!(deserialized.days.len(), 2);
        assert!(deserialized.enabled);
    }
}
