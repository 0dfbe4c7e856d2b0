// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Achievement tracking: progress toward goals and unlock evaluation

use super::AchievementProgress;
use crate::catalog::CommandCatalog;
use crate::models::{CommandCategory, Progress, TrainingLevel};
use std::collections::HashSet;

/// An unlockable achievement and its display metadata
///
/// The unlock predicate lives in [`unlocked`]; definitions only carry
/// presentation data so they can be rendered before being earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDefinition {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// What must be done to earn it
    pub description: &'static str,
    /// Emoji label for display
    pub icon: &'static str,
}

/// Every unlockable achievement, in display order
pub static ACHIEVEMENTS: &[AchievementDefinition] = &[
    AchievementDefinition {
        id: "first_training",
        name: "First Step",
        description: "Complete your first training session",
        icon: "🐾",
    },
    AchievementDefinition {
        id: "week_warrior",
        name: "Week Warrior",
        description: "Maintain a 7-day training streak",
        icon: "🔥",
    },
    AchievementDefinition {
        id: "month_master",
        name: "Month Master",
        description: "Maintain a 30-day training streak",
        icon: "⭐",
    },
    AchievementDefinition {
        id: "command_expert",
        name: "Command Expert",
        description: "Master 5 different commands",
        icon: "🎓",
    },
    AchievementDefinition {
        id: "all_master",
        name: "All Master",
        description: "Master all basic commands",
        icon: "👑",
    },
    AchievementDefinition {
        id: "pack_leader",
        name: "Pack Leader",
        description: "Train 3 or more dogs",
        icon: "🐕‍🦺",
    },
    AchievementDefinition {
        id: "centennial",
        name: "Centennial",
        description: "Complete 100 training sessions",
        icon: "💯",
    },
];

/// Progress toward the four headline achievement goals
///
/// Always returns exactly four entries in a fixed order: the 7-day
/// streak, the 30-day streak, 100 total sessions, and 5 mastered
/// commands. `progress` is capped at 100 and `remaining` floored at 0,
/// so over-achieving never produces out-of-range values.
pub fn achievement_progress(
    progress: &[Progress],
    total_sessions: u32,
    streak: u32,
) -> Vec<AchievementProgress> {
    let mastered = progress
        .iter()
        .filter(|p| p.level == TrainingLevel::Mastered)
        .count() as u32;

    vec![
        entry(
            "Week Warrior",
            "Train for 7 consecutive days",
            "🔥",
            streak,
            7,
        ),
        entry(
            "Month Master",
            "Train for 30 consecutive days",
            "⭐",
            streak,
            30,
        ),
        entry(
            "Centennial",
            "Complete 100 training sessions",
            "💯",
            total_sessions,
            100,
        ),
        entry(
            "Command Expert",
            "Master 5 different commands",
            "🎓",
            mastered,
            5,
        ),
    ]
}

fn entry(
    name: &str,
    description: &str,
    icon: &str,
    current: u32,
    target: u32,
) -> AchievementProgress {
    AchievementProgress {
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        current,
        target,
        progress: (current as f64 / target as f64 * 100.0).min(100.0),
        remaining: target.saturating_sub(current),
    }
}

/// Evaluate which achievements are unlocked for the given state
///
/// `dogs_count` is the number of dogs on the account; everything else is
/// the per-dog state the rest of the engine consumes.
pub fn unlocked(
    progress: &[Progress],
    total_sessions: u32,
    streak: u32,
    dogs_count: usize,
    catalog: &CommandCatalog,
) -> Vec<&'static AchievementDefinition> {
    let mastered_ids: HashSet<&str> = progress
        .iter()
        .filter(|p| p.level == TrainingLevel::Mastered)
        .map(|p| p.command_id.as_str())
        .collect();

    ACHIEVEMENTS
        .iter()
        .filter(|def| match def.id {
            "first_training" => total_sessions >= 1,
            "week_warrior" => streak >= 7,
            "month_master" => streak >= 30,
            "command_expert" => mastered_ids.len() >= 5,
            "all_master" => {
                let basics = catalog.by_category(CommandCategory::Basic);
                !basics.is_empty()
                    && basics.iter().all(|c| mastered_ids.contains(c.id.as_str()))
            }
            "pack_leader" => dogs_count >= 3,
            "centennial" => total_sessions >= 100,
            _ => false,
        })
        .collect()
}
