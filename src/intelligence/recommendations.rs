// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Training recommendation engine
//!
//! Six independent rules each contribute zero or more candidate
//! suggestions; the candidates are then ranked by priority and score,
//! deduplicated per command, and truncated to the top five.

use super::{RecommendationItem, RecommendationPriority};
use crate::catalog::CommandCatalog;
use crate::models::{Command, CommandCategory, Progress, TrainingLevel};
use std::collections::HashSet;

/// Rule-based recommendation engine over a progress snapshot
///
/// The engine owns a read-only copy of the command catalog and holds no
/// other state, so a single instance can serve any number of snapshots.
pub struct RecommendationEngine {
    catalog: CommandCatalog,
}

impl RecommendationEngine {
    /// Create an engine over the given catalog
    pub fn new(catalog: CommandCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog this engine resolves command ids against
    pub fn catalog(&self) -> &CommandCatalog {
        &self.catalog
    }

    /// Generate up to five ranked training recommendations
    ///
    /// `total_sessions` is the dog's lifetime session count; it only
    /// drives the streak-maintenance rule. Progress records whose command
    /// id does not resolve against the catalog are skipped by whichever
    /// rule encountered them.
    pub fn generate(&self, progress: &[Progress], total_sessions: u32) -> Vec<RecommendationItem> {
        // Group records by mastery level
        let not_started = by_level(progress, TrainingLevel::NotStarted);
        let learning = by_level(progress, TrainingLevel::Learning);
        let practicing = by_level(progress, TrainingLevel::Practicing);
        let mastered = by_level(progress, TrainingLevel::Mastered);

        let mut recommendations = Vec::new();

        recommendations.extend(self.finish_learning(&learning));
        recommendations.extend(self.reinforce_practicing(&practicing));
        recommendations.extend(self.difficulty_progression(&not_started, &mastered));
        recommendations.extend(self.cold_start(&not_started, &learning, &mastered));
        recommendations.extend(self.category_variety(&not_started, &mastered));
        recommendations.extend(self.streak_maintenance(&mastered, total_sessions));

        rank(recommendations)
    }

    /// Rule 1: commands in the learning stage should be finished first
    ///
    /// The score decays with accumulated sessions, so commands that just
    /// entered the learning stage rank ahead of long-running ones.
    fn finish_learning(&self, learning: &[&Progress]) -> Vec<RecommendationItem> {
        let mut items = Vec::new();

        for record in learning {
            if let Some(command) = self.catalog.find(&record.command_id) {
                items.push(RecommendationItem {
                    reason: format!(
                        "You're almost there! Keep training \"{}\" to master it.",
                        command.name
                    ),
                    command: command.clone(),
                    priority: RecommendationPriority::High,
                    score: 90 - record.sessions_completed as i32 * 5,
                    icon: "🎓".to_string(),
                });
            }
        }

        items
    }

    /// Rule 2: practicing commands need reinforcement before they slip
    fn reinforce_practicing(&self, practicing: &[&Progress]) -> Vec<RecommendationItem> {
        let mut items = Vec::new();

        for record in practicing {
            if let Some(command) = self.catalog.find(&record.command_id) {
                items.push(RecommendationItem {
                    reason: format!(
                        "Great progress! A few more sessions will master \"{}\".",
                        command.name
                    ),
                    command: command.clone(),
                    priority: RecommendationPriority::Medium,
                    score: 70 - record.sessions_completed as i32,
                    icon: "✨".to_string(),
                });
            }
        }

        items
    }

    /// Rule 3: once something is mastered, suggest the next difficulty step
    fn difficulty_progression(
        &self,
        not_started: &[&Progress],
        mastered: &[&Progress],
    ) -> Option<RecommendationItem> {
        if not_started.is_empty() || mastered.is_empty() {
            return None;
        }

        let max_mastered = mastered
            .iter()
            .filter_map(|record| self.catalog.find(&record.command_id))
            .map(|command| command.difficulty)
            .filter(|difficulty| *difficulty > 0)
            .max()?;
        let next_difficulty = (max_mastered + 1).min(3);

        let mut candidates: Vec<&Command> = not_started
            .iter()
            .filter_map(|record| self.catalog.find(&record.command_id))
            .filter(|command| command.difficulty <= next_difficulty)
            .collect();
        // Stable sort: ties keep snapshot order
        candidates.sort_by_key(|command| command.difficulty);
        let command = *candidates.first()?;

        Some(RecommendationItem {
            reason: format!(
                "Time to level up! Try \"{}\" to expand your dog's skills.",
                command.name
            ),
            command: command.clone(),
            priority: RecommendationPriority::High,
            score: 85,
            icon: "🚀".to_string(),
        })
    }

    /// Rule 4: with nothing mastered or in progress, start from the basics
    fn cold_start(
        &self,
        not_started: &[&Progress],
        learning: &[&Progress],
        mastered: &[&Progress],
    ) -> Option<RecommendationItem> {
        if !mastered.is_empty() || !learning.is_empty() || not_started.is_empty() {
            return None;
        }

        let command = not_started
            .iter()
            .filter_map(|record| self.catalog.find(&record.command_id))
            .find(|command| command.difficulty == 1)?;

        Some(RecommendationItem {
            reason: format!(
                "Perfect starting point! \"{}\" is an essential command.",
                command.name
            ),
            command: command.clone(),
            priority: RecommendationPriority::High,
            score: 95,
            icon: "🐾".to_string(),
        })
    }

    /// Rule 5: with a solid base, cover categories not yet mastered
    fn category_variety(
        &self,
        not_started: &[&Progress],
        mastered: &[&Progress],
    ) -> Vec<RecommendationItem> {
        let mut items = Vec::new();

        if mastered.len() < 3 {
            return items;
        }

        let mastered_categories: HashSet<CommandCategory> = mastered
            .iter()
            .filter_map(|record| self.catalog.find(&record.command_id))
            .map(|command| command.category)
            .collect();

        for category in CommandCategory::ALL {
            if mastered_categories.contains(&category) {
                continue;
            }

            if let Some(command) = not_started
                .iter()
                .filter_map(|record| self.catalog.find(&record.command_id))
                .find(|command| command.category == category)
            {
                items.push(RecommendationItem {
                    reason: format!(
                        "Diversify! Try a {} command like \"{}\".",
                        category.display_name(),
                        command.name
                    ),
                    command: command.clone(),
                    priority: RecommendationPriority::Medium,
                    score: 75,
                    icon: "🎯".to_string(),
                });
            }
        }

        items
    }

    /// Rule 6: on every fifth session, a quick win keeps the streak alive
    fn streak_maintenance(
        &self,
        mastered: &[&Progress],
        total_sessions: u32,
    ) -> Option<RecommendationItem> {
        if total_sessions == 0 || total_sessions % 5 != 0 {
            return None;
        }

        let command = mastered
            .iter()
            .filter_map(|record| self.catalog.find(&record.command_id))
            .find(|command| command.estimated_minutes <= 10)?;

        Some(RecommendationItem {
            reason: format!(
                "Keep the streak alive! Do a quick \"{}\" session.",
                command.name
            ),
            command: command.clone(),
            priority: RecommendationPriority::High,
            score: 80,
            icon: "🔥".to_string(),
        })
    }
}

fn by_level(progress: &[Progress], level: TrainingLevel) -> Vec<&Progress> {
    progress.iter().filter(|p| p.level == level).collect()
}

/// Sort by priority then score, collapse duplicate commands, keep the top 5
fn rank(mut recommendations: Vec<RecommendationItem>) -> Vec<RecommendationItem> {
    recommendations.sort_by(|a, b| {
        b.priority
            .weight()
            .cmp(&a.priority.weight())
            .then_with(|| b.score.cmp(&a.score))
    });

    // Collapse by command id, keeping the higher score for each command.
    // A replaced entry keeps the list position of its first occurrence.
    let mut unique: Vec<RecommendationItem> = Vec::new();
    for rec in recommendations {
        match unique.iter_mut().find(|r| r.command.id == rec.command.id) {
            Some(existing) => {
                if existing.score < rec.score {
                    *existing = rec;
                }
            }
            None => unique.push(rec),
        }
    }

    unique.truncate(5);
    unique
}
