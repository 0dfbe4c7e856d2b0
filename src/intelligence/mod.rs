// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Intelligence Module
//!
//! The coaching engine: pure functions that turn a dog's progress snapshot
//! into actionable guidance.
//!
//! This module includes:
//! - Ranked training recommendations from a six-rule scoring pass
//! - Progress toward the fixed achievement goals
//! - Human-readable training insights
//!
//! Every function here is deterministic and total: identical inputs always
//! produce identical outputs, and malformed snapshots degrade the output
//! rather than raising errors. Command ids that do not resolve against the
//! catalog are skipped by whichever rule encountered them.

use crate::models::Command;
use serde::{Deserialize, Serialize};

pub mod achievements;
pub mod insights;
pub mod recommendations;

pub use achievements::{achievement_progress, unlocked, AchievementDefinition};
pub use insights::InsightGenerator;
pub use recommendations::RecommendationEngine;

/// Coarse ranking bucket for a recommendation
///
/// Priority orders the output list; [`RecommendationItem::score`] breaks
/// ties within a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    Low,
    Medium,
    High,
}

impl RecommendationPriority {
    /// Numeric weight used for ranking (high outranks medium outranks low)
    pub fn weight(&self) -> u8 {
        match self {
            RecommendationPriority::High => 3,
            RecommendationPriority::Medium => 2,
            RecommendationPriority::Low => 1,
        }
    }
}

/// One ranked training suggestion
///
/// Items are constructed fresh on every engine run; their position in the
/// returned list is the ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    /// The catalog command being suggested
    pub command: Command,
    /// Human-readable reason for the suggestion
    pub reason: String,
    /// Ranking bucket assigned by the rule that produced this item
    pub priority: RecommendationPriority,
    /// Fine-grained tie-breaker within the priority bucket
    pub score: i32,
    /// Emoji label for display
    pub icon: String,
}

/// Progress toward one fixed achievement goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementProgress {
    /// Achievement name
    pub name: String,
    /// What the achievement asks for
    pub description: String,
    /// Emoji label for display
    pub icon: String,
    /// Current value of the tracked quantity
    pub current: u32,
    /// Value required to unlock
    pub target: u32,
    /// Completion percentage, capped at 100
    pub progress: f64,
    /// How much is still missing, floored at 0
    pub remaining: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_weights_are_ordered() {
        assert!(RecommendationPriority::High.weight() > RecommendationPriority::Medium.weight());
        assert!(RecommendationPriority::Medium.weight() > RecommendationPriority::Low.weight());
    }

    #[test]
    fn test_priority_serialization() {
        assert_eq!(
            serde_json::to_string(&RecommendationPriority::High).unwrap(),
            "\"high\""
        );
        let priority: RecommendationPriority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(priority, RecommendationPriority::Medium);
    }
}
