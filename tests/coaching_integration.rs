// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Integration tests for the coaching engine against the built-in catalog

use pawsteps::catalog::CommandCatalog;
use pawsteps::intelligence::{
    achievement_progress, InsightGenerator, RecommendationEngine, RecommendationPriority,
};
use pawsteps::models::{Progress, TrainingLevel};
use std::collections::HashSet;
use uuid::Uuid;

fn record(command_id: &str, level: TrainingLevel, sessions: u32) -> Progress {
    Progress {
        id: Uuid::new_v4(),
        dog_id: Uuid::nil(),
        command_id: command_id.to_string(),
        level,
        sessions_completed: sessions,
        last_practiced: None,
        notes: String::new(),
    }
}

fn engine() -> RecommendationEngine {
    RecommendationEngine::new(CommandCatalog::default())
}

#[test]
fn empty_history_produces_empty_coaching() {
    let catalog = CommandCatalog::default();

    assert!(engine().generate(&[], 0).is_empty());
    assert!(InsightGenerator::new(catalog).generate(&[], 0).is_empty());

    let achievements = achievement_progress(&[], 0, 0);
    assert_eq!(achievements.len(), 4);
    for entry in achievements {
        assert_eq!(entry.current, 0);
        assert_eq!(entry.progress, 0.0);
        assert_eq!(entry.remaining, entry.target);
    }
}

#[test]
fn single_learning_command_is_recommended() {
    let progress = vec![record("sit", TrainingLevel::Learning, 2)];

    let recommendations = engine().generate(&progress, 2);

    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].command.id, "sit");
    assert_eq!(recommendations[0].priority, RecommendationPriority::High);
    assert_eq!(recommendations[0].score, 80);
}

#[test]
fn variety_rule_stays_quiet_when_all_categories_mastered() {
    let progress = vec![
        record("sit", TrainingLevel::Mastered, 10),
        record("down", TrainingLevel::Mastered, 8),
        record("come", TrainingLevel::Mastered, 12),
        record("leave_it", TrainingLevel::Mastered, 9),
        record("shake", TrainingLevel::Mastered, 11),
        record("stay", TrainingLevel::NotStarted, 0),
    ];

    let recommendations = engine().generate(&progress, 13);

    assert!(recommendations
        .iter()
        .all(|item| !item.reason.contains("Diversify")));
}

#[test]
fn milestone_session_insights_fire_exactly() {
    let catalog = CommandCatalog::default();
    let progress = vec![record("sit", TrainingLevel::Mastered, 50)];

    let insights = InsightGenerator::new(catalog).generate(&progress, 50);

    assert!(insights.iter().any(|i| i.contains("mastery rate")));
    assert!(insights.iter().any(|i| i.contains("50 sessions complete")));
    assert!(!insights.iter().any(|i| i.contains("momentum")));
}

#[test]
fn completed_streak_and_session_goals_cap_at_full_progress() {
    let achievements = achievement_progress(&[], 100, 7);

    let week = &achievements[0];
    assert_eq!(week.progress, 100.0);
    assert_eq!(week.remaining, 0);

    let sessions = &achievements[2];
    assert_eq!(sessions.progress, 100.0);
    assert_eq!(sessions.remaining, 0);

    // The month streak is only a quarter done
    let month = &achievements[1];
    assert!(month.progress < 100.0);
    assert_eq!(month.remaining, 23);
}

#[test]
fn recommendations_are_bounded_unique_and_sorted() {
    let snapshots: Vec<Vec<Progress>> = vec![
        vec![],
        vec![record("sit", TrainingLevel::Learning, 0)],
        // every catalog command in learning
        CommandCatalog::default()
            .commands()
            .iter()
            .map(|c| record(&c.id, TrainingLevel::Learning, 1))
            .collect(),
        vec![
            record("sit", TrainingLevel::Mastered, 10),
            record("down", TrainingLevel::Mastered, 10),
            record("come", TrainingLevel::Mastered, 10),
            record("stay", TrainingLevel::NotStarted, 0),
            record("leave_it", TrainingLevel::NotStarted, 0),
            record("shake", TrainingLevel::Practicing, 3),
        ],
        vec![
            record("ghost", TrainingLevel::Learning, 1),
            record("sit", TrainingLevel::Practicing, 2),
        ],
    ];

    for (n, snapshot) in snapshots.iter().enumerate() {
        for total_sessions in [0u32, 5, 7, 50] {
            let recommendations = engine().generate(snapshot, total_sessions);

            assert!(recommendations.len() <= 5, "snapshot {} too long", n);

            let mut ids = HashSet::new();
            for item in &recommendations {
                assert!(
                    ids.insert(item.command.id.clone()),
                    "snapshot {} repeats {}",
                    n,
                    item.command.id
                );
            }

            for pair in recommendations.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                assert!(
                    a.priority.weight() > b.priority.weight()
                        || (a.priority.weight() == b.priority.weight() && a.score >= b.score),
                    "snapshot {} not sorted",
                    n
                );
            }
        }
    }
}

#[test]
fn coaching_functions_are_idempotent() {
    let catalog = CommandCatalog::default();
    let progress = vec![
        record("sit", TrainingLevel::Mastered, 9),
        record("down", TrainingLevel::Learning, 2),
        record("leave_it", TrainingLevel::NotStarted, 0),
    ];

    let first = engine().generate(&progress, 10);
    let second = engine().generate(&progress, 10);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );

    let generator = InsightGenerator::new(catalog);
    assert_eq!(
        generator.generate(&progress, 10),
        generator.generate(&progress, 10)
    );

    assert_eq!(
        achievement_progress(&progress, 10, 3),
        achievement_progress(&progress, 10, 3)
    );
}

#[test]
fn coaching_follows_a_training_arc() {
    let engine = engine();
    let catalog = CommandCatalog::default();

    // Day one: everything untouched: start from the basics
    let fresh: Vec<Progress> = catalog
        .commands()
        .iter()
        .map(|c| record(&c.id, TrainingLevel::NotStarted, 0))
        .collect();
    let recommendations = engine.generate(&fresh, 0);
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].score, 95);
    assert_eq!(recommendations[0].command.difficulty, 1);

    // A week in: sit is being learned; finishing it outranks everything
    let mut week_one = fresh.clone();
    week_one[0] = record("sit", TrainingLevel::Learning, 1);
    let recommendations = engine.generate(&week_one, 3);
    assert_eq!(recommendations[0].command.id, "sit");
    assert_eq!(recommendations[0].score, 85); // 90 - 1 * 5

    // A month in: sit mastered; difficulty progression takes over
    let mut month_in = fresh.clone();
    month_in[0] = record("sit", TrainingLevel::Mastered, 6);
    let recommendations = engine.generate(&month_in, 12);
    assert!(!recommendations.is_empty());
    let top = &recommendations[0];
    assert_eq!(top.score, 85);
    assert!(top.command.difficulty <= 2);
    assert_eq!(top.priority, RecommendationPriority::High);
}
