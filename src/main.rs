// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use pawsteps::catalog::CommandCatalog;
use pawsteps::config::Config;
use pawsteps::database::Database;
use pawsteps::intelligence::{
    achievement_progress, unlocked, InsightGenerator, RecommendationEngine,
};
use pawsteps::logging::{self, AppLogger};
use pawsteps::models::{CommandCategory, Dog, Schedule, TrainingLevel};
use pawsteps::schedule::next_occurrence;

#[derive(Parser, Debug)]
#[command(author, version, about = "Dog training tracker and coach", long_about = None)]
struct Args {
    /// Path to a TOML catalog replacing the built-in commands
    #[arg(long)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Add a dog profile
    AddDog {
        name: String,
        #[arg(long, default_value = "unknown")]
        breed: String,
        #[arg(long, default_value_t = 1)]
        age: u8,
    },
    /// List dog profiles
    Dogs,
    /// Show the command catalog
    Catalog {
        /// Restrict to one category (basic, manners, advanced)
        #[arg(long)]
        category: Option<String>,
    },
    /// Log a completed training session
    Log {
        /// Dog name or id
        dog: String,
        /// Catalog command id (e.g. sit)
        command: String,
        #[arg(long, default_value_t = 5)]
        minutes: u32,
        /// Set the command's level after this session
        #[arg(long)]
        level: Option<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Show ranked training recommendations
    Recommend { dog: String },
    /// Show training insights
    Insights { dog: String },
    /// Show achievement progress and unlocked achievements
    Achievements { dog: String },
    /// Manage reminder schedules
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },
}

#[derive(Subcommand, Debug)]
enum ScheduleAction {
    /// Add a reminder schedule
    Add {
        dog: String,
        title: String,
        /// Comma-separated weekday names (e.g. monday,thursday)
        #[arg(long, value_delimiter = ',')]
        days: Vec<String>,
        /// Time of day, 24-hour HH:MM
        #[arg(long)]
        time: String,
    },
    /// List schedules with their next occurrence
    List { dog: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;

    let args = Args::parse();

    let config = Config::load()?;
    config.ensure_data_dir()?;

    let catalog_path = args.catalog.or_else(|| config.catalog_path.clone());
    let catalog_source = catalog_path.clone().unwrap_or_else(|| "built-in".to_string());
    let catalog = CommandCatalog::load(catalog_path)?;
    AppLogger::log_catalog_loaded(&catalog_source, catalog.len());

    let db = Database::new(&config.database_url).await?;

    match args.command {
        CliCommand::AddDog { name, breed, age } => {
            let dog = Dog::new(name, breed, age);
            db.create_dog(&dog).await?;
            db.init_progress(dog.id, &catalog).await?;
            println!("Added {} ({}) - id {}", dog.name, dog.breed, dog.id);
        }

        CliCommand::Dogs => {
            let dogs = db.list_dogs().await?;
            if dogs.is_empty() {
                println!("No dogs yet. Add one with `pawsteps add-dog <name>`.");
            }
            for dog in dogs {
                println!(
                    "{}  {} ({}, {}y) - {} sessions, {} day streak (best {})",
                    dog.id,
                    dog.name,
                    dog.breed,
                    dog.age_years,
                    dog.total_sessions_completed,
                    dog.current_streak,
                    dog.longest_streak
                );
            }
        }

        CliCommand::Catalog { category } => {
            let filter = category.as_deref().map(parse_category).transpose()?;
            for command in catalog.commands() {
                if let Some(filter) = filter {
                    if command.category != filter {
                        continue;
                    }
                }
                println!(
                    "{:<12} {:<12} {:<10} difficulty {}  ~{} min  {}",
                    command.id,
                    command.name,
                    command.category.display_name(),
                    command.difficulty,
                    command.estimated_minutes,
                    command.description
                );
            }
        }

        CliCommand::Log {
            dog,
            command,
            minutes,
            level,
            notes,
        } => {
            let dog = resolve_dog(&db, &dog).await?;
            if catalog.find(&command).is_none() {
                return Err(anyhow!("Unknown command id: {}", command));
            }
            let level_after = level
                .map(|l| {
                    TrainingLevel::parse(&l)
                        .ok_or_else(|| anyhow!("Unknown level: {} (use not_started, learning, practicing, or mastered)", l))
                })
                .transpose()?;

            db.record_session(dog.id, &command, minutes, &notes, level_after)
                .await?;
            AppLogger::log_session_recorded(&dog.id.to_string(), &command, minutes);

            let updated = db
                .get_dog(dog.id)
                .await?
                .ok_or_else(|| anyhow!("Dog disappeared during update"))?;
            println!(
                "Logged {} min of \"{}\" for {} - {} total sessions, {} day streak",
                minutes, command, updated.name, updated.total_sessions_completed, updated.current_streak
            );
        }

        CliCommand::Recommend { dog } => {
            let dog = resolve_dog(&db, &dog).await?;
            let progress = db.get_progress(dog.id).await?;

            let engine = RecommendationEngine::new(catalog);
            let recommendations = engine.generate(&progress, dog.total_sessions_completed);
            AppLogger::log_coaching_run(&dog.id.to_string(), recommendations.len(), 0);

            if recommendations.is_empty() {
                println!("No recommendations yet - log a few sessions first.");
            }
            for (i, item) in recommendations.iter().enumerate() {
                println!(
                    "{}. {} {} [{:?}, score {}]\n   {}",
                    i + 1,
                    item.icon,
                    item.command.name,
                    item.priority,
                    item.score,
                    item.reason
                );
            }
        }

        CliCommand::Insights { dog } => {
            let dog = resolve_dog(&db, &dog).await?;
            let progress = db.get_progress(dog.id).await?;

            let generator = InsightGenerator::new(catalog);
            let insights = generator.generate(&progress, dog.total_sessions_completed);
            AppLogger::log_coaching_run(&dog.id.to_string(), 0, insights.len());

            if insights.is_empty() {
                println!("No insights yet - log a few sessions first.");
            }
            for insight in insights {
                println!("{}", insight);
            }
        }

        CliCommand::Achievements { dog } => {
            let dog = resolve_dog(&db, &dog).await?;
            let progress = db.get_progress(dog.id).await?;
            let dogs_count = db.count_dogs().await?;

            for entry in achievement_progress(
                &progress,
                dog.total_sessions_completed,
                dog.current_streak,
            ) {
                println!(
                    "{} {:<15} {:>3.0}%  ({}/{} - {} to go)",
                    entry.icon, entry.name, entry.progress, entry.current, entry.target, entry.remaining
                );
            }

            let earned = unlocked(
                &progress,
                dog.total_sessions_completed,
                dog.current_streak,
                dogs_count,
                &catalog,
            );
            if !earned.is_empty() {
                println!("\nUnlocked:");
                for achievement in earned {
                    println!("{} {} - {}", achievement.icon, achievement.name, achievement.description);
                }
            }
        }

        CliCommand::Schedule { action } => match action {
            ScheduleAction::Add {
                dog,
                title,
                days,
                time,
            } => {
                let dog = resolve_dog(&db, &dog).await?;
                let schedule = Schedule::new(dog.id, title, days, time);

                match next_occurrence(&schedule, Utc::now()) {
                    Some(at) => {
                        db.create_schedule(&schedule).await?;
                        println!("Added \"{}\" - next occurrence {}", schedule.title, at);
                    }
                    None => {
                        return Err(anyhow!(
                            "Schedule would never fire - check the day names and HH:MM time"
                        ));
                    }
                }
            }
            ScheduleAction::List { dog } => {
                let dog = resolve_dog(&db, &dog).await?;
                let schedules = db.list_schedules(dog.id).await?;
                if schedules.is_empty() {
                    println!("No schedules for {}.", dog.name);
                }
                for schedule in schedules {
                    let next = next_occurrence(&schedule, Utc::now())
                        .map(|at| at.to_rfc3339())
                        .unwrap_or_else(|| "never (disabled or invalid)".to_string());
                    println!(
                        "{}  \"{}\" on {} at {} - next: {}",
                        schedule.id,
                        schedule.title,
                        schedule.days.join(", "),
                        schedule.time,
                        next
                    );
                }
            }
        },
    }

    Ok(())
}

/// Resolve a dog by id or name
async fn resolve_dog(db: &Database, key: &str) -> Result<Dog> {
    if let Ok(id) = Uuid::parse_str(key) {
        if let Some(dog) = db.get_dog(id).await? {
            return Ok(dog);
        }
    }

    db.get_dog_by_name(key)
        .await?
        .ok_or_else(|| anyhow!("No dog named or identified by: {}", key))
}

fn parse_category(value: &str) -> Result<CommandCategory> {
    match value {
        "basic" => Ok(CommandCategory::Basic),
        "manners" => Ok(CommandCategory::Manners),
        "advanced" => Ok(CommandCategory::Advanced),
        other => Err(anyhow!(
            "Unknown category: {} (use basic, manners, or advanced)",
            other
        )),
    }
}
