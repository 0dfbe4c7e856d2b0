// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Pawsteps
//!
//! A dog-training progress tracker with a rule-based coaching engine.
//! Pawsteps keeps per-dog training records against a fixed catalog of
//! commands and turns them into ranked training recommendations,
//! achievement progress, and human-readable insights.
//!
//! ## Features
//!
//! - **Command catalog**: a built-in, ordered catalog of training commands
//!   across three categories, overridable from a TOML file
//! - **Session logging**: per-dog, per-command progress with streak tracking
//! - **Coaching engine**: six-rule recommendation scoring, achievement
//!   progress, and training insights, all pure functions over a snapshot
//! - **Schedules**: reminder definitions with next-occurrence computation
//!
//! ## Quick Start
//!
//! 1. Add a dog with the `pawsteps add-dog` subcommand
//! 2. Log training sessions with `pawsteps log`
//! 3. Ask for coaching with `pawsteps recommend` and `pawsteps insights`
//!
//! ## Architecture
//!
//! The crate follows a modular architecture:
//! - **Models**: Common data structures for dogs, commands, and progress
//! - **Catalog**: Built-in command definitions and TOML catalog loading
//! - **Intelligence**: Recommendation, achievement, and insight generation
//! - **Database**: SQLite persistence for dogs, progress, and sessions
//! - **Schedule**: Training reminder definitions and occurrence math
//! - **Config**: Environment-driven application configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pawsteps::catalog::CommandCatalog;
//! use pawsteps::intelligence::RecommendationEngine;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Load the command catalog (built-in unless a file overrides it)
//!     let catalog = CommandCatalog::load(None)?;
//!
//!     // Build the coaching engine
//!     let engine = RecommendationEngine::new(catalog);
//!
//!     // An empty snapshot yields no recommendations
//!     let recommendations = engine.generate(&[], 0);
//!     assert!(recommendations.is_empty());
//!
//!     Ok(())
//! }
//! ```

/// Common data models for dogs, commands, and training progress
pub mod models;

/// Command catalog definitions and loading
pub mod catalog;

/// Environment-driven application configuration
pub mod config;

/// Coaching intelligence: recommendations, achievements, and insights
pub mod intelligence;

/// SQLite persistence for dogs, progress, sessions, and schedules
pub mod database;

/// Training reminder schedules and occurrence computation
pub mod schedule;

/// Production logging and structured output
pub mod logging;
