// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for the Pawsteps CLI

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration, resolved from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string
    pub database_url: String,
    /// Optional path to a TOML file replacing the built-in catalog
    pub catalog_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file if one is present. `PAWSTEPS_DATABASE_URL`
    /// overrides the default per-user data location;
    /// `PAWSTEPS_CATALOG` points at a custom catalog file.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let database_url =
            env::var("PAWSTEPS_DATABASE_URL").unwrap_or_else(|_| default_database_url());
        let catalog_path = env::var("PAWSTEPS_CATALOG").ok();

        Ok(Self {
            database_url,
            catalog_path,
        })
    }

    /// Create the database's parent directory when it lives on disk
    pub fn ensure_data_dir(&self) -> Result<()> {
        if let Some(path) = self.database_url.strip_prefix("sqlite:") {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create data directory: {}", parent.display())
                    })?;
                }
            }
        }

        Ok(())
    }
}

fn default_database_url() -> String {
    let data_dir = dirs::data_dir()
        .map(|p| p.join("pawsteps"))
        .unwrap_or_else(|| PathBuf::from("./data"));

    format!("sqlite:{}", data_dir.join("pawsteps.db").display())
}
