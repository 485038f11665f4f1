//! Runtime configuration - catalog source and session day

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::catalog::Catalog;
use crate::exercises::Exercise;

/// Env var naming a JSON catalog file
pub const CATALOG_ENV: &str = "PTPLAN_CATALOG";
/// Env var overriding the session day label
pub const DAY_ENV: &str = "PTPLAN_DAY";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// JSON catalog file; the built-in seed catalog when unset
    pub catalog_path: Option<PathBuf>,
    /// Session day label; today's local date when unset
    pub day: Option<String>,
}

impl Config {
    pub fn new(catalog_path: Option<PathBuf>, day: Option<String>) -> Self {
        Self { catalog_path, day }
    }

    pub fn day_label(&self) -> String {
        self.day
            .clone()
            .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string())
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => load_catalog_file(path),
            None => Ok(Catalog::seed()),
        }
    }
}

/// Read a catalog from a JSON array of exercises.
///
/// Each entry is validated (non-empty name, non-negative default weight)
/// and ids must be unique. The file is only ever read.
pub fn load_catalog_file(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog = parse_catalog(&content)
        .with_context(|| format!("Invalid catalog {}", path.display()))?;
    info!("Loaded {} exercises from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Parse and validate catalog JSON
pub fn parse_catalog(content: &str) -> Result<Catalog> {
    let exercises: Vec<Exercise> = serde_json::from_str(content)?;
    for exercise in &exercises {
        exercise.validate()?;
    }
    Ok(Catalog::from_exercises(exercises)?)
}
