//! Exercise definitions - body-region categories and the seed catalog

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Body region an exercise targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Quad,
    Ankle,
    Hamstring,
    Hip,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Quad => "quad",
            Category::Ankle => "ankle",
            Category::Hamstring => "hamstring",
            Category::Hip => "hip",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Quad => "🦵",
            Category::Ankle => "🦶",
            Category::Hamstring => "🔙",
            Category::Hip => "🍑",
        }
    }

    /// All categories, in plan order
    pub fn all() -> &'static [Category] {
        &[
            Category::Quad,
            Category::Ankle,
            Category::Hamstring,
            Category::Hip,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::all()
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category {s:?} (expected quad, ankle, hamstring or hip)"))
    }
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Weight in lb, 0 for bodyweight-only exercises
    pub default_weight: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Exercise {
    pub fn new(id: &str, name: &str, category: Category, default_weight: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            default_weight,
            is_active: true,
        }
    }

    /// Check the fields a new entry must satisfy before it goes into a catalog.
    ///
    /// The catalog itself only enforces id uniqueness; this is for callers
    /// accepting user input (the TUI add form, catalog files).
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.name.trim().is_empty() {
            return Err(PlanError::EmptyName(self.id.clone()));
        }
        if !self.default_weight.is_finite() || self.default_weight < 0.0 {
            return Err(PlanError::InvalidWeight {
                id: self.id.clone(),
                weight: self.default_weight,
            });
        }
        Ok(())
    }
}

/// Seed exercises used when no catalog file is given
pub fn seed_exercises() -> Vec<Exercise> {
    vec![
        Exercise::new("q1", "Quad Extension", Category::Quad, 15.0),
        Exercise::new("q2", "Goblet Squat", Category::Quad, 20.0),
        Exercise::new("q3", "Step-Ups", Category::Quad, 10.0),
        Exercise::new("h1", "Hamstring Curl", Category::Hamstring, 10.0),
        Exercise::new("h2", "Romanian Deadlift", Category::Hamstring, 25.0),
        Exercise::new("hip1", "Hip Abduction", Category::Hip, 8.0),
        Exercise::new("hip2", "Glute Bridge", Category::Hip, 0.0),
        Exercise::new("a1", "Ankle Dorsiflexion", Category::Ankle, 5.0),
        Exercise::new("a2", "Ankle Circles", Category::Ankle, 0.0),
    ]
}

/// Format a weight for display ("15 lb", "12.5 lb", "bodyweight")
pub fn format_weight(weight: f64) -> String {
    if weight == 0.0 {
        "bodyweight".to_string()
    } else if weight.fract() == 0.0 {
        format!("{weight:.0} lb")
    } else {
        format!("{weight} lb")
    }
}
