//! Catalog - in-memory store of known exercises and their default weights

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::PlanError;
use crate::exercises::{Category, Exercise, seed_exercises};

/// Active exercises grouped by category
pub type ByCategory<'a> = HashMap<Category, Vec<&'a Exercise>>;

/// Exercise catalog, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    exercises: Vec<Exercise>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build catalog from a list, rejecting duplicate ids
    pub fn from_exercises(exercises: Vec<Exercise>) -> Result<Self, PlanError> {
        let mut seen = HashSet::new();
        for exercise in &exercises {
            if !seen.insert(exercise.id.as_str()) {
                return Err(PlanError::DuplicateId(exercise.id.clone()));
            }
        }
        Ok(Self { exercises })
    }

    /// Built-in seed catalog
    pub fn seed() -> Self {
        Self { exercises: seed_exercises() }
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Append a new entry. Name and weight checks are up to the caller
    /// (see [`Exercise::validate`]); only id uniqueness is enforced here.
    pub fn add_exercise(&mut self, exercise: Exercise) -> Result<(), PlanError> {
        if self.contains(&exercise.id) {
            return Err(PlanError::DuplicateId(exercise.id));
        }
        debug!("Adding exercise {} ({})", exercise.id, exercise.category);
        self.exercises.push(exercise);
        Ok(())
    }

    /// Include or exclude an exercise from plan generation
    pub fn set_active(&mut self, id: &str, active: bool) -> Result<(), PlanError> {
        let exercise = self.get_mut(id)?;
        exercise.is_active = active;
        Ok(())
    }

    /// Overwrite the default weight. Only promotion goes through this.
    pub(crate) fn set_default_weight(&mut self, id: &str, weight: f64) -> Result<(), PlanError> {
        let exercise = self.get_mut(id)?;
        exercise.default_weight = weight;
        Ok(())
    }

    /// Active exercises per category. Every category is present as a key,
    /// catalog order is kept inside each list.
    pub fn list_active_by_category(&self) -> ByCategory<'_> {
        let mut groups: ByCategory<'_> = Category::all()
            .iter()
            .map(|c| (*c, Vec::new()))
            .collect();

        for exercise in self.exercises.iter().filter(|e| e.is_active) {
            groups.entry(exercise.category).or_default().push(exercise);
        }

        groups
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Exercise, PlanError> {
        self.exercises
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| PlanError::NotFound(id.to_string()))
    }
}
