//! Session weight overrides

use std::collections::HashMap;

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::PlanError;
use crate::plan::Plan;

/// Per-session weight values, independent of catalog defaults
#[derive(Debug, Clone, Default)]
pub struct WeightOverrides {
    weights: HashMap<String, f64>,
}

impl WeightOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry from the catalog default for every plan exercise that
    /// has none yet. Existing entries are left alone so edits survive a
    /// regenerated plan. Returns the number of entries seeded.
    pub fn seed_from_plan(&mut self, plan: &Plan, catalog: &Catalog) -> usize {
        let mut seeded = 0;
        for id in &plan.ids {
            if self.weights.contains_key(id) {
                continue;
            }
            if let Some(exercise) = catalog.get(id) {
                debug!("Seeding weight for {} with default {}", id, exercise.default_weight);
                self.weights.insert(id.clone(), exercise.default_weight);
                seeded += 1;
            }
        }
        seeded
    }

    /// Overwrite the session weight. Any value is accepted, negatives included.
    pub fn set(&mut self, id: &str, value: f64) {
        self.weights.insert(id.to_string(), value);
    }

    pub fn override_for(&self, id: &str) -> Option<f64> {
        self.weights.get(id).copied()
    }

    /// Effective weight: override if present, else the catalog default
    pub fn get(&self, id: &str, catalog: &Catalog) -> Result<f64, PlanError> {
        if let Some(weight) = self.override_for(id) {
            return Ok(weight);
        }
        catalog
            .get(id)
            .map(|e| e.default_weight)
            .ok_or_else(|| PlanError::NotFound(id.to_string()))
    }

    pub fn clear(&mut self) {
        self.weights.clear();
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_of(ids: &[&str]) -> Plan {
        Plan {
            ids: ids.iter().map(|s| s.to_string()).collect(),
            notices: vec![],
        }
    }

    #[test]
    fn test_seed_from_plan() {
        let catalog = Catalog::seed();
        let mut weights = WeightOverrides::new();

        let seeded = weights.seed_from_plan(&plan_of(&["q1", "hip2"]), &catalog);
        assert_eq!(seeded, 2);
        assert_eq!(weights.override_for("q1"), Some(15.0));
        assert_eq!(weights.override_for("hip2"), Some(0.0));
        assert_eq!(weights.override_for("q2"), None);
    }

    #[test]
    fn test_seed_keeps_existing_entry() {
        let catalog = Catalog::seed();
        let mut weights = WeightOverrides::new();
        weights.set("q1", 17.5);

        let seeded = weights.seed_from_plan(&plan_of(&["q1", "q2"]), &catalog);
        assert_eq!(seeded, 1);
        assert_eq!(weights.override_for("q1"), Some(17.5));
        assert_eq!(weights.override_for("q2"), Some(20.0));
    }

    #[test]
    fn test_seed_skips_unknown_ids() {
        let catalog = Catalog::seed();
        let mut weights = WeightOverrides::new();
        assert_eq!(weights.seed_from_plan(&plan_of(&["zzz"]), &catalog), 0);
        assert!(weights.is_empty());
    }

    #[test]
    fn test_set_accepts_negative() {
        let mut weights = WeightOverrides::new();
        weights.set("q1", -5.0);
        assert_eq!(weights.override_for("q1"), Some(-5.0));
    }

    #[test]
    fn test_get_falls_back_to_default() {
        let catalog = Catalog::seed();
        let weights = WeightOverrides::new();
        assert_eq!(weights.get("h2", &catalog), Ok(25.0));
    }

    #[test]
    fn test_get_prefers_override() {
        let catalog = Catalog::seed();
        let mut weights = WeightOverrides::new();
        weights.set("h2", 30.0);
        assert_eq!(weights.get("h2", &catalog), Ok(30.0));
    }

    #[test]
    fn test_get_not_found() {
        let catalog = Catalog::seed();
        let weights = WeightOverrides::new();
        assert_eq!(
            weights.get("zzz", &catalog),
            Err(PlanError::NotFound("zzz".to_string()))
        );
    }

    #[test]
    fn test_get_override_without_catalog_entry() {
        let catalog = Catalog::new();
        let mut weights = WeightOverrides::new();
        weights.set("ghost", 3.0);
        assert_eq!(weights.get("ghost", &catalog), Ok(3.0));
    }

    #[test]
    fn test_clear() {
        let mut weights = WeightOverrides::new();
        weights.set("q1", 1.0);
        weights.clear();
        assert!(weights.is_empty());
        assert_eq!(weights.len(), 0);
    }
}
