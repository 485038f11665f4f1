//! Session - catalog, weight overrides and the current plan for one day
//!
//! All engine operations go through [`Session`]. It is single-threaded; if
//! shared across threads, wrap the whole session in one `Mutex` so that
//! promotion reads the override and writes the default as a single step.

use rand::Rng;
use tracing::info;

use crate::catalog::{ByCategory, Catalog};
use crate::error::PlanError;
use crate::exercises::Exercise;
use crate::plan::{self, Plan, Quota};
use crate::weights::WeightOverrides;

pub struct Session {
    day: String,
    catalog: Catalog,
    quota: Quota,
    overrides: WeightOverrides,
    plan: Plan,
}

impl Session {
    /// Start a session for `day` (an opaque label, e.g. "2025-10-22")
    pub fn new(catalog: Catalog, day: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            catalog,
            quota: Quota::standard(),
            overrides: WeightOverrides::new(),
            plan: Plan::default(),
        }
    }

    pub fn with_quota(mut self, quota: Quota) -> Self {
        self.quota = quota;
        self
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn quota(&self) -> &Quota {
        &self.quota
    }

    /// Last generated plan (empty until the first generation)
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn overrides(&self) -> &WeightOverrides {
        &self.overrides
    }

    pub fn list_active_by_category(&self) -> ByCategory<'_> {
        self.catalog.list_active_by_category()
    }

    /// Generate today's plan with the thread-local RNG
    pub fn generate_plan(&mut self) -> &Plan {
        self.generate_plan_with(&mut rand::thread_rng())
    }

    /// Generate a plan and seed overrides for exercises new to this session
    pub fn generate_plan_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Plan {
        let plan = plan::generate(&self.catalog, &self.quota, rng);
        let seeded = self.overrides.seed_from_plan(&plan, &self.catalog);
        info!(
            "Plan for {}: {} exercises ({} new weights seeded)",
            self.day,
            plan.len(),
            seeded
        );
        self.plan = plan;
        &self.plan
    }

    /// Plan entries resolved against the catalog
    pub fn plan_exercises(&self) -> Vec<&Exercise> {
        self.plan
            .ids
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    pub fn current_weight(&self, id: &str) -> Result<f64, PlanError> {
        self.overrides.get(id, &self.catalog)
    }

    pub fn set_weight(&mut self, id: &str, value: f64) {
        self.overrides.set(id, value);
    }

    /// Copy the effective weight of `id` into the catalog as its new default
    pub fn promote_to_default(&mut self, id: &str) -> Result<f64, PlanError> {
        if !self.catalog.contains(id) {
            return Err(PlanError::NotFound(id.to_string()));
        }
        let weight = self.overrides.get(id, &self.catalog)?;
        self.catalog.set_default_weight(id, weight)?;
        info!("Promoted {} default weight to {}", id, weight);
        Ok(weight)
    }

    pub fn add_exercise(&mut self, exercise: Exercise) -> Result<(), PlanError> {
        self.catalog.add_exercise(exercise)
    }

    pub fn set_active(&mut self, id: &str, active: bool) -> Result<(), PlanError> {
        self.catalog.set_active(id, active)
    }

    /// Move to a new day: drops the plan and every session weight.
    /// Catalog defaults (including promotions) carry over.
    pub fn start_day(&mut self, day: impl Into<String>) {
        self.day = day.into();
        self.plan = Plan::default();
        self.overrides.clear();
        info!("Started new session day {}", self.day);
    }
}
