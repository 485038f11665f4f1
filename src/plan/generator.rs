//! Plan generator - random per-category draws from the active catalog

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::catalog::Catalog;

use super::{Plan, PlanNotice, Quota};

/// Draw up to `n` distinct items uniformly at random, without replacement.
///
/// Partial Fisher-Yates over a copy of the pool, so every subset of size
/// `min(n, pool.len())` is equally likely. Order of the result is random too.
pub fn pick_random<T: Clone, R: Rng + ?Sized>(pool: &[T], n: usize, rng: &mut R) -> Vec<T> {
    let mut copy = pool.to_vec();
    let amount = n.min(copy.len());
    let (picked, _) = copy.partial_shuffle(rng, amount);
    picked.to_vec()
}

/// Generate a plan from the active part of `catalog`.
///
/// Never fails: a category short of its quota contributes whatever it has
/// and adds a notice. Shortages are not backfilled from other categories.
/// The catalog is not touched.
pub fn generate<R: Rng + ?Sized>(catalog: &Catalog, quota: &Quota, rng: &mut R) -> Plan {
    let groups = catalog.list_active_by_category();
    let mut chosen: Vec<String> = Vec::with_capacity(quota.total());
    let mut notices = Vec::new();

    for (category, required) in quota.iter() {
        let pool: Vec<&str> = groups
            .get(&category)
            .map(|v| v.iter().map(|e| e.id.as_str()).collect())
            .unwrap_or_default();

        let picks = pick_random(&pool, required, rng);
        debug!(
            "Drew {}/{} {} from pool of {}",
            picks.len(),
            required,
            category,
            pool.len()
        );

        if picks.len() < required {
            let notice = if pool.is_empty() {
                PlanNotice::Empty { category }
            } else {
                PlanNotice::Partial {
                    category,
                    available: picks.len(),
                    required,
                }
            };
            debug!("Shortage: {}", notice);
            notices.push(notice);
        }

        chosen.extend(picks.into_iter().map(str::to_string));
    }

    // Categories are disjoint, but uniqueness is part of the contract
    let mut seen = HashSet::new();
    chosen.retain(|id| seen.insert(id.clone()));

    info!("Generated plan: {} exercises, {} shortages", chosen.len(), notices.len());

    Plan { ids: chosen, notices }
}
