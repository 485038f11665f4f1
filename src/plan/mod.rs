//! Plan module - daily plan generation
//!
//! A plan is drawn per category from the active catalog according to a
//! [`Quota`]. Categories that cannot fill their quota produce a
//! [`PlanNotice`] instead of failing the whole generation.

pub mod generator;

pub use generator::{generate, pick_random};

use std::fmt;

use crate::exercises::Category;

/// Ordered category -> required count table.
///
/// Iteration order is plan order. Each category appears once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quota {
    entries: Vec<(Category, usize)>,
}

impl Quota {
    /// Build a quota table. A repeated category is merged into its first
    /// entry so every category is drawn from its pool exactly once.
    pub fn new(entries: Vec<(Category, usize)>) -> Self {
        let mut merged: Vec<(Category, usize)> = Vec::with_capacity(entries.len());
        for (category, count) in entries {
            match merged.iter_mut().find(|(c, _)| *c == category) {
                Some((_, n)) => *n += count,
                None => merged.push((category, count)),
            }
        }
        Self { entries: merged }
    }

    /// 2x quad + 1x ankle + 1x hamstring + 1x hip
    pub fn standard() -> Self {
        Self::new(vec![
            (Category::Quad, 2),
            (Category::Ankle, 1),
            (Category::Hamstring, 1),
            (Category::Hip, 1),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.entries.iter().copied()
    }

    pub fn required(&self, category: Category) -> usize {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, n)| *n)
    }

    /// Upper bound on plan size
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

impl Default for Quota {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<_> = self
            .entries
            .iter()
            .map(|(c, n)| format!("{n}× {c}"))
            .collect();
        f.write_str(&parts.join(" + "))
    }
}

/// Shortage found while generating a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanNotice {
    /// Some, but not enough, active exercises in the category
    Partial {
        category: Category,
        available: usize,
        required: usize,
    },
    /// No active exercise in the category at all
    Empty { category: Category },
}

impl PlanNotice {
    pub fn category(&self) -> Category {
        match self {
            PlanNotice::Partial { category, .. } | PlanNotice::Empty { category } => *category,
        }
    }
}

impl fmt::Display for PlanNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanNotice::Partial { category, available, required } => {
                write!(f, "only {available}/{required} {category} exercises available.")
            }
            PlanNotice::Empty { category } => write!(f, "no {category} exercise available."),
        }
    }
}

/// Generated plan: ordered, unique exercise ids plus shortage notices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    pub ids: Vec<String>,
    pub notices: Vec<PlanNotice>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    /// Notices joined into one line, `None` when nothing ran short
    pub fn notice_text(&self) -> Option<String> {
        if self.notices.is_empty() {
            return None;
        }
        let lines: Vec<_> = self.notices.iter().map(|n| n.to_string()).collect();
        Some(lines.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_quota() {
        let quota = Quota::standard();
        assert_eq!(quota.total(), 5);
        assert_eq!(quota.required(Category::Quad), 2);
        assert_eq!(quota.required(Category::Hip), 1);
        let order: Vec<_> = quota.iter().map(|(c, _)| c).collect();
        assert_eq!(order, Category::all());
    }

    #[test]
    fn test_quota_merges_repeated_category() {
        let quota = Quota::new(vec![
            (Category::Quad, 1),
            (Category::Hip, 1),
            (Category::Quad, 1),
        ]);
        let entries: Vec<_> = quota.iter().collect();
        assert_eq!(entries, vec![(Category::Quad, 2), (Category::Hip, 1)]);
        assert_eq!(quota.required(Category::Quad), 2);
        assert_eq!(quota.required(Category::Ankle), 0);
        assert_eq!(quota.total(), 3);
    }

    #[test]
    fn test_quota_display() {
        assert_eq!(
            Quota::standard().to_string(),
            "2× quad + 1× ankle + 1× hamstring + 1× hip"
        );
    }

    #[test]
    fn test_notice_text_partial() {
        let notice = PlanNotice::Partial {
            category: Category::Quad,
            available: 1,
            required: 2,
        };
        assert_eq!(notice.to_string(), "only 1/2 quad exercises available.");
        assert_eq!(notice.category(), Category::Quad);
    }

    #[test]
    fn test_notice_text_empty() {
        let notice = PlanNotice::Empty { category: Category::Hamstring };
        assert_eq!(notice.to_string(), "no hamstring exercise available.");
    }

    #[test]
    fn test_plan_notice_text_joined() {
        let plan = Plan {
            ids: vec![],
            notices: vec![
                PlanNotice::Empty { category: Category::Ankle },
                PlanNotice::Empty { category: Category::Hip },
            ],
        };
        assert_eq!(
            plan.notice_text().unwrap(),
            "no ankle exercise available. no hip exercise available."
        );
        assert!(Plan::default().notice_text().is_none());
    }
}
