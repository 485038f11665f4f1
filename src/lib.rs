//! ptplan - Physical-therapy daily plan generator
//!
//! Draws a daily plan per body-region category from an exercise catalog,
//! tracks a session weight per exercise and promotes weights to defaults.

pub mod catalog;
pub mod config;
pub mod error;
pub mod exercises;
pub mod plan;
pub mod session;
pub mod tui;
pub mod weights;

pub use catalog::Catalog;
pub use error::PlanError;
pub use session::Session;
