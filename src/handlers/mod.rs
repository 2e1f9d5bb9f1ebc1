//! HTTP handlers for center and category lookups.

pub mod categories;
pub mod centers;
