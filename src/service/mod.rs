//! Read-only query services over the recycling-centers schema.

mod categories;
mod centers;

pub use categories::CategoryQueryService;
pub use centers::{CenterQueryService, SearchFilters, DEFAULT_RADIUS_KM};
