//! Recycling Centers API: read-only query layer over a PostgreSQL listings schema.

pub mod config;
pub mod error;
pub mod geo;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;

pub use config::{Config, PoolConfig};
pub use error::{AppError, ConfigError};
pub use models::{NearbyCenter, OperatingHours, RecyclingCenter, WasteCategory};
pub use routes::app;
pub use service::{CategoryQueryService, CenterQueryService, SearchFilters};
pub use state::AppState;
