//! Waste-category endpoint.

use crate::error::AppError;
use crate::models::WasteCategory;
use crate::service::CategoryQueryService;
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<WasteCategory>>, AppError> {
    Ok(Json(CategoryQueryService::list_active(&state.pool).await?))
}
