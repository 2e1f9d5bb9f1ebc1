//! Center endpoints: list, nearby, search, get-by-id.

use crate::error::AppError;
use crate::models::{NearbyCenter, RecyclingCenter};
use crate::service::{CenterQueryService, SearchFilters, DEFAULT_RADIUS_KM};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_KM
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub city: Option<String>,
    pub waste_type: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<RecyclingCenter>>, AppError> {
    Ok(Json(CenterQueryService::list(&state.pool).await?))
}

pub async fn nearby(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<Vec<NearbyCenter>>, AppError> {
    let centers = CenterQueryService::nearby(
        &state.pool,
        params.latitude,
        params.longitude,
        params.radius,
    )
    .await?;
    Ok(Json(centers))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RecyclingCenter>>, AppError> {
    let filters = SearchFilters {
        q: params.q,
        city: params.city,
        waste_type: params.waste_type,
    };
    Ok(Json(CenterQueryService::search(&state.pool, filters).await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(center_id): Path<i32>,
) -> Result<Json<RecyclingCenter>, AppError> {
    Ok(Json(CenterQueryService::get(&state.pool, center_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    #[test]
    fn nearby_radius_defaults_to_ten_km() {
        let uri: Uri = "/api/centers/nearby?latitude=47.6&longitude=-122.3"
            .parse()
            .unwrap();
        let Query(params) = Query::<NearbyParams>::try_from_uri(&uri).unwrap();
        assert_eq!(params.radius, 10.0);
    }

    #[test]
    fn nearby_radius_accepts_override() {
        let uri: Uri = "/api/centers/nearby?latitude=0&longitude=0&radius=0.5"
            .parse()
            .unwrap();
        let Query(params) = Query::<NearbyParams>::try_from_uri(&uri).unwrap();
        assert_eq!(params.radius, 0.5);
    }

    #[test]
    fn nearby_rejects_missing_coordinates() {
        let uri: Uri = "/api/centers/nearby?latitude=47.6".parse().unwrap();
        assert!(Query::<NearbyParams>::try_from_uri(&uri).is_err());
    }
}
