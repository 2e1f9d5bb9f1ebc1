//! Center queries: flat fetch, association batch-load, nested fold.
//!
//! Associations are loaded with two batch queries (`center_id = ANY($1)`) and
//! folded into each center in the application, so centers without hours or
//! categories keep empty vectors instead of disappearing or carrying nulls.

use crate::error::AppError;
use crate::geo;
use crate::models::{
    CategoryRow, CenterRow, HoursRow, NearbyCenter, OperatingHours, RecyclingCenter, WasteCategory,
};
use sqlx::PgPool;
use std::collections::HashMap;

const CENTER_COLUMNS: &str = "center_id, name, description, address, city, state, country, \
     postal_code, latitude, longitude, phone, email, website";

pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Optional search filters, combined with AND when supplied.
#[derive(Debug, Default, Clone)]
pub struct SearchFilters {
    pub q: Option<String>,
    pub city: Option<String>,
    pub waste_type: Option<String>,
}

impl SearchFilters {
    /// Trim each filter and drop it when empty, so a blank value never
    /// matches everything through an empty substring.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        }
        SearchFilters {
            q: clean(self.q),
            city: clean(self.city),
            waste_type: clean(self.waste_type),
        }
    }
}

pub struct CenterQueryService;

impl CenterQueryService {
    /// All centers with nested hours and categories.
    pub async fn list(pool: &PgPool) -> Result<Vec<RecyclingCenter>, AppError> {
        let sql = format!("SELECT {CENTER_COLUMNS} FROM recycling_centers ORDER BY center_id");
        let rows: Vec<CenterRow> = sqlx::query_as(&sql).fetch_all(pool).await?;
        Self::with_associations(pool, rows).await
    }

    /// Centers strictly inside `radius_km` of the origin, nearest first, each
    /// with its computed distance. Centers without coordinates are excluded.
    pub async fn nearby(
        pool: &PgPool,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<NearbyCenter>, AppError> {
        let sql = format!(
            "SELECT {CENTER_COLUMNS} FROM recycling_centers \
             WHERE latitude IS NOT NULL AND longitude IS NOT NULL"
        );
        let rows: Vec<CenterRow> = sqlx::query_as(&sql).fetch_all(pool).await?;
        let (rows, distances): (Vec<_>, Vec<_>) =
            rank_by_distance(rows, latitude, longitude, radius_km)
                .into_iter()
                .unzip();
        let centers = Self::with_associations(pool, rows).await?;
        Ok(centers
            .into_iter()
            .zip(distances)
            .map(|(center, distance)| NearbyCenter { center, distance })
            .collect())
    }

    /// Centers matching every supplied filter. `q` matches name, description,
    /// or address; `city` matches the city; `waste_type` requires at least one
    /// linked category whose name contains the substring. All matching is
    /// case-insensitive substring.
    pub async fn search(
        pool: &PgPool,
        filters: SearchFilters,
    ) -> Result<Vec<RecyclingCenter>, AppError> {
        let filters = filters.normalized();
        let rows: Vec<CenterRow> = sqlx::query_as(&search_sql())
            .bind(filters.q)
            .bind(filters.city)
            .bind(filters.waste_type)
            .fetch_all(pool)
            .await?;
        Self::with_associations(pool, rows).await
    }

    /// One center by id, or NotFound.
    pub async fn get(pool: &PgPool, center_id: i32) -> Result<RecyclingCenter, AppError> {
        let sql = format!("SELECT {CENTER_COLUMNS} FROM recycling_centers WHERE center_id = $1");
        let row: Option<CenterRow> = sqlx::query_as(&sql)
            .bind(center_id)
            .fetch_optional(pool)
            .await?;
        let row = row.ok_or_else(|| AppError::NotFound(format!("center {center_id}")))?;
        let mut centers = Self::with_associations(pool, vec![row]).await?;
        centers
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("center {center_id}")))
    }

    /// Batch-load hours and categories for the given rows and fold them in,
    /// preserving row order.
    async fn with_associations(
        pool: &PgPool,
        rows: Vec<CenterRow>,
    ) -> Result<Vec<RecyclingCenter>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = rows.iter().map(|r| r.center_id).collect();
        let hours: Vec<HoursRow> = sqlx::query_as(
            "SELECT center_id, day, opening_time, closing_time \
             FROM operating_hours WHERE center_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?;
        // Note: nested categories are intentionally not filtered by status,
        // unlike the standalone category list.
        let categories: Vec<CategoryRow> = sqlx::query_as(
            "SELECT cwc.center_id, wc.category_id, wc.name, wc.description, \
                    wc.process, wc.tips, wc.icon \
             FROM center_waste_categories cwc \
             JOIN waste_categories wc ON wc.category_id = cwc.category_id \
             WHERE cwc.center_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?;
        Ok(nest(rows, hours, categories))
    }
}

/// Search query: each filter is guarded by `$n IS NULL` so an absent filter
/// imposes no constraint, and supplied filters combine with AND. The
/// `waste_type` guard turns the category LEFT JOIN semantics into an
/// existence requirement.
fn search_sql() -> String {
    format!(
        "SELECT {CENTER_COLUMNS} FROM recycling_centers rc \
         WHERE ($1::text IS NULL \
                OR rc.name ILIKE '%' || $1 || '%' \
                OR rc.description ILIKE '%' || $1 || '%' \
                OR rc.address ILIKE '%' || $1 || '%') \
           AND ($2::text IS NULL OR rc.city ILIKE '%' || $2 || '%') \
           AND ($3::text IS NULL OR EXISTS ( \
                SELECT 1 FROM center_waste_categories cwc \
                JOIN waste_categories wc ON wc.category_id = cwc.category_id \
                WHERE cwc.center_id = rc.center_id \
                  AND wc.name ILIKE '%' || $3 || '%')) \
         ORDER BY rc.center_id"
    )
}

/// Fold flat association rows into their parent centers by id.
fn nest(
    rows: Vec<CenterRow>,
    hours: Vec<HoursRow>,
    categories: Vec<CategoryRow>,
) -> Vec<RecyclingCenter> {
    let mut hours_by_center: HashMap<i32, Vec<OperatingHours>> = HashMap::new();
    for h in hours {
        hours_by_center
            .entry(h.center_id)
            .or_default()
            .push(OperatingHours {
                day: h.day,
                opening_time: h.opening_time,
                closing_time: h.closing_time,
            });
    }
    let mut categories_by_center: HashMap<i32, Vec<WasteCategory>> = HashMap::new();
    for c in categories {
        categories_by_center
            .entry(c.center_id)
            .or_default()
            .push(WasteCategory {
                category_id: c.category_id,
                name: c.name,
                description: c.description,
                process: c.process,
                tips: c.tips,
                icon: c.icon,
            });
    }
    rows.into_iter()
        .map(|row| {
            let hours = hours_by_center.remove(&row.center_id).unwrap_or_default();
            let categories = categories_by_center
                .remove(&row.center_id)
                .unwrap_or_default();
            row.into_center(hours, categories)
        })
        .collect()
}

/// Keep rows strictly inside `radius_km` of the origin, nearest first.
/// Rows without coordinates are dropped.
fn rank_by_distance(
    rows: Vec<CenterRow>,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> Vec<(CenterRow, f64)> {
    let mut ranked: Vec<(CenterRow, f64)> = rows
        .into_iter()
        .filter_map(|row| {
            let (lat, lon) = match (row.latitude, row.longitude) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => return None,
            };
            let distance = geo::haversine_km(latitude, longitude, lat, lon);
            (distance < radius_km).then_some((row, distance))
        })
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::haversine_km;

    fn center_row(center_id: i32, latitude: Option<f64>, longitude: Option<f64>) -> CenterRow {
        CenterRow {
            center_id,
            name: format!("Center {center_id}"),
            description: None,
            address: "1 Main St".into(),
            city: "Springfield".into(),
            state: "WA".into(),
            country: "US".into(),
            postal_code: None,
            latitude,
            longitude,
            phone: None,
            email: None,
            website: None,
        }
    }

    fn hours_row(center_id: i32, day: &str) -> HoursRow {
        HoursRow {
            center_id,
            day: day.into(),
            opening_time: "08:00".into(),
            closing_time: "17:00".into(),
        }
    }

    fn category_row(center_id: i32, category_id: i32, name: &str) -> CategoryRow {
        CategoryRow {
            center_id,
            category_id,
            name: name.into(),
            description: String::new(),
            process: String::new(),
            tips: String::new(),
            icon: None,
        }
    }

    #[test]
    fn blank_filters_are_treated_as_absent() {
        let filters = SearchFilters {
            q: Some("   ".into()),
            city: Some("".into()),
            waste_type: Some("  glass  ".into()),
        }
        .normalized();
        assert_eq!(filters.q, None);
        assert_eq!(filters.city, None);
        assert_eq!(filters.waste_type, Some("glass".into()));
    }

    #[test]
    fn nest_keeps_centers_without_associations() {
        let rows = vec![center_row(1, None, None), center_row(2, None, None)];
        let hours = vec![hours_row(1, "Monday"), hours_row(1, "Tuesday")];
        let categories = vec![category_row(1, 10, "Glass")];

        let centers = nest(rows, hours, categories);
        assert_eq!(centers.len(), 2);
        assert_eq!(centers[0].operating_hours.len(), 2);
        assert_eq!(centers[0].waste_categories.len(), 1);
        assert!(centers[1].operating_hours.is_empty());
        assert!(centers[1].waste_categories.is_empty());
    }

    #[test]
    fn nest_preserves_row_order() {
        let rows = vec![center_row(3, None, None), center_row(1, None, None)];
        let centers = nest(rows, Vec::new(), Vec::new());
        assert_eq!(centers[0].center_id, 3);
        assert_eq!(centers[1].center_id, 1);
    }

    #[test]
    fn nearby_results_are_sorted_nearest_first() {
        let rows = vec![
            center_row(1, Some(0.0), Some(2.0)),
            center_row(2, Some(0.0), Some(0.5)),
            center_row(3, Some(0.0), Some(1.0)),
        ];
        let ranked = rank_by_distance(rows, 0.0, 0.0, 1000.0);
        let ids: Vec<i32> = ranked.iter().map(|(row, _)| row.center_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        for pair in ranked.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn radius_boundary_is_exclusive() {
        let exact = haversine_km(0.0, 0.0, 0.0, 1.0);
        let rows = vec![center_row(1, Some(0.0), Some(1.0))];
        assert!(rank_by_distance(rows.clone(), 0.0, 0.0, exact).is_empty());
        assert_eq!(rank_by_distance(rows, 0.0, 0.0, exact + 0.001).len(), 1);
    }

    #[test]
    fn center_at_query_point_has_zero_distance() {
        let rows = vec![center_row(1, Some(0.0), Some(0.0))];
        let ranked = rank_by_distance(rows, 0.0, 0.0, 1.0);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].1, 0.0);
    }

    #[test]
    fn search_filters_combine_with_and() {
        let sql = search_sql();
        // One IS NULL guard per optional filter, joined with AND.
        assert_eq!(sql.matches("IS NULL").count(), 3);
        assert_eq!(sql.matches(" AND ($").count(), 2);
        assert!(sql.contains("ILIKE"));
        assert!(sql.contains("EXISTS"));
    }

    #[test]
    fn rows_without_coordinates_are_dropped() {
        let rows = vec![
            center_row(1, None, Some(0.0)),
            center_row(2, Some(0.0), None),
            center_row(3, Some(0.0), Some(0.0)),
        ];
        let ranked = rank_by_distance(rows, 0.0, 0.0, 10.0);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].0.center_id, 3);
    }
}
