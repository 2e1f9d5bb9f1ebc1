//! Standalone waste-category listing.

use crate::error::AppError;
use crate::models::WasteCategory;
use sqlx::PgPool;

const ACTIVE_CATEGORIES_SQL: &str = "SELECT category_id, name, description, process, tips, icon \
     FROM waste_categories \
     WHERE status = 'active' \
     ORDER BY name ASC";

pub struct CategoryQueryService;

impl CategoryQueryService {
    /// Active categories only, ordered ascending by name. Categories nested
    /// under a center are not filtered this way.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<WasteCategory>, AppError> {
        let categories = sqlx::query_as(ACTIVE_CATEGORIES_SQL)
            .fetch_all(pool)
            .await?;
        Ok(categories)
    }
}
