//! Response types and the flat row types they are folded from.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub day: String,
    pub opening_time: String,
    pub closing_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WasteCategory {
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub process: String,
    pub tips: String,
    pub icon: Option<String>,
}

/// A center with its associations folded in. `operating_hours` and
/// `waste_categories` are always present, empty when nothing is linked.
#[derive(Debug, Clone, Serialize)]
pub struct RecyclingCenter {
    pub center_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub operating_hours: Vec<OperatingHours>,
    pub waste_categories: Vec<WasteCategory>,
}

/// Nearby-search result: the center plus its computed distance in kilometers.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyCenter {
    #[serde(flatten)]
    pub center: RecyclingCenter,
    pub distance: f64,
}

/// Flat center row as selected from `recycling_centers`, before the
/// association fold.
#[derive(Debug, Clone, FromRow)]
pub struct CenterRow {
    pub center_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl CenterRow {
    pub fn into_center(
        self,
        operating_hours: Vec<OperatingHours>,
        waste_categories: Vec<WasteCategory>,
    ) -> RecyclingCenter {
        RecyclingCenter {
            center_id: self.center_id,
            name: self.name,
            description: self.description,
            address: self.address,
            city: self.city,
            state: self.state,
            country: self.country,
            postal_code: self.postal_code,
            latitude: self.latitude,
            longitude: self.longitude,
            phone: self.phone,
            email: self.email,
            website: self.website,
            operating_hours,
            waste_categories,
        }
    }
}

/// Operating-hours row keyed by its parent center.
#[derive(Debug, Clone, FromRow)]
pub struct HoursRow {
    pub center_id: i32,
    pub day: String,
    pub opening_time: String,
    pub closing_time: String,
}

/// Category row joined through the center junction, keyed by center.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub center_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub process: String,
    pub tips: String,
    pub icon: Option<String>,
}
