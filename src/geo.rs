//! Great-circle distance on a spherical Earth.

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two lat/lon points in degrees.
///
/// The arccosine argument is clamped to [-1, 1]: for coincident points the
/// cosine sum can exceed 1 by a rounding epsilon, which would otherwise
/// produce NaN.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());
    let arg = lat1.cos() * lat2.cos() * (lon2 - lon1).cos() + lat1.sin() * lat2.sin();
    EARTH_RADIUS_KM * arg.clamp(-1.0, 1.0).acos()
}
