//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers, used by the haversine distance
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another point in kilometers (haversine)
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// Format a distance for display: whole metres under 1 km, one decimal above
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round() as i64)
    } else {
        format!("{:.1}km", km)
    }
}

/// Distance label between two optional points
///
/// Either side missing yields the "Location needed" placeholder rather than
/// an error; a profile without coordinates is a valid state.
pub fn distance_label(from: Option<Coordinates>, to: Option<Coordinates>) -> String {
    match (from, to) {
        (Some(from), Some(to)) => format_distance(from.distance_km(&to)),
        _ => "Location needed".to_string(),
    }
}

/// Pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bangkok() -> Coordinates {
        Coordinates::new(13.7563, 100.5018)
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = bangkok();
        assert!(p.distance_km(&p).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = bangkok();
        let b = Coordinates::new(18.7883, 98.9853);
        let ab = a.distance_km(&b);
        let ba = b.distance_km(&a);
        assert!((ab - ba).abs() < 1e-9);
        // Bangkok to Chiang Mai is roughly 580 km as the crow flies
        assert!(ab > 550.0 && ab < 620.0);
    }

    #[test]
    fn formats_sub_kilometre_distances_in_metres() {
        assert_eq!(format_distance(0.5), "500m");
        assert_eq!(format_distance(0.0449), "45m");
    }

    #[test]
    fn formats_longer_distances_with_one_decimal() {
        assert_eq!(format_distance(2.34), "2.3km");
        assert_eq!(format_distance(1.0), "1.0km");
    }

    #[test]
    fn missing_coordinates_yield_placeholder() {
        assert_eq!(distance_label(None, Some(bangkok())), "Location needed");
        assert_eq!(distance_label(Some(bangkok()), None), "Location needed");
        assert_eq!(distance_label(None, None), "Location needed");
    }
}
