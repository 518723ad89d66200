//! Distance calculation and display formatting tests
//!
//! Comprehensive property-based and unit tests for:
//! - Haversine distances between coordinate pairs
//! - Distance display formatting (meters under 1km, otherwise km)
//! - The placeholder label when either side lacks coordinates
//! - Directory listings annotated with viewer distance

use chrono::Utc;
use proptest::prelude::*;
use shared::{
    distance_label, format_distance, Business, BusinessWithDistance, Coordinates,
    SubscriptionStatus, WeeklyHours,
};
use uuid::Uuid;

/// Helper to build a minimal active listing at a location
fn listing(location: Option<Coordinates>) -> Business {
    Business {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: "Blue Bottle Cafe".to_string(),
        description: None,
        category: "Cafe".to_string(),
        address: "123 Main Street".to_string(),
        phone: None,
        email: None,
        website: None,
        hours: WeeklyHours::default(),
        location,
        subscription_status: SubscriptionStatus::Active,
        subscription_plan: Some("business".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate a coordinate anywhere on the globe
fn coordinates_strategy() -> impl Strategy<Value = Coordinates> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinates::new(lat, lng))
}

// ============================================================================
// Haversine Distance Tests
// ============================================================================

mod haversine {
    use super::*;

    #[test]
    fn bangkok_to_chiang_mai_is_about_580_km() {
        let bangkok = Coordinates::new(13.7563, 100.5018);
        let chiang_mai = Coordinates::new(18.7883, 98.9853);

        let km = bangkok.distance_km(&chiang_mai);
        assert!((km - 580.0).abs() < 10.0, "got {} km", km);
    }

    #[test]
    fn a_point_is_zero_km_from_itself() {
        let here = Coordinates::new(40.7128, -74.0060);
        assert!(here.distance_km(&here).abs() < 1e-9);
    }

    #[test]
    fn city_blocks_are_fractions_of_a_km() {
        // Two points roughly 1.1km apart in Manhattan
        let a = Coordinates::new(40.7580, -73.9855);
        let b = Coordinates::new(40.7484, -73.9857);

        let km = a.distance_km(&b);
        assert!(km > 0.9 && km < 1.3, "got {} km", km);
    }
}

// ============================================================================
// Distance Formatting Tests
// ============================================================================

mod formatting {
    use super::*;

    #[test]
    fn under_one_km_shows_rounded_meters() {
        assert_eq!(format_distance(0.5), "500m");
        assert_eq!(format_distance(0.1234), "123m");
        assert_eq!(format_distance(0.9996), "1000m");
    }

    #[test]
    fn one_km_and_above_shows_one_decimal() {
        assert_eq!(format_distance(1.0), "1.0km");
        assert_eq!(format_distance(2.34), "2.3km");
        assert_eq!(format_distance(12.06), "12.1km");
    }

    #[test]
    fn zero_distance_is_zero_meters() {
        assert_eq!(format_distance(0.0), "0m");
    }
}

// ============================================================================
// Placeholder Label Tests
// ============================================================================

mod placeholder {
    use super::*;

    #[test]
    fn missing_viewer_position_reads_location_needed() {
        let to = Some(Coordinates::new(13.75, 100.50));
        assert_eq!(distance_label(None, to), "Location needed");
    }

    #[test]
    fn missing_listing_position_reads_location_needed() {
        let from = Some(Coordinates::new(13.75, 100.50));
        assert_eq!(distance_label(from, None), "Location needed");
    }

    #[test]
    fn both_positions_present_reads_a_distance() {
        let from = Some(Coordinates::new(13.7563, 100.5018));
        let to = Some(Coordinates::new(13.7650, 100.5380));
        let label = distance_label(from, to);
        assert!(label.ends_with("km") || label.ends_with('m'), "got {}", label);
    }
}

// ============================================================================
// Listing Annotation Tests
// ============================================================================

mod annotation {
    use super::*;

    #[test]
    fn annotated_listing_carries_distance_and_text() {
        let viewer = Some(Coordinates::new(13.7563, 100.5018));
        let business = listing(Some(Coordinates::new(13.7650, 100.5380)));

        let annotated = BusinessWithDistance::annotate(business, viewer);
        let km = annotated.distance_km.unwrap();
        assert!(km > 3.0 && km < 5.0, "got {} km", km);
        assert_eq!(annotated.distance_text, format_distance(km));
    }

    #[test]
    fn listing_without_location_gets_no_distance() {
        let viewer = Some(Coordinates::new(13.7563, 100.5018));
        let annotated = BusinessWithDistance::annotate(listing(None), viewer);

        assert!(annotated.distance_km.is_none());
        assert_eq!(annotated.distance_text, "Location needed");
    }

    #[test]
    fn anonymous_viewer_gets_no_distance() {
        let business = listing(Some(Coordinates::new(13.7650, 100.5380)));
        let annotated = BusinessWithDistance::annotate(business, None);

        assert!(annotated.distance_km.is_none());
        assert_eq!(annotated.distance_text, "Location needed");
    }
}

// ============================================================================
// Distance Properties
// ============================================================================

proptest! {
    /// Distance is symmetric in its endpoints
    #[test]
    fn distance_is_symmetric(
        a in coordinates_strategy(),
        b in coordinates_strategy()
    ) {
        let forward = a.distance_km(&b);
        let back = b.distance_km(&a);
        prop_assert!((forward - back).abs() < 1e-6);
    }

    /// Distance is never negative and never exceeds half the Earth's
    /// circumference
    #[test]
    fn distance_is_bounded(
        a in coordinates_strategy(),
        b in coordinates_strategy()
    ) {
        let km = a.distance_km(&b);
        prop_assert!(km >= 0.0);
        prop_assert!(km <= 20_100.0, "got {} km", km);
    }

    /// Formatted distances under 1km never mention kilometers
    #[test]
    fn short_distances_format_as_meters(km in 0.0f64..0.999) {
        let label = format_distance(km);
        prop_assert!(!label.contains("km"), "got {}", label);
        prop_assert!(label.ends_with('m'));
    }

    /// Formatted distances of 1km or more always carry the km suffix
    #[test]
    fn long_distances_format_as_km(km in 1.0f64..10_000.0) {
        let label = format_distance(km);
        prop_assert!(label.ends_with("km"), "got {}", label);
    }
}
