//! Offer lifecycle and discount label tests
//!
//! Comprehensive property-based and unit tests for:
//! - Lifecycle evaluation from the activation flag and date window
//! - Date parsing for full timestamps and bare calendar dates
//! - Discount label formatting
//! - Portfolio statistics aggregation

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    format_discount, offer_status, offer_status_from_strs, parse_instant, Offer, OfferStats,
    OfferStatus,
};
use uuid::Uuid;

/// Helper to parse an instant from a test literal
fn instant(raw: &str) -> DateTime<Utc> {
    parse_instant(raw).unwrap()
}

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Helper to build an offer row for aggregation tests
fn offer_row(
    is_active: bool,
    start: &str,
    end: Option<&str>,
    percentage: Option<i32>,
) -> Offer {
    Offer {
        id: Uuid::new_v4(),
        business_id: Uuid::new_v4(),
        title: "Test offer".to_string(),
        description: None,
        discount_percentage: percentage,
        discount_amount: None,
        start_date: instant(start),
        end_date: end.map(instant),
        is_active,
        created_at: instant("2024-01-01"),
    }
}

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate an arbitrary instant inside 2024
fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..365 * 24 * 60).prop_map(|minutes| instant("2024-01-01") + Duration::minutes(minutes))
}

/// Generate an arbitrary date window (start plus optional later end)
fn window_strategy() -> impl Strategy<Value = (DateTime<Utc>, Option<DateTime<Utc>>)> {
    (instant_strategy(), proptest::option::of(0i64..10_000)).prop_map(|(start, length)| {
        (start, length.map(|minutes| start + Duration::minutes(minutes)))
    })
}

// ============================================================================
// Lifecycle Evaluation Tests
// Deactivation wins over dates; both window boundaries are inclusive
// ============================================================================

mod lifecycle_evaluation {
    use super::*;

    #[test]
    fn deactivated_offer_is_inactive_even_inside_window() {
        let status = offer_status(
            false,
            instant("2024-01-01"),
            Some(instant("2024-12-31")),
            instant("2024-06-15"),
        );
        assert_eq!(status, OfferStatus::Inactive);
    }

    #[test]
    fn deactivation_wins_over_expiry() {
        // Flag off and past the end date: the flag is still what reports
        let status = offer_status(
            false,
            instant("2024-01-01"),
            Some(instant("2024-01-10")),
            instant("2024-03-01"),
        );
        assert_eq!(status, OfferStatus::Inactive);
    }

    #[test]
    fn before_start_is_scheduled() {
        let status = offer_status(true, instant("2024-06-01"), None, instant("2024-05-31"));
        assert_eq!(status, OfferStatus::Scheduled);
    }

    #[test]
    fn start_instant_is_already_active() {
        // Inclusive start boundary
        let start = instant("2024-06-01T00:00:00Z");
        let status = offer_status(true, start, None, start);
        assert_eq!(status, OfferStatus::Active);
    }

    #[test]
    fn end_instant_is_still_active() {
        // Inclusive end boundary
        let end = instant("2024-06-30T23:59:59Z");
        let status = offer_status(true, instant("2024-06-01"), Some(end), end);
        assert_eq!(status, OfferStatus::Active);
    }

    #[test]
    fn after_end_is_expired() {
        let status = offer_status(
            true,
            instant("2024-06-01"),
            Some(instant("2024-06-30")),
            instant("2024-07-01"),
        );
        assert_eq!(status, OfferStatus::Expired);
    }

    #[test]
    fn missing_end_date_never_expires() {
        let status = offer_status(true, instant("2020-01-01"), None, instant("2030-01-01"));
        assert_eq!(status, OfferStatus::Active);
    }

    #[test]
    fn running_offer_reports_active() {
        // A flagged-on offer inside its window is simply active
        let status = offer_status_from_strs(
            true,
            "2024-01-01",
            Some("2024-01-10"),
            instant("2024-01-05"),
        )
        .unwrap();
        assert_eq!(status, OfferStatus::Active);
    }

    #[test]
    fn status_labels_match_display() {
        assert_eq!(OfferStatus::Active.to_string(), "Active");
        assert_eq!(OfferStatus::Scheduled.to_string(), "Scheduled");
        assert_eq!(OfferStatus::Expired.to_string(), "Expired");
        assert_eq!(OfferStatus::Inactive.to_string(), "Inactive");
    }
}

// ============================================================================
// Date Parsing Tests
// Full RFC 3339 timestamps and bare dates are both accepted
// ============================================================================

mod date_parsing {
    use super::*;

    #[test]
    fn full_timestamp_parses() {
        let parsed = parse_instant("2024-03-15T10:30:00Z").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-15T10:30:00+00:00");
    }

    #[test]
    fn offset_timestamp_normalizes_to_utc() {
        let parsed = parse_instant("2024-03-15T10:30:00+07:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-15T03:30:00+00:00");
    }

    #[test]
    fn bare_date_becomes_utc_midnight() {
        let parsed = parse_instant("2024-03-15").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-15T00:00:00+00:00");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_instant("next tuesday").is_err());
        assert!(parse_instant("15/03/2024").is_err());
        assert!(parse_instant("").is_err());
    }

    #[test]
    fn malformed_start_date_fails_evaluation() {
        let result = offer_status_from_strs(true, "not-a-date", None, instant("2024-01-05"));
        assert!(result.is_err());
    }
}

// ============================================================================
// Discount Label Tests
// Percentage takes precedence, amounts drop trailing zeros
// ============================================================================

mod discount_labels {
    use super::*;

    #[test]
    fn percentage_formats_with_percent_off() {
        assert_eq!(format_discount(Some(20), None), "20% OFF");
    }

    #[test]
    fn amount_formats_with_dollar_off() {
        assert_eq!(format_discount(None, Some(dec("5"))), "$5 OFF");
    }

    #[test]
    fn amount_drops_trailing_zeros() {
        assert_eq!(format_discount(None, Some(dec("5.00"))), "$5 OFF");
        assert_eq!(format_discount(None, Some(dec("7.50"))), "$7.5 OFF");
    }

    #[test]
    fn percentage_wins_when_both_present() {
        assert_eq!(format_discount(Some(15), Some(dec("5"))), "15% OFF");
    }

    #[test]
    fn zero_percentage_still_formats_as_percentage() {
        // A stored zero is shown as-is rather than falling through
        assert_eq!(format_discount(Some(0), Some(dec("5"))), "0% OFF");
    }

    #[test]
    fn no_discount_falls_back_to_special_offer() {
        assert_eq!(format_discount(None, None), "Special Offer");
    }
}

// ============================================================================
// Portfolio Statistics Tests
// Active counts live offers; scheduled counts flagged-on offers not live
// ============================================================================

mod portfolio_stats {
    use super::*;

    #[test]
    fn counts_split_by_lifecycle() {
        let now = instant("2024-06-15");
        let offers = vec![
            offer_row(true, "2024-06-01", Some("2024-06-30"), Some(20)),
            offer_row(true, "2024-07-01", None, Some(10)),
            offer_row(false, "2024-06-01", None, Some(30)),
        ];

        let stats = OfferStats::summarize(&offers, now);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.active_count, 1);
        assert_eq!(stats.scheduled_count, 1);
    }

    #[test]
    fn expired_but_flagged_counts_as_scheduled() {
        // A flagged-on offer past its end date is not live, so it lands
        // in the scheduled bucket alongside genuinely upcoming offers
        let now = instant("2024-06-15");
        let offers = vec![offer_row(true, "2024-01-01", Some("2024-01-31"), Some(20))];

        let stats = OfferStats::summarize(&offers, now);
        assert_eq!(stats.active_count, 0);
        assert_eq!(stats.scheduled_count, 1);
    }

    #[test]
    fn average_treats_missing_percentages_as_zero() {
        let now = instant("2024-06-15");
        let offers = vec![
            offer_row(true, "2024-06-01", None, Some(30)),
            offer_row(true, "2024-06-01", None, None),
        ];

        let stats = OfferStats::summarize(&offers, now);
        assert_eq!(stats.average_discount_percent, 15);
    }

    #[test]
    fn average_rounds_to_nearest_percent() {
        let now = instant("2024-06-15");
        let offers = vec![
            offer_row(true, "2024-06-01", None, Some(10)),
            offer_row(true, "2024-06-01", None, Some(15)),
            offer_row(true, "2024-06-01", None, Some(20)),
        ];

        // 45 / 3 = 15 exactly; add one more for a fractional mean
        let stats = OfferStats::summarize(&offers, now);
        assert_eq!(stats.average_discount_percent, 15);

        let offers = vec![
            offer_row(true, "2024-06-01", None, Some(10)),
            offer_row(true, "2024-06-01", None, Some(15)),
        ];
        let stats = OfferStats::summarize(&offers, now);
        assert_eq!(stats.average_discount_percent, 13);
    }

    #[test]
    fn empty_portfolio_reports_zeroes() {
        let stats = OfferStats::summarize(&[], instant("2024-06-15"));
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.active_count, 0);
        assert_eq!(stats.scheduled_count, 0);
        assert_eq!(stats.average_discount_percent, 0);
    }
}

// ============================================================================
// Lifecycle Properties
// ============================================================================

proptest! {
    /// The flag always wins: a deactivated offer never reports anything
    /// but Inactive
    #[test]
    fn deactivated_is_always_inactive(
        (start, end) in window_strategy(),
        now in instant_strategy()
    ) {
        prop_assert_eq!(offer_status(false, start, end, now), OfferStatus::Inactive);
    }

    /// A flagged-on offer is active exactly when now sits inside the
    /// inclusive window
    #[test]
    fn active_matches_inclusive_window(
        (start, end) in window_strategy(),
        now in instant_strategy()
    ) {
        let status = offer_status(true, start, end, now);
        let inside = now >= start && end.map_or(true, |e| now <= e);
        prop_assert_eq!(status == OfferStatus::Active, inside);
    }

    /// Scheduled can only come from a future start
    #[test]
    fn scheduled_implies_future_start(
        (start, end) in window_strategy(),
        now in instant_strategy()
    ) {
        if offer_status(true, start, end, now) == OfferStatus::Scheduled {
            prop_assert!(now < start);
        }
    }

    /// Active plus scheduled never exceeds the portfolio size
    #[test]
    fn stats_counts_stay_within_total(
        flags in prop::collection::vec(any::<bool>(), 0..20),
        now in instant_strategy()
    ) {
        let offers: Vec<Offer> = flags
            .iter()
            .map(|&flag| offer_row(flag, "2024-06-01", Some("2024-06-30"), Some(10)))
            .collect();
        let stats = OfferStats::summarize(&offers, now);
        prop_assert!(stats.active_count + stats.scheduled_count <= stats.total_count);
    }
}
