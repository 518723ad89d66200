//! Offer models and lifecycle evaluation

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A stored timestamp that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date format: {0}")]
pub struct InvalidDateFormat(pub String);

/// Lifecycle state of an offer at a given instant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    /// Currently running and shown to customers
    Active,
    /// Activation flag is set but the start date is still in the future
    Scheduled,
    /// Activation flag is set but the end date has passed
    Expired,
    /// Deactivated by the owner
    Inactive,
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OfferStatus::Active => "Active",
            OfferStatus::Scheduled => "Scheduled",
            OfferStatus::Expired => "Expired",
            OfferStatus::Inactive => "Inactive",
        };
        write!(f, "{}", label)
    }
}

/// Evaluate an offer's lifecycle state at `now`
///
/// The deactivation flag wins over any date. Both boundaries are
/// inclusive: an offer is already active at its start instant and still
/// active at its end instant. A missing end date never expires.
pub fn offer_status(
    is_active: bool,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> OfferStatus {
    if !is_active {
        return OfferStatus::Inactive;
    }
    if now < start_date {
        return OfferStatus::Scheduled;
    }
    if let Some(end) = end_date {
        if now > end {
            return OfferStatus::Expired;
        }
    }
    OfferStatus::Active
}

/// Evaluate lifecycle state from raw date strings
pub fn offer_status_from_strs(
    is_active: bool,
    start_date: &str,
    end_date: Option<&str>,
    now: DateTime<Utc>,
) -> Result<OfferStatus, InvalidDateFormat> {
    let start = parse_instant(start_date)?;
    let end = match end_date {
        Some(raw) => Some(parse_instant(raw)?),
        None => None,
    };
    Ok(offer_status(is_active, start, end, now))
}

/// Parse an instant from RFC 3339, or from a bare `YYYY-MM-DD` date which
/// is taken as UTC midnight
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, InvalidDateFormat> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(InvalidDateFormat(value.to_string()))
}

/// Human-readable discount text shown on offer cards
///
/// A percentage takes precedence over an amount when both are present,
/// even a zero percentage (form validation keeps stored values in 1-100).
pub fn format_discount(percentage: Option<i32>, amount: Option<Decimal>) -> String {
    if let Some(percentage) = percentage {
        return format!("{}% OFF", percentage);
    }
    if let Some(amount) = amount {
        return format!("${} OFF", amount.normalize());
    }
    "Special Offer".to_string()
}

/// A promotional offer attached to a business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: Uuid,
    pub business_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub discount_percentage: Option<i32>,
    pub discount_amount: Option<Decimal>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    /// Lifecycle state at the supplied instant
    pub fn status_at(&self, now: DateTime<Utc>) -> OfferStatus {
        offer_status(self.is_active, self.start_date, self.end_date, now)
    }

    /// True when the offer is currently running
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == OfferStatus::Active
    }

    /// Discount text for this offer's card
    pub fn discount_label(&self) -> String {
        format_discount(self.discount_percentage, self.discount_amount)
    }
}

/// Aggregate numbers shown above the offers list
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OfferStats {
    pub total_count: usize,
    pub active_count: usize,
    pub scheduled_count: usize,
    pub average_discount_percent: i32,
}

impl OfferStats {
    /// Summarize a collection of offers at the supplied instant
    ///
    /// `scheduled_count` counts every flagged-on offer that is not live,
    /// so expired-but-flagged offers land in this bucket too. The average
    /// treats offers without a percentage discount as zero and rounds to
    /// the nearest whole percent.
    pub fn summarize(offers: &[Offer], now: DateTime<Utc>) -> Self {
        let active_count = offers.iter().filter(|offer| offer.is_live(now)).count();
        let scheduled_count = offers
            .iter()
            .filter(|offer| offer.is_active && !offer.is_live(now))
            .count();
        let average_discount_percent = if offers.is_empty() {
            0
        } else {
            let sum: i64 = offers
                .iter()
                .map(|offer| i64::from(offer.discount_percentage.unwrap_or(0)))
                .sum();
            (sum as f64 / offers.len() as f64).round() as i32
        };
        Self {
            total_count: offers.len(),
            active_count,
            scheduled_count,
            average_discount_percent,
        }
    }
}
