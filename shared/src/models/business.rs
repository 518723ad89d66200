//! Business profile models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{distance_label, Coordinates};

/// Subscription standing of a business listing
///
/// Only `Active` listings appear in the customer directory. New profiles
/// start out `Pending` until the owner activates a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Pending,
    Active,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a stored status code, treating anything unknown as `Pending`
    pub fn from_code(code: &str) -> Self {
        match code {
            "active" => SubscriptionStatus::Active,
            "cancelled" => SubscriptionStatus::Cancelled,
            _ => SubscriptionStatus::Pending,
        }
    }
}

/// Free-text opening hours per weekday
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyHours {
    pub monday: Option<String>,
    pub tuesday: Option<String>,
    pub wednesday: Option<String>,
    pub thursday: Option<String>,
    pub friday: Option<String>,
    pub saturday: Option<String>,
    pub sunday: Option<String>,
}

/// An owner-managed storefront profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub hours: WeeklyHours,
    pub location: Option<Coordinates>,
    pub subscription_status: SubscriptionStatus,
    pub subscription_plan: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A directory entry annotated with the distance from the caller
#[derive(Debug, Clone, Serialize)]
pub struct BusinessWithDistance {
    #[serde(flatten)]
    pub business: Business,
    pub distance_km: Option<f64>,
    pub distance_text: String,
}

impl BusinessWithDistance {
    /// Annotate a listing with the caller's position, when known
    pub fn annotate(business: Business, viewer: Option<Coordinates>) -> Self {
        let distance_km = match (viewer, business.location) {
            (Some(from), Some(to)) => Some(from.distance_km(&to)),
            _ => None,
        };
        let distance_text = distance_label(viewer, business.location);
        Self {
            business,
            distance_km,
            distance_text,
        }
    }
}
