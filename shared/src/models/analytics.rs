//! Analytics event models and dashboard derivations

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of trailing calendar days shown on the daily chart
pub const DAILY_WINDOW_DAYS: i64 = 7;

/// Maximum number of rows in the recent-activity feed
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// A customer interaction recorded against a business
///
/// Each variant carries exactly the payload its feed description needs.
/// Kinds this build does not know about survive as `Other` so old events
/// never break the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    View,
    Call,
    OfferClick { offer_title: Option<String> },
    ProfileView,
    Other(String),
}

impl EventKind {
    /// Wire code stored in the event row
    pub fn code(&self) -> &str {
        match self {
            EventKind::View => "view",
            EventKind::Call => "call",
            EventKind::OfferClick { .. } => "offer_click",
            EventKind::ProfileView => "profile_view",
            EventKind::Other(kind) => kind,
        }
    }

    /// Structured payload stored alongside the wire code, if any
    pub fn payload(&self) -> Option<serde_json::Value> {
        match self {
            EventKind::OfferClick {
                offer_title: Some(title),
            } => Some(serde_json::json!({ "offer_title": title })),
            _ => None,
        }
    }

    /// Rebuild a kind from its stored code and payload
    pub fn from_parts(event_type: &str, event_data: Option<&serde_json::Value>) -> Self {
        match event_type {
            "view" => EventKind::View,
            "call" => EventKind::Call,
            "offer_click" => EventKind::OfferClick {
                offer_title: event_data
                    .and_then(|data| data.get("offer_title"))
                    .and_then(|title| title.as_str())
                    .map(str::to_string),
            },
            "profile_view" => EventKind::ProfileView,
            other => EventKind::Other(other.to_string()),
        }
    }

    /// Feed description for this event
    pub fn describe(&self) -> String {
        match self {
            EventKind::View => "Customer viewed your business profile".to_string(),
            EventKind::Call => "Customer called your business".to_string(),
            EventKind::OfferClick { offer_title } => format!(
                "Customer clicked on offer: {}",
                offer_title.as_deref().unwrap_or("Unknown offer")
            ),
            EventKind::ProfileView => "Customer viewed your detailed profile".to_string(),
            EventKind::Other(kind) => format!("Unknown activity: {}", kind),
        }
    }
}

/// An append-only customer interaction record
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub business_id: Uuid,
    pub kind: EventKind,
    pub created_at: DateTime<Utc>,
}

/// Per-day view and call counts for the dashboard chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyStats {
    /// UTC calendar day, `YYYY-MM-DD`
    pub date: String,
    pub views: i64,
    pub calls: i64,
}

/// Bucket events into the trailing seven UTC calendar days ending at
/// `today`, oldest day first
///
/// Every day in the window is present even when it saw no traffic. Only
/// view and call events count; other kinds are ignored. Events outside
/// the window are dropped.
pub fn daily_view_call_buckets(events: &[AnalyticsEvent], today: NaiveDate) -> Vec<DailyStats> {
    let first_day = today - Duration::days(DAILY_WINDOW_DAYS - 1);
    let mut buckets: Vec<DailyStats> = (0..DAILY_WINDOW_DAYS)
        .map(|offset| DailyStats {
            date: (first_day + Duration::days(offset))
                .format("%Y-%m-%d")
                .to_string(),
            views: 0,
            calls: 0,
        })
        .collect();

    for event in events {
        let day = event.created_at.date_naive();
        if day < first_day || day > today {
            continue;
        }
        let index = (day - first_day).num_days() as usize;
        match &event.kind {
            EventKind::View => buckets[index].views += 1,
            EventKind::Call => buckets[index].calls += 1,
            _ => {}
        }
    }
    buckets
}

/// Week-over-week view growth as a percentage
///
/// A quiet previous week reads as a step change: any traffic at all is
/// +100%, no traffic either week is 0%.
pub fn weekly_growth_percent(weekly_views: i64, previous_week_views: i64) -> f64 {
    if previous_week_views > 0 {
        (weekly_views - previous_week_views) as f64 / previous_week_views as f64 * 100.0
    } else if weekly_views > 0 {
        100.0
    } else {
        0.0
    }
}

/// Relative-time label for the activity feed
///
/// Whole elapsed minutes with floor division at every step, so 90
/// minutes reads "1 hours ago". Timestamps in the future clamp to
/// "Just now".
pub fn relative_time_label(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - created_at).num_minutes();
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{} minutes ago", minutes)
    } else if minutes < 1440 {
        format!("{} hours ago", minutes / 60)
    } else {
        format!("{} days ago", minutes / 1440)
    }
}

/// A recent event prepared for display
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecentActivity {
    pub id: Uuid,
    pub event_type: String,
    pub description: String,
    pub time_ago: String,
}

/// The most recent events as display rows, newest first, capped at
/// [`RECENT_ACTIVITY_LIMIT`]
pub fn recent_activity(events: &[AnalyticsEvent], now: DateTime<Utc>) -> Vec<RecentActivity> {
    let mut ordered: Vec<&AnalyticsEvent> = events.iter().collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    ordered
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|event| RecentActivity {
            id: event.id,
            event_type: event.kind.code().to_string(),
            description: event.kind.describe(),
            time_ago: relative_time_label(event.created_at, now),
        })
        .collect()
}
