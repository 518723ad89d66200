//! Analytics service for interaction tracking and the owner dashboard

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{
    daily_view_call_buckets, recent_activity, weekly_growth_percent, AnalyticsEvent, DailyStats,
    EventKind, RecentActivity, DAILY_WINDOW_DAYS, RECENT_ACTIVITY_LIMIT,
};

/// Analytics service
#[derive(Clone)]
pub struct AnalyticsService {
    db: PgPool,
}

/// Event row as stored
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    business_id: Uuid,
    event_type: String,
    event_data: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl From<EventRow> for AnalyticsEvent {
    fn from(row: EventRow) -> Self {
        AnalyticsEvent {
            id: row.id,
            business_id: row.business_id,
            kind: EventKind::from_parts(&row.event_type, row.event_data.as_ref()),
            created_at: row.created_at,
        }
    }
}

/// Headline numbers for the dashboard cards
#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub total_views: i64,
    pub monthly_views: i64,
    pub weekly_views: i64,
    pub previous_week_views: i64,
    pub total_calls: i64,
    pub weekly_growth_percent: f64,
    pub active_offers: i64,
}

impl AnalyticsService {
    /// Create a new AnalyticsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Append one customer interaction to a business's history
    pub async fn record_event(&self, business_id: Uuid, kind: EventKind) -> AppResult<Uuid> {
        let exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM businesses WHERE id = $1")
                .bind(business_id)
                .fetch_one(&self.db)
                .await?;

        if exists == 0 {
            return Err(AppError::NotFound("Business".to_string()));
        }

        let event_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO business_analytics (business_id, event_type, event_data)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(business_id)
        .bind(kind.code())
        .bind(kind.payload())
        .fetch_one(&self.db)
        .await?;

        Ok(event_id)
    }

    /// Headline numbers for the dashboard
    ///
    /// All windows are cut from a single clock reading so the weekly and
    /// previous-week counts never overlap.
    pub async fn summary(&self, business_id: Uuid) -> AppResult<AnalyticsSummary> {
        let now = Utc::now();
        let week_ago = now - Duration::days(7);
        let two_weeks_ago = now - Duration::days(14);
        let month_ago = now - Duration::days(30);

        let total_views = self.count_events(business_id, "view", None, None).await?;
        let monthly_views = self
            .count_events(business_id, "view", Some(month_ago), None)
            .await?;
        let weekly_views = self
            .count_events(business_id, "view", Some(week_ago), None)
            .await?;
        let previous_week_views = self
            .count_events(business_id, "view", Some(two_weeks_ago), Some(week_ago))
            .await?;
        let total_calls = self.count_events(business_id, "call", None, None).await?;

        let active_offers = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM offers WHERE business_id = $1 AND is_active = TRUE",
        )
        .bind(business_id)
        .fetch_one(&self.db)
        .await?;

        Ok(AnalyticsSummary {
            total_views,
            monthly_views,
            weekly_views,
            previous_week_views,
            total_calls,
            weekly_growth_percent: weekly_growth_percent(weekly_views, previous_week_views),
            active_offers,
        })
    }

    /// Daily view/call counts for the chart, one bucket per trailing
    /// UTC calendar day
    pub async fn daily_stats(&self, business_id: Uuid) -> AppResult<Vec<DailyStats>> {
        let now = Utc::now();
        let today = now.date_naive();
        let window_start = match (today - Duration::days(DAILY_WINDOW_DAYS - 1)).and_hms_opt(0, 0, 0)
        {
            Some(midnight) => midnight.and_utc(),
            None => now,
        };

        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, business_id, event_type, event_data, created_at
            FROM business_analytics
            WHERE business_id = $1
              AND event_type IN ('view', 'call')
              AND created_at >= $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(business_id)
        .bind(window_start)
        .fetch_all(&self.db)
        .await?;

        let events: Vec<AnalyticsEvent> = rows.into_iter().map(AnalyticsEvent::from).collect();
        Ok(daily_view_call_buckets(&events, today))
    }

    /// The most recent interactions as display rows
    pub async fn recent(&self, business_id: Uuid) -> AppResult<Vec<RecentActivity>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, business_id, event_type, event_data, created_at
            FROM business_analytics
            WHERE business_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(business_id)
        .bind(RECENT_ACTIVITY_LIMIT as i64)
        .fetch_all(&self.db)
        .await?;

        let events: Vec<AnalyticsEvent> = rows.into_iter().map(AnalyticsEvent::from).collect();
        Ok(recent_activity(&events, Utc::now()))
    }

    async fn count_events(
        &self,
        business_id: Uuid,
        event_type: &str,
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM business_analytics
            WHERE business_id = $1
              AND event_type = $2
              AND ($3::timestamptz IS NULL OR created_at >= $3)
              AND ($4::timestamptz IS NULL OR created_at < $4)
            "#,
        )
        .bind(business_id)
        .bind(event_type)
        .bind(since)
        .bind(until)
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }

    /// Export data as CSV string
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record).map_err(|e| {
                crate::error::AppError::Internal(format!("CSV serialization error: {}", e))
            })?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| crate::error::AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| crate::error::AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_daily_stats_to_csv() {
        let data = vec![
            DailyStats {
                date: "2024-03-04".to_string(),
                views: 12,
                calls: 3,
            },
            DailyStats {
                date: "2024-03-05".to_string(),
                views: 0,
                calls: 0,
            },
        ];
        let csv = AnalyticsService::export_to_csv(&data).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("date,views,calls"));
        assert_eq!(lines.next(), Some("2024-03-04,12,3"));
        assert_eq!(lines.next(), Some("2024-03-05,0,0"));
    }
}
