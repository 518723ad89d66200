//! Analytics handlers for engagement tracking and owner dashboards

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::owned_business;
use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::analytics::AnalyticsSummary;
use crate::services::AnalyticsService;
use crate::AppState;
use shared::models::{DailyStats, EventKind, RecentActivity};

#[derive(Deserialize)]
pub struct RecordEventRequest {
    pub business_id: Uuid,
    pub event_type: String,
    pub event_data: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct RecordEventResponse {
    pub event_id: Uuid,
}

#[derive(Deserialize)]
pub struct DailyStatsQuery {
    pub format: Option<String>, // "json" or "csv"
}

/// Record a customer interaction against a business, no auth required
pub async fn record_event(
    State(state): State<AppState>,
    Json(payload): Json<RecordEventRequest>,
) -> Result<(StatusCode, Json<RecordEventResponse>), AppError> {
    let kind = EventKind::from_parts(&payload.event_type, payload.event_data.as_ref());
    let service = AnalyticsService::new(state.db.clone());
    let event_id = service.record_event(payload.business_id, kind).await?;

    Ok((StatusCode::CREATED, Json(RecordEventResponse { event_id })))
}

/// Get the engagement summary for the owner's business
pub async fn get_summary(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<AnalyticsSummary>> {
    let business = owned_business(&state, &user).await?;
    let service = AnalyticsService::new(state.db.clone());
    let summary = service.summary(business).await?;

    Ok(Json(summary))
}

/// Get per-day view and call counts for the trailing week
pub async fn get_daily_stats(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<DailyStatsQuery>,
) -> AppResult<impl IntoResponse> {
    let business = owned_business(&state, &user).await?;
    let service = AnalyticsService::new(state.db.clone());
    let stats: Vec<DailyStats> = service.daily_stats(business).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = AnalyticsService::export_to_csv(&stats)?;
        Ok((
            [(header::CONTENT_TYPE, "text/csv"), (header::CONTENT_DISPOSITION, "attachment; filename=\"daily_stats.csv\"")],
            csv,
        ).into_response())
    } else {
        Ok(Json(stats).into_response())
    }
}

/// Get the latest customer interactions for the owner's business
pub async fn get_recent_activity(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<RecentActivity>>> {
    let business = owned_business(&state, &user).await?;
    let service = AnalyticsService::new(state.db.clone());
    let activity = service.recent(business).await?;

    Ok(Json(activity))
}
