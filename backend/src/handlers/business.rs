//! Business profile and customer directory handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::BusinessService;
use crate::AppState;
use shared::models::{Business, BusinessWithDistance};
use shared::types::{Coordinates, PaginatedResponse, Pagination};
use shared::validation::BusinessDraft;

/// Query parameters for the customer directory
#[derive(Debug, Deserialize)]
pub struct DirectoryQuery {
    /// Free-text filter over name, category, and address
    pub q: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Get the current owner's business profile
pub async fn get_my_business(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Business>> {
    let service = BusinessService::new(state.db.clone());
    let business = service
        .get_by_owner(user.0.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Business".to_string()))?;

    Ok(Json(business))
}

/// Create the current owner's business profile
pub async fn create_my_business(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(draft): Json<BusinessDraft>,
) -> Result<(StatusCode, Json<Business>), AppError> {
    let service = BusinessService::new(state.db.clone());
    let business = service.create(user.0.user_id, draft).await?;

    Ok((StatusCode::CREATED, Json(business)))
}

/// Replace the current owner's business profile
pub async fn update_my_business(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(draft): Json<BusinessDraft>,
) -> AppResult<Json<Business>> {
    let service = BusinessService::new(state.db.clone());
    let business = service.update(user.0.user_id, draft).await?;

    Ok(Json(business))
}

/// Search active listings for customers
pub async fn search_businesses(
    State(state): State<AppState>,
    Query(params): Query<DirectoryQuery>,
) -> AppResult<Json<PaginatedResponse<BusinessWithDistance>>> {
    let viewer = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
        _ => None,
    };

    let defaults = Pagination::default();
    let pagination = Pagination {
        page: params.page.unwrap_or(defaults.page),
        per_page: params.per_page.unwrap_or(defaults.per_page),
    };

    let service = BusinessService::new(state.db.clone());
    let listings = service
        .search_active(params.q.as_deref(), viewer, pagination)
        .await?;

    Ok(Json(listings))
}
