//! Offer management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::owned_business;
use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::offer::{LiveOffer, OfferListing, OfferWithStatus};
use crate::services::OfferService;
use crate::AppState;
use shared::validation::OfferDraft;

/// List the owner's offers with aggregate stats
pub async fn list_offers(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<OfferListing>> {
    let business = owned_business(&state, &user).await?;
    let service = OfferService::new(state.db.clone());
    let listing = service.list(business).await?;

    Ok(Json(listing))
}

/// Create an offer for the owner's business
pub async fn create_offer(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(draft): Json<OfferDraft>,
) -> Result<(StatusCode, Json<OfferWithStatus>), AppError> {
    let business = owned_business(&state, &user).await?;
    let service = OfferService::new(state.db.clone());
    let offer = service.create(business, draft).await?;

    Ok((StatusCode::CREATED, Json(offer)))
}

/// Replace an offer's fields
pub async fn update_offer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(offer_id): Path<Uuid>,
    Json(draft): Json<OfferDraft>,
) -> AppResult<Json<OfferWithStatus>> {
    let business = owned_business(&state, &user).await?;
    let service = OfferService::new(state.db.clone());
    let offer = service.update(business, offer_id, draft).await?;

    Ok(Json(offer))
}

/// Flip an offer's activation flag
pub async fn toggle_offer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(offer_id): Path<Uuid>,
) -> AppResult<Json<OfferWithStatus>> {
    let business = owned_business(&state, &user).await?;
    let service = OfferService::new(state.db.clone());
    let offer = service.toggle(business, offer_id).await?;

    Ok(Json(offer))
}

/// Delete an offer
pub async fn delete_offer(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(offer_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let business = owned_business(&state, &user).await?;
    let service = OfferService::new(state.db.clone());
    service.delete(business, offer_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the live offers of an active listing, for customers
pub async fn list_live_offers(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<Vec<LiveOffer>>> {
    let service = OfferService::new(state.db.clone());
    let offers = service.live_offers(business_id).await?;

    Ok(Json(offers))
}
