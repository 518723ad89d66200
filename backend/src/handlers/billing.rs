//! Billing handlers for plan discovery and subscription activation

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::billing::{PaymentReceipt, PricingPlan};
use crate::services::BillingService;
use crate::AppState;
use shared::validation::CardDetails;

/// List the advertised pricing plans, no auth required
pub async fn list_plans() -> Json<Vec<PricingPlan>> {
    Json(BillingService::plans())
}

/// Charge the activation fee and flip the caller's listing live
pub async fn activate_subscription(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(card): Json<CardDetails>,
) -> AppResult<Json<PaymentReceipt>> {
    let service = BillingService::new(state.db.clone(), &state.config);
    let receipt = service.activate(user.0.user_id, card).await?;

    Ok(Json(receipt))
}
