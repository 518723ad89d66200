//! Handlers for the owner-managed assistant knowledge base

use axum::{extract::State, Json};
use serde::Deserialize;

use super::owned_business;
use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::assistant::AssistantContent;
use crate::services::AssistantService;
use crate::AppState;

#[derive(Deserialize)]
pub struct UpdateAssistantContentRequest {
    pub content: String,
}

/// Get the stored assistant content for the owner's business
pub async fn get_assistant_content(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<AssistantContent>> {
    let business = owned_business(&state, &user).await?;
    let service = AssistantService::new(state.db.clone());
    let content = service
        .get_content(business)
        .await?
        .ok_or_else(|| AppError::NotFound("Assistant content".to_string()))?;

    Ok(Json(content))
}

/// Replace the assistant content for the owner's business
pub async fn update_assistant_content(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<UpdateAssistantContentRequest>,
) -> AppResult<Json<AssistantContent>> {
    let business = owned_business(&state, &user).await?;
    let service = AssistantService::new(state.db.clone());
    let content = service.set_content(business, &payload.content).await?;

    Ok(Json(content))
}
