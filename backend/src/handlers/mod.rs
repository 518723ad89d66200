//! HTTP handlers for the Market Connect API

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::BusinessService;
use crate::AppState;

pub mod analytics;
pub mod assistant;
pub mod auth;
pub mod billing;
pub mod business;
pub mod health;
pub mod offer;

pub use analytics::*;
pub use assistant::*;
pub use auth::*;
pub use billing::*;
pub use business::*;
pub use health::*;
pub use offer::*;

/// Resolve the caller's business id, failing when no profile exists yet
pub(crate) async fn owned_business(state: &AppState, user: &CurrentUser) -> AppResult<Uuid> {
    let service = BusinessService::new(state.db.clone());
    let business = service
        .get_by_owner(user.0.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Business".to_string()))?;

    Ok(business.id)
}
