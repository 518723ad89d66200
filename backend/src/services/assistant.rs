//! Assistant content service
//!
//! Stores the owner-curated description the in-app assistant serves to
//! customers. One document per business, replaced wholesale on save.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Assistant content service
#[derive(Clone)]
pub struct AssistantService {
    db: PgPool,
}

/// The stored assistant document for a business
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AssistantContent {
    pub business_id: Uuid,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl AssistantService {
    /// Create a new AssistantService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get a business's assistant document, if one was saved
    pub async fn get_content(&self, business_id: Uuid) -> AppResult<Option<AssistantContent>> {
        let content = sqlx::query_as::<_, AssistantContent>(
            r#"
            SELECT business_id, content, updated_at
            FROM business_ai_content
            WHERE business_id = $1
            "#,
        )
        .bind(business_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(content)
    }

    /// Create or replace a business's assistant document
    pub async fn set_content(
        &self,
        business_id: Uuid,
        content: &str,
    ) -> AppResult<AssistantContent> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation {
                field: "content".to_string(),
                message: "Content cannot be empty".to_string(),
            });
        }

        let saved = sqlx::query_as::<_, AssistantContent>(
            r#"
            INSERT INTO business_ai_content (business_id, content)
            VALUES ($1, $2)
            ON CONFLICT (business_id)
            DO UPDATE SET content = EXCLUDED.content, updated_at = NOW()
            RETURNING business_id, content, updated_at
            "#,
        )
        .bind(business_id)
        .bind(content)
        .fetch_one(&self.db)
        .await?;

        Ok(saved)
    }
}
