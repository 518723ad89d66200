//! Offer management service for promotional offers and their lifecycle

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::business::BusinessService;
use shared::models::{parse_instant, Offer, OfferStats, OfferStatus};
use shared::validation::{validate_offer, OfferDraft};

/// Offer service
#[derive(Clone)]
pub struct OfferService {
    db: PgPool,
}

/// Offer row as stored
#[derive(Debug, sqlx::FromRow)]
struct OfferRow {
    id: Uuid,
    business_id: Uuid,
    title: String,
    description: Option<String>,
    discount_percentage: Option<i32>,
    discount_amount: Option<Decimal>,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<OfferRow> for Offer {
    fn from(row: OfferRow) -> Self {
        Offer {
            id: row.id,
            business_id: row.business_id,
            title: row.title,
            description: row.description,
            discount_percentage: row.discount_percentage,
            discount_amount: row.discount_amount,
            start_date: row.start_date,
            end_date: row.end_date,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

/// An offer with its evaluated lifecycle state
#[derive(Debug, Clone, Serialize)]
pub struct OfferWithStatus {
    #[serde(flatten)]
    pub offer: Offer,
    pub status: OfferStatus,
    pub discount_text: String,
}

/// The owner's offer list with its aggregate numbers
#[derive(Debug, Serialize)]
pub struct OfferListing {
    pub offers: Vec<OfferWithStatus>,
    pub stats: OfferStats,
}

/// A running offer as shown to customers
#[derive(Debug, Clone, Serialize)]
pub struct LiveOffer {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub discount_text: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

const OFFER_COLUMNS: &str = r#"
    id, business_id, title, description, discount_percentage, discount_amount,
    start_date, end_date, is_active, created_at
"#;

impl OfferService {
    /// Create a new OfferService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List a business's offers, newest first, with aggregate stats
    pub async fn list(&self, business_id: Uuid) -> AppResult<OfferListing> {
        let offers = self.fetch_all(business_id).await?;
        let now = Utc::now();

        let stats = OfferStats::summarize(&offers, now);
        let offers = offers
            .into_iter()
            .map(|offer| with_status(offer, now))
            .collect();

        Ok(OfferListing { offers, stats })
    }

    /// Create an offer for a business
    pub async fn create(&self, business_id: Uuid, draft: OfferDraft) -> AppResult<OfferWithStatus> {
        validate_offer(&draft)?;
        let (start_date, end_date) = parse_draft_dates(&draft)?;

        let row = sqlx::query_as::<_, OfferRow>(&format!(
            r#"
            INSERT INTO offers (
                business_id, title, description, discount_percentage,
                discount_amount, start_date, end_date, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
            RETURNING {}
            "#,
            OFFER_COLUMNS
        ))
        .bind(business_id)
        .bind(draft.title.trim())
        .bind(clean(draft.description))
        .bind(draft.discount_percentage)
        .bind(draft.discount_amount)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.db)
        .await?;

        Ok(with_status(Offer::from(row), Utc::now()))
    }

    /// Replace an offer's fields
    pub async fn update(
        &self,
        business_id: Uuid,
        offer_id: Uuid,
        draft: OfferDraft,
    ) -> AppResult<OfferWithStatus> {
        validate_offer(&draft)?;
        let (start_date, end_date) = parse_draft_dates(&draft)?;

        let row = sqlx::query_as::<_, OfferRow>(&format!(
            r#"
            UPDATE offers SET
                title = $3, description = $4, discount_percentage = $5,
                discount_amount = $6, start_date = $7, end_date = $8
            WHERE id = $1 AND business_id = $2
            RETURNING {}
            "#,
            OFFER_COLUMNS
        ))
        .bind(offer_id)
        .bind(business_id)
        .bind(draft.title.trim())
        .bind(clean(draft.description))
        .bind(draft.discount_percentage)
        .bind(draft.discount_amount)
        .bind(start_date)
        .bind(end_date)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Offer".to_string()))?;

        Ok(with_status(Offer::from(row), Utc::now()))
    }

    /// Flip an offer's activation flag
    pub async fn toggle(&self, business_id: Uuid, offer_id: Uuid) -> AppResult<OfferWithStatus> {
        let row = sqlx::query_as::<_, OfferRow>(&format!(
            r#"
            UPDATE offers SET is_active = NOT is_active
            WHERE id = $1 AND business_id = $2
            RETURNING {}
            "#,
            OFFER_COLUMNS
        ))
        .bind(offer_id)
        .bind(business_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Offer".to_string()))?;

        Ok(with_status(Offer::from(row), Utc::now()))
    }

    /// Delete an offer
    pub async fn delete(&self, business_id: Uuid, offer_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1 AND business_id = $2")
            .bind(offer_id)
            .bind(business_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Offer".to_string()));
        }
        Ok(())
    }

    /// Offers of an active listing that are live right now, for customers
    pub async fn live_offers(&self, business_id: Uuid) -> AppResult<Vec<LiveOffer>> {
        // 404 rather than an empty list when the listing is not public
        let business_service = BusinessService::new(self.db.clone());
        business_service.get_active_by_id(business_id).await?;

        let offers = self.fetch_all(business_id).await?;
        let now = Utc::now();

        Ok(offers
            .into_iter()
            .filter(|offer| offer.is_live(now))
            .map(|offer| LiveOffer {
                id: offer.id,
                title: offer.title.clone(),
                description: offer.description.clone(),
                discount_text: offer.discount_label(),
                start_date: offer.start_date,
                end_date: offer.end_date,
            })
            .collect())
    }

    async fn fetch_all(&self, business_id: Uuid) -> AppResult<Vec<Offer>> {
        let rows = sqlx::query_as::<_, OfferRow>(&format!(
            r#"
            SELECT {}
            FROM offers
            WHERE business_id = $1
            ORDER BY created_at DESC
            "#,
            OFFER_COLUMNS
        ))
        .bind(business_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Offer::from).collect())
    }
}

/// Resolve the draft's date strings, already known to parse
fn parse_draft_dates(
    draft: &OfferDraft,
) -> AppResult<(DateTime<Utc>, Option<DateTime<Utc>>)> {
    let start_date = parse_instant(draft.start_date.trim())?;
    let end_date = match draft
        .end_date
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
    {
        Some(raw) => Some(parse_instant(raw)?),
        None => None,
    };
    Ok((start_date, end_date))
}

fn with_status(offer: Offer, now: DateTime<Utc>) -> OfferWithStatus {
    let status = offer.status_at(now);
    let discount_text = offer.discount_label();
    OfferWithStatus {
        offer,
        status,
        discount_text,
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> OfferDraft {
        OfferDraft {
            title: "Lunch Set".to_string(),
            description: None,
            discount_percentage: Some(15),
            discount_amount: None,
            start_date: "2024-02-01".to_string(),
            end_date: Some("2024-02-29".to_string()),
        }
    }

    #[test]
    fn test_parse_draft_dates_accepts_bare_dates() {
        let (start, end) = parse_draft_dates(&draft()).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-02-01T00:00:00+00:00");
        assert_eq!(end.unwrap().to_rfc3339(), "2024-02-29T00:00:00+00:00");
    }

    #[test]
    fn test_parse_draft_dates_treats_blank_end_as_open() {
        let mut draft = draft();
        draft.end_date = Some("  ".to_string());
        let (_, end) = parse_draft_dates(&draft).unwrap();
        assert!(end.is_none());
    }

    #[test]
    fn test_with_status_carries_discount_text() {
        let now = parse_instant("2024-02-10T12:00:00Z").unwrap();
        let offer = Offer {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            title: "Lunch Set".to_string(),
            description: None,
            discount_percentage: Some(15),
            discount_amount: None,
            start_date: parse_instant("2024-02-01").unwrap(),
            end_date: Some(parse_instant("2024-02-29").unwrap()),
            is_active: true,
            created_at: now,
        };
        let evaluated = with_status(offer, now);
        assert_eq!(evaluated.status, OfferStatus::Active);
        assert_eq!(evaluated.discount_text, "15% OFF");
    }
}
