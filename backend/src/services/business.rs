//! Business profile service for owner-managed storefront listings

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Business, BusinessWithDistance, SubscriptionStatus, WeeklyHours};
use shared::types::{Coordinates, PaginatedResponse, Pagination, PaginationMeta};
use shared::validation::{validate_business, BusinessDraft};

/// Largest page size the directory will serve
const MAX_PAGE_SIZE: u32 = 100;

/// Business service for profile management and the customer directory
#[derive(Clone)]
pub struct BusinessService {
    db: PgPool,
}

/// Business row as stored
#[derive(Debug, sqlx::FromRow)]
struct BusinessRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    description: Option<String>,
    category: String,
    address: String,
    phone: Option<String>,
    email: Option<String>,
    website: Option<String>,
    hours_monday: Option<String>,
    hours_tuesday: Option<String>,
    hours_wednesday: Option<String>,
    hours_thursday: Option<String>,
    hours_friday: Option<String>,
    hours_saturday: Option<String>,
    hours_sunday: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    subscription_status: String,
    subscription_plan: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BusinessRow> for Business {
    fn from(row: BusinessRow) -> Self {
        // Both coordinates must be present to count as a location
        let location = match (row.latitude, row.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        };
        Business {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            description: row.description,
            category: row.category,
            address: row.address,
            phone: row.phone,
            email: row.email,
            website: row.website,
            hours: WeeklyHours {
                monday: row.hours_monday,
                tuesday: row.hours_tuesday,
                wednesday: row.hours_wednesday,
                thursday: row.hours_thursday,
                friday: row.hours_friday,
                saturday: row.hours_saturday,
                sunday: row.hours_sunday,
            },
            location,
            subscription_status: SubscriptionStatus::from_code(&row.subscription_status),
            subscription_plan: row.subscription_plan,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const BUSINESS_COLUMNS: &str = r#"
    id, user_id, name, description, category, address, phone, email, website,
    hours_monday, hours_tuesday, hours_wednesday, hours_thursday,
    hours_friday, hours_saturday, hours_sunday,
    latitude, longitude, subscription_status, subscription_plan,
    created_at, updated_at
"#;

impl BusinessService {
    /// Create a new BusinessService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get the business owned by a user, if they have one
    pub async fn get_by_owner(&self, user_id: Uuid) -> AppResult<Option<Business>> {
        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            "SELECT {} FROM businesses WHERE user_id = $1",
            BUSINESS_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Business::from))
    }

    /// Get an active listing by id, as shown to customers
    pub async fn get_active_by_id(&self, business_id: Uuid) -> AppResult<Business> {
        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            "SELECT {} FROM businesses WHERE id = $1 AND subscription_status = 'active'",
            BUSINESS_COLUMNS
        ))
        .bind(business_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Business".to_string()))?;

        Ok(Business::from(row))
    }

    /// Create the profile for a user's business
    ///
    /// Each account owns at most one business. New profiles start with a
    /// pending subscription and stay out of the directory until billing
    /// activates them.
    pub async fn create(&self, user_id: Uuid, draft: BusinessDraft) -> AppResult<Business> {
        validate_business(&draft)?;

        // One business per account
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM businesses WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.db)
                .await?;

        if existing > 0 {
            return Err(AppError::DuplicateEntry("business".to_string()));
        }

        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            r#"
            INSERT INTO businesses (
                user_id, name, description, category, address, phone, email, website,
                hours_monday, hours_tuesday, hours_wednesday, hours_thursday,
                hours_friday, hours_saturday, hours_sunday,
                latitude, longitude
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {}
            "#,
            BUSINESS_COLUMNS
        ))
        .bind(user_id)
        .bind(draft.name.trim())
        .bind(clean(draft.description))
        .bind(draft.category.trim())
        .bind(draft.address.trim())
        .bind(clean(draft.phone))
        .bind(clean(draft.email))
        .bind(clean(draft.website))
        .bind(clean(draft.hours.monday))
        .bind(clean(draft.hours.tuesday))
        .bind(clean(draft.hours.wednesday))
        .bind(clean(draft.hours.thursday))
        .bind(clean(draft.hours.friday))
        .bind(clean(draft.hours.saturday))
        .bind(clean(draft.hours.sunday))
        .bind(draft.latitude)
        .bind(draft.longitude)
        .fetch_one(&self.db)
        .await?;

        Ok(Business::from(row))
    }

    /// Replace the profile of the user's business
    pub async fn update(&self, user_id: Uuid, draft: BusinessDraft) -> AppResult<Business> {
        validate_business(&draft)?;

        let row = sqlx::query_as::<_, BusinessRow>(&format!(
            r#"
            UPDATE businesses SET
                name = $2, description = $3, category = $4, address = $5,
                phone = $6, email = $7, website = $8,
                hours_monday = $9, hours_tuesday = $10, hours_wednesday = $11,
                hours_thursday = $12, hours_friday = $13, hours_saturday = $14,
                hours_sunday = $15,
                latitude = $16, longitude = $17,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {}
            "#,
            BUSINESS_COLUMNS
        ))
        .bind(user_id)
        .bind(draft.name.trim())
        .bind(clean(draft.description))
        .bind(draft.category.trim())
        .bind(draft.address.trim())
        .bind(clean(draft.phone))
        .bind(clean(draft.email))
        .bind(clean(draft.website))
        .bind(clean(draft.hours.monday))
        .bind(clean(draft.hours.tuesday))
        .bind(clean(draft.hours.wednesday))
        .bind(clean(draft.hours.thursday))
        .bind(clean(draft.hours.friday))
        .bind(clean(draft.hours.saturday))
        .bind(clean(draft.hours.sunday))
        .bind(draft.latitude)
        .bind(draft.longitude)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Business".to_string()))?;

        Ok(Business::from(row))
    }

    /// Search active listings for the customer directory
    ///
    /// The text filter matches name, category, and address. When the
    /// caller shares their position, entries are annotated with the
    /// distance and sorted nearest first; listings without coordinates
    /// sink to the end in name order.
    pub async fn search_active(
        &self,
        query: Option<&str>,
        viewer: Option<Coordinates>,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<BusinessWithDistance>> {
        let pattern = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(like_pattern);

        let rows = sqlx::query_as::<_, BusinessRow>(&format!(
            r#"
            SELECT {}
            FROM businesses
            WHERE subscription_status = 'active'
              AND ($1::text IS NULL OR name ILIKE $1 OR category ILIKE $1 OR address ILIKE $1)
            ORDER BY name ASC
            "#,
            BUSINESS_COLUMNS
        ))
        .bind(&pattern)
        .fetch_all(&self.db)
        .await?;

        let mut annotated: Vec<BusinessWithDistance> = rows
            .into_iter()
            .map(|row| BusinessWithDistance::annotate(Business::from(row), viewer))
            .collect();

        if viewer.is_some() {
            annotated.sort_by(|a, b| match (a.distance_km, b.distance_km) {
                (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }

        Ok(paginate(annotated, pagination))
    }
}

/// Escape LIKE wildcards and wrap in a contains pattern
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Slice an in-memory result set into one page
fn paginate<T>(items: Vec<T>, pagination: Pagination) -> PaginatedResponse<T> {
    let page = pagination.page.max(1);
    let per_page = pagination.per_page.clamp(1, MAX_PAGE_SIZE);
    let total_items = items.len() as u64;
    let total_pages = (total_items.div_ceil(per_page as u64)) as u32;

    let start = ((page - 1) as usize).saturating_mul(per_page as usize);
    let data: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    PaginatedResponse {
        data,
        pagination: PaginationMeta {
            page,
            per_page,
            total_items,
            total_pages,
        },
    }
}
