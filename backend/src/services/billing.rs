//! Billing service with a simulated payment gateway
//!
//! No real charge is made anywhere in this module. Activation runs a
//! fixed-delay mock charge that always succeeds, then flips the
//! business's subscription to active.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::business::BusinessService;
use shared::validation::{validate_card_details, CardDetails};

/// Plan name written to the business row on activation
const ACTIVATION_PLAN: &str = "business";

/// Billing service
#[derive(Clone)]
pub struct BillingService {
    db: PgPool,
    processing_delay_ms: u64,
}

/// A plan shown on the public pricing page
#[derive(Debug, Clone, Serialize)]
pub struct PricingPlan {
    pub name: String,
    pub price: Decimal,
    pub period: String,
    pub description: String,
    pub features: Vec<String>,
    pub popular: bool,
}

/// Receipt returned after a successful activation charge
#[derive(Debug, Serialize)]
pub struct PaymentReceipt {
    pub business_id: Uuid,
    pub amount: Decimal,
    pub plan: String,
    pub status: String,
    pub processed_at: DateTime<Utc>,
}

impl BillingService {
    /// Create a new BillingService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            processing_delay_ms: config.billing.processing_delay_ms,
        }
    }

    /// One-time activation fee in USD
    pub fn activation_amount() -> Decimal {
        Decimal::from(49)
    }

    /// The public pricing catalogue
    pub fn plans() -> Vec<PricingPlan> {
        vec![
            PricingPlan {
                name: "Basic".to_string(),
                price: Decimal::from(29),
                period: "/month".to_string(),
                description: "Perfect for small local businesses getting started".to_string(),
                features: vec![
                    "Business profile listing".to_string(),
                    "Basic location visibility".to_string(),
                    "Customer contact info".to_string(),
                    "Basic hours & description".to_string(),
                    "Mobile app presence".to_string(),
                    "Email support".to_string(),
                ],
                popular: false,
            },
            PricingPlan {
                name: "Professional".to_string(),
                price: Decimal::from(59),
                period: "/month".to_string(),
                description: "Ideal for growing businesses wanting more visibility".to_string(),
                features: vec![
                    "Everything in Basic".to_string(),
                    "Enhanced profile with photos".to_string(),
                    "Priority in search results".to_string(),
                    "Customer review management".to_string(),
                    "Basic analytics dashboard".to_string(),
                    "Social media integration".to_string(),
                    "Phone support".to_string(),
                ],
                popular: true,
            },
            PricingPlan {
                name: "Premium".to_string(),
                price: Decimal::from(99),
                period: "/month".to_string(),
                description: "For established businesses maximizing their reach".to_string(),
                features: vec![
                    "Everything in Professional".to_string(),
                    "Featured business placement".to_string(),
                    "Advanced analytics & insights".to_string(),
                    "Custom promotional campaigns".to_string(),
                    "Priority customer support".to_string(),
                    "API access for integrations".to_string(),
                    "Dedicated account manager".to_string(),
                ],
                popular: false,
            },
        ]
    }

    /// Charge the activation fee and put the user's business live
    ///
    /// The mock gateway validates the card, waits out its configured
    /// processing delay, and approves unconditionally.
    pub async fn activate(&self, user_id: Uuid, card: CardDetails) -> AppResult<PaymentReceipt> {
        validate_card_details(&card)?;

        let business_service = BusinessService::new(self.db.clone());
        let business = business_service
            .get_by_owner(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Business".to_string()))?;

        Self::simulate_gateway(self.processing_delay_ms).await;

        sqlx::query(
            r#"
            UPDATE businesses
            SET subscription_status = 'active', subscription_plan = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(business.id)
        .bind(ACTIVATION_PLAN)
        .execute(&self.db)
        .await?;

        tracing::info!("Subscription activated for business {}", business.id);

        Ok(PaymentReceipt {
            business_id: business.id,
            amount: Self::activation_amount(),
            plan: ACTIVATION_PLAN.to_string(),
            status: "succeeded".to_string(),
            processed_at: Utc::now(),
        })
    }

    /// The mock gateway's processing time
    async fn simulate_gateway(delay_ms: u64) {
        tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
    }
}
