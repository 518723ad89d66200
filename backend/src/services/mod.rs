//! Business logic services for the Market Connect API

pub mod analytics;
pub mod assistant;
pub mod auth;
pub mod billing;
pub mod business;
pub mod offer;

pub use analytics::AnalyticsService;
pub use assistant::AssistantService;
pub use auth::AuthService;
pub use billing::BillingService;
pub use business::BusinessService;
pub use offer::OfferService;
