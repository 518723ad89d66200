//! Route definitions for the Market Connect API

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Customer-facing directory (unauthenticated)
        .nest("/discovery", discovery_routes())
        // Interaction tracking (unauthenticated - fired from customer views)
        .route("/events", post(handlers::record_event))
        // Pricing catalogue (public)
        .route("/billing/plans", get(handlers::list_plans))
        // Protected routes - business profile
        .nest("/businesses", business_routes())
        // Protected routes - offer management
        .nest("/offers", offer_routes())
        // Protected routes - analytics dashboard
        .nest("/analytics", analytics_routes())
        // Protected routes - subscription activation
        .nest("/billing", billing_routes())
        // Protected routes - assistant content
        .nest("/assistant", assistant_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::sign_up))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
}

/// Customer discovery routes (public)
fn discovery_routes() -> Router<AppState> {
    Router::new()
        .route("/businesses", get(handlers::search_businesses))
        .route("/businesses/:business_id/offers", get(handlers::list_live_offers))
}

/// Business profile routes (protected)
fn business_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(handlers::get_my_business)
                .post(handlers::create_my_business)
                .put(handlers::update_my_business),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Offer management routes (protected)
fn offer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_offers).post(handlers::create_offer))
        .route(
            "/:offer_id",
            put(handlers::update_offer).delete(handlers::delete_offer),
        )
        .route("/:offer_id/toggle", post(handlers::toggle_offer))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Analytics dashboard routes (protected)
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/daily", get(handlers::get_daily_stats))
        .route("/recent", get(handlers::get_recent_activity))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Billing routes (protected)
fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/activate", post(handlers::activate_subscription))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Assistant content routes (protected)
fn assistant_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/content",
            get(handlers::get_assistant_content).put(handlers::update_assistant_content),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
