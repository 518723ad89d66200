//! WebAssembly module for the Market Connect platform
//!
//! Provides client-side computation for:
//! - Offer lifecycle evaluation and discount labels
//! - Distance calculation and display formatting
//! - Dashboard growth and relative-time labels
//! - Offline form validation

use chrono::DateTime;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Evaluate an offer's lifecycle state at an explicit instant
#[wasm_bindgen]
pub fn evaluate_offer_status(
    is_active: bool,
    start_date: &str,
    end_date: Option<String>,
    now: &str,
) -> Result<String, JsValue> {
    let now = parse_instant(now).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let status = offer_status_from_strs(is_active, start_date, end_date.as_deref(), now)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(status.to_string())
}

/// Evaluate an offer's lifecycle state at the browser clock
#[wasm_bindgen]
pub fn current_offer_status(
    is_active: bool,
    start_date: &str,
    end_date: Option<String>,
) -> Result<String, JsValue> {
    let now = DateTime::from_timestamp_millis(js_sys::Date::now() as i64)
        .ok_or_else(|| JsValue::from_str("Browser clock out of range"))?;
    let status = offer_status_from_strs(is_active, start_date, end_date.as_deref(), now)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(status.to_string())
}

/// Build the display label for an offer's discount
#[wasm_bindgen]
pub fn discount_label(percentage: Option<i32>, amount: Option<f64>) -> String {
    let amount = amount.and_then(|a| Decimal::try_from(a).ok());
    format_discount(percentage, amount)
}

/// Distance between two points in kilometers
#[wasm_bindgen]
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    Coordinates::new(lat1, lng1).distance_km(&Coordinates::new(lat2, lng2))
}

/// Format a distance for display (meters under 1km, otherwise km)
#[wasm_bindgen]
pub fn distance_text(km: f64) -> String {
    format_distance(km)
}

/// Human-readable age of a timestamp relative to a reference instant
#[wasm_bindgen]
pub fn time_ago(created_at: &str, now: &str) -> Result<String, JsValue> {
    let created_at = parse_instant(created_at).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let now = parse_instant(now).map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(relative_time_label(created_at, now))
}

/// Week-over-week growth of view counts, as a percentage
#[wasm_bindgen]
pub fn growth_percent(weekly_views: i32, previous_week_views: i32) -> f64 {
    weekly_growth_percent(i64::from(weekly_views), i64::from(previous_week_views))
}

/// Validate an offer form payload
///
/// Returns null when the draft is clean, otherwise a JSON array of
/// field errors.
#[wasm_bindgen]
pub fn validate_offer_form(draft_json: &str) -> Result<JsValue, JsValue> {
    let draft: OfferDraft = serde_json::from_str(draft_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid draft JSON: {}", e)))?;

    match validate_offer(&draft) {
        Ok(()) => Ok(JsValue::NULL),
        Err(err) => {
            let errors = serde_json::to_string(&err.errors)
                .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))?;
            Ok(JsValue::from_str(&errors))
        }
    }
}

/// Validate a business profile form payload
///
/// Returns null when the draft is clean, otherwise a JSON array of
/// field errors.
#[wasm_bindgen]
pub fn validate_business_form(draft_json: &str) -> Result<JsValue, JsValue> {
    let draft: BusinessDraft = serde_json::from_str(draft_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid draft JSON: {}", e)))?;

    match validate_business(&draft) {
        Ok(()) => Ok(JsValue::NULL),
        Err(err) => {
            let errors = serde_json::to_string(&err.errors)
                .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))?;
            Ok(JsValue::from_str(&errors))
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn validate_offer_form_reports_field_errors() {
        let draft = r#"{"title": "Hi", "start_date": "2024-01-01"}"#;
        let errors = validate_offer_form(draft).unwrap();
        assert!(errors.as_string().unwrap().contains("title"));
    }

    #[wasm_bindgen_test]
    fn validate_offer_form_accepts_clean_draft() {
        let draft =
            r#"{"title": "Summer Sale", "discount_percentage": 20, "start_date": "2024-06-01"}"#;
        let result = validate_offer_form(draft).unwrap();
        assert!(result.is_null());
    }
}
