//! Form validation for the Market Connect platform
//!
//! Each form-level validator checks every field and reports all violations
//! at once, one message per field, so the UI can annotate the whole form
//! in a single pass.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{parse_instant, WeeklyHours};

/// A single violated field with its message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// One or more form fields failed validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation failed for {} field(s)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn push(errors: &mut Vec<FieldError>, field: &str, message: &str) {
    errors.push(FieldError {
        field: field.to_string(),
        message: message.to_string(),
    });
}

fn finish(errors: Vec<FieldError>) -> Result<(), ValidationError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ============================================================================
// Offer Validations
// ============================================================================

/// Offer form fields as submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub discount_percentage: Option<i32>,
    #[serde(default)]
    pub discount_amount: Option<Decimal>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Validate an offer form
///
/// The two discount styles are mutually exclusive but both may be
/// omitted. Dates must parse, yet no ordering between start and end is
/// enforced; the form has always accepted an end before the start.
pub fn validate_offer(draft: &OfferDraft) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    let title = draft.title.trim();
    if title.chars().count() < 3 {
        push(&mut errors, "title", "Title must be at least 3 characters");
    } else if title.chars().count() > 100 {
        push(&mut errors, "title", "Title must be less than 100 characters");
    }

    if let Some(description) = non_empty(draft.description.as_deref()) {
        if description.chars().count() > 500 {
            push(
                &mut errors,
                "description",
                "Description must be less than 500 characters",
            );
        }
    }

    if draft.discount_percentage.is_some() && draft.discount_amount.is_some() {
        push(
            &mut errors,
            "discount",
            "Choose either a percentage or an amount discount, not both",
        );
    }
    if let Some(percentage) = draft.discount_percentage {
        if !(1..=100).contains(&percentage) {
            push(
                &mut errors,
                "discount_percentage",
                "Percentage must be between 1 and 100",
            );
        }
    }
    if let Some(amount) = draft.discount_amount {
        if amount < Decimal::new(1, 2) {
            push(
                &mut errors,
                "discount_amount",
                "Amount must be at least 0.01",
            );
        }
    }

    if draft.start_date.trim().is_empty() {
        push(&mut errors, "start_date", "Start date is required");
    } else if parse_instant(draft.start_date.trim()).is_err() {
        push(&mut errors, "start_date", "Start date is not a valid date");
    }
    if let Some(end) = non_empty(draft.end_date.as_deref()) {
        if parse_instant(end).is_err() {
            push(&mut errors, "end_date", "End date is not a valid date");
        }
    }

    finish(errors)
}

// ============================================================================
// Business Profile Validations
// ============================================================================

/// Categories a business may list under
pub const BUSINESS_CATEGORIES: &[&str] = &[
    "Restaurant",
    "Cafe",
    "Retail",
    "Electronics",
    "Grocery",
    "Health & Beauty",
    "Services",
    "Fashion",
    "Automotive",
    "Other",
];

/// Business profile form fields as submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub hours: WeeklyHours,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Validate a business profile form
pub fn validate_business(draft: &BusinessDraft) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    let name = draft.name.trim();
    if name.chars().count() < 2 {
        push(&mut errors, "name", "Business name must be at least 2 characters");
    } else if name.chars().count() > 100 {
        push(&mut errors, "name", "Business name must be less than 100 characters");
    }

    if let Some(description) = non_empty(draft.description.as_deref()) {
        if description.chars().count() > 500 {
            push(
                &mut errors,
                "description",
                "Description must be less than 500 characters",
            );
        }
    }

    if !BUSINESS_CATEGORIES.contains(&draft.category.trim()) {
        push(&mut errors, "category", "Please select a valid category");
    }

    let address = draft.address.trim();
    if address.chars().count() < 5 {
        push(&mut errors, "address", "Address must be at least 5 characters");
    } else if address.chars().count() > 200 {
        push(&mut errors, "address", "Address must be less than 200 characters");
    }

    if let Some(phone) = non_empty(draft.phone.as_deref()) {
        if phone.chars().count() > 20 {
            push(&mut errors, "phone", "Phone must be less than 20 characters");
        }
    }

    if let Some(email) = non_empty(draft.email.as_deref()) {
        if email.chars().count() > 255 || !validator::validate_email(email) {
            push(&mut errors, "email", "Please enter a valid email address");
        }
    }

    if let Some(website) = non_empty(draft.website.as_deref()) {
        if website.chars().count() > 255 || !validator::validate_url(website) {
            push(&mut errors, "website", "Please enter a valid URL");
        }
    }

    let hours_fields = [
        ("hours_monday", &draft.hours.monday),
        ("hours_tuesday", &draft.hours.tuesday),
        ("hours_wednesday", &draft.hours.wednesday),
        ("hours_thursday", &draft.hours.thursday),
        ("hours_friday", &draft.hours.friday),
        ("hours_saturday", &draft.hours.saturday),
        ("hours_sunday", &draft.hours.sunday),
    ];
    for (field, value) in hours_fields {
        if let Some(hours) = non_empty(value.as_deref()) {
            if hours.chars().count() > 50 {
                push(&mut errors, field, "Hours must be less than 50 characters");
            }
        }
    }

    if let Some(latitude) = draft.latitude {
        if !(-90.0..=90.0).contains(&latitude) {
            push(&mut errors, "latitude", "Latitude must be between -90 and 90");
        }
    }
    if let Some(longitude) = draft.longitude {
        if !(-180.0..=180.0).contains(&longitude) {
            push(&mut errors, "longitude", "Longitude must be between -180 and 180");
        }
    }

    finish(errors)
}

// ============================================================================
// Account Validations
// ============================================================================

/// Sign-up form fields as submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpDraft {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Sign-in form fields as submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInDraft {
    pub email: String,
    pub password: String,
}

/// Validate a sign-up form
pub fn validate_signup(draft: &SignUpDraft) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    let full_name = draft.full_name.trim();
    if full_name.chars().count() < 2 {
        push(&mut errors, "full_name", "Name must be at least 2 characters");
    } else if full_name.chars().count() > 100 {
        push(&mut errors, "full_name", "Name must be less than 100 characters");
    }

    validate_account_email(&mut errors, &draft.email);

    let password_len = draft.password.chars().count();
    if password_len < 6 {
        push(&mut errors, "password", "Password must be at least 6 characters");
    } else if password_len > 128 {
        push(&mut errors, "password", "Password must be less than 128 characters");
    }

    finish(errors)
}

/// Validate a sign-in form
pub fn validate_signin(draft: &SignInDraft) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    validate_account_email(&mut errors, &draft.email);

    let password_len = draft.password.chars().count();
    if password_len == 0 {
        push(&mut errors, "password", "Password is required");
    } else if password_len > 128 {
        push(&mut errors, "password", "Password must be less than 128 characters");
    }

    finish(errors)
}

fn validate_account_email(errors: &mut Vec<FieldError>, email: &str) {
    let email = email.trim();
    if email.is_empty() {
        push(errors, "email", "Email is required");
    } else if email.chars().count() > 255 || !validator::validate_email(email) {
        push(errors, "email", "Please enter a valid email address");
    }
}

// ============================================================================
// Payment Validations
// ============================================================================

/// Card details as entered in the payment form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    pub cardholder_name: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

/// Validate card details before submitting a charge
///
/// Card numbers accept embedded spaces; only the digits count.
pub fn validate_card_details(card: &CardDetails) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if card.cardholder_name.trim().is_empty() {
        push(&mut errors, "cardholder_name", "Cardholder name is required");
    }

    let digits: String = card
        .card_number
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if !(13..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        push(&mut errors, "card_number", "Card number must be 13-19 digits");
    }

    if !is_valid_expiry(card.expiry.trim()) {
        push(&mut errors, "expiry", "Expiry date must be in MM/YY format");
    }

    let cvv = card.cvv.trim();
    if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
        push(&mut errors, "cvv", "CVV must be 3 or 4 digits");
    }

    finish(errors)
}

/// Check `MM/YY` format with a month between 01 and 12
fn is_valid_expiry(expiry: &str) -> bool {
    let parts: Vec<&str> = expiry.split('/').collect();
    if parts.len() != 2 {
        return false;
    }
    let (month, year) = (parts[0], parts[1]);
    if month.len() != 2 || year.len() != 2 {
        return false;
    }
    if !month.chars().all(|c| c.is_ascii_digit()) || !year.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u32>(), Ok(m) if (1..=12).contains(&m))
}
