//! HTTP request handlers.

pub mod auth_handler;
pub mod booking_handler;
pub mod catalog_handler;
pub mod review_handler;

use std::borrow::Cow;

use validator::{ValidateEmail, ValidationError};

use crate::domain::BookingStatus;

/// Rejects empty and whitespace-only strings
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Email check on the value as it will be stored, surrounding whitespace removed
fn trimmed_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().validate_email() {
        return Ok(());
    }
    Err(ValidationError::new("email"))
}

fn valid_booking_status(value: &str) -> Result<(), ValidationError> {
    if value.parse::<BookingStatus>().is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("status");
    err.message = Some(Cow::Borrowed("Invalid booking status"));
    Err(err)
}
