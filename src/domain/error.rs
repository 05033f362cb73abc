//! Domain-level errors.
//!
//! These errors represent business rule violations of the booking,
//! review and catalog aggregates. Messages are stable and shown to clients.

use thiserror::Error;

use super::booking::BookingStatus;
use crate::config::{MAX_RATING, MIN_RATING};
use crate::errors::ErrorKind;

/// Booking lifecycle failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Provider not found or is not a service provider.")]
    ProviderNotFound,

    #[error("Service not found.")]
    ServiceNotFound,

    #[error("Service does not belong to the specified provider.")]
    ServiceOwnershipMismatch,

    #[error("Booking not found.")]
    BookingNotFound,

    #[error("Unauthorized: You are not the provider for this booking.")]
    Unauthorized,

    #[error("Cannot change status of a completed or rejected booking.")]
    TerminalState(BookingStatus),

    #[error("Invalid status transition from {from} to {to}.")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
}

impl BookingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::ProviderNotFound
            | BookingError::ServiceNotFound
            | BookingError::BookingNotFound => ErrorKind::NotFound,
            BookingError::Unauthorized
            | BookingError::ServiceOwnershipMismatch
            | BookingError::TerminalState(_)
            | BookingError::InvalidTransition { .. } => ErrorKind::DomainRuleViolation,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BookingError::ProviderNotFound => "PROVIDER_NOT_FOUND",
            BookingError::ServiceNotFound => "SERVICE_NOT_FOUND",
            BookingError::ServiceOwnershipMismatch => "SERVICE_OWNERSHIP_MISMATCH",
            BookingError::BookingNotFound => "BOOKING_NOT_FOUND",
            BookingError::Unauthorized => "NOT_BOOKING_PROVIDER",
            BookingError::TerminalState(_) => "TERMINAL_STATE",
            BookingError::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }
}

/// Review admission failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Booking not found.")]
    BookingNotFound,

    #[error("Review can only be submitted for completed bookings.")]
    BookingNotCompleted,

    #[error("Unauthorized: Only the client who made the booking can review it.")]
    Unauthorized,

    #[error("A review for this booking already exists.")]
    ReviewAlreadyExists,

    #[error("Rating must be between {} and {}", MIN_RATING, MAX_RATING)]
    InvalidRating(i32),
}

impl ReviewError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReviewError::BookingNotFound => ErrorKind::NotFound,
            ReviewError::ReviewAlreadyExists => ErrorKind::Conflict,
            ReviewError::InvalidRating(_) => ErrorKind::Validation,
            ReviewError::BookingNotCompleted | ReviewError::Unauthorized => {
                ErrorKind::DomainRuleViolation
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ReviewError::BookingNotFound => "BOOKING_NOT_FOUND",
            ReviewError::BookingNotCompleted => "BOOKING_NOT_COMPLETED",
            ReviewError::Unauthorized => "NOT_BOOKING_CLIENT",
            ReviewError::ReviewAlreadyExists => "REVIEW_ALREADY_EXISTS",
            ReviewError::InvalidRating(_) => "INVALID_RATING",
        }
    }
}

/// Service catalog failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Service type with name '{0}' already exists.")]
    DuplicateServiceType(String),

    #[error("Service type not found.")]
    ServiceTypeNotFound,

    #[error("Provider not found or is not a service provider.")]
    ProviderNotFound,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::DuplicateServiceType(_) => ErrorKind::Conflict,
            CatalogError::ServiceTypeNotFound | CatalogError::ProviderNotFound => {
                ErrorKind::NotFound
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::DuplicateServiceType(_) => "DUPLICATE_SERVICE_TYPE",
            CatalogError::ServiceTypeNotFound => "SERVICE_TYPE_NOT_FOUND",
            CatalogError::ProviderNotFound => "PROVIDER_NOT_FOUND",
        }
    }
}
