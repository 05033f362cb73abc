//! Domain layer - Core business entities and rules
//!
//! Users, the service catalog, the booking state machine and the review
//! admission rule. Nothing here touches the database or HTTP.

pub mod booking;
pub mod catalog;
pub mod error;
pub mod password;
pub mod review;
pub mod user;

pub use booking::{Booking, BookingDetails, BookingStatus};
pub use catalog::{CatalogEntry, NewService, Service, ServiceListing, ServiceSummary, ServiceType};
pub use error::{BookingError, CatalogError, ReviewError};
pub use password::Password;
pub use review::{Rating, Review, ReviewDetails, ReviewedBooking, ReviewedProvider, ReviewedService};
pub use user::{NewUser, User, UserResponse, UserRole, UserSummary};
