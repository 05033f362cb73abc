//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain rules and repositories. Each is a trait with
//! one `*Manager` (or `Authenticator`) implementation generic over the
//! Unit of Work.

mod auth_service;
mod booking_service;
mod catalog_service;
pub mod container;
mod review_service;
mod token_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use container::{parallel, ServiceContainer, Services};

pub use auth_service::{AuthService, AuthSession, Authenticator, Registration};
pub use booking_service::{BookingManager, BookingService};
pub use catalog_service::{CatalogManager, CatalogService};
pub use review_service::{ReviewManager, ReviewService};
pub use token_service::{Claims, TokenResponse, TokenService, TokenSubject};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
