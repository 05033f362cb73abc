//! Repository layer - Data access abstraction
//!
//! One trait per aggregate with a SeaORM `*Store` implementation. The
//! free query functions in each module are generic over the connection so
//! the transactional repositories in `unit_of_work` share them.

pub(crate) mod booking_repository;
pub(crate) mod catalog_repository;
pub(crate) mod entities;
pub(crate) mod review_repository;
pub(crate) mod user_repository;

#[cfg(test)]
pub(crate) mod test_db;

pub use booking_repository::{BookingRepository, BookingStore};
pub use catalog_repository::{CatalogRepository, CatalogStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use booking_repository::MockBookingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use catalog_repository::MockCatalogRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
