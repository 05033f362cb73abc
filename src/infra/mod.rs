//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and health ping
//! - Repositories over SeaORM
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    BookingRepository, BookingStore, CatalogRepository, CatalogStore, UserRepository, UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxBookingRepository, TxCatalogRepository,
    TxReviewRepository, TxUserRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockBookingRepository, MockCatalogRepository, MockUserRepository};
