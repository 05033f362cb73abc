//! Hand-written `UnitOfWork` over repository mocks for service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::errors::{AppError, AppResult};
use crate::infra::{
    BookingRepository, CatalogRepository, MockBookingRepository, MockCatalogRepository,
    MockUserRepository, TransactionContext, UnitOfWork, UserRepository,
};

/// Each repository defaults to a mock with no expectations, so any
/// unexpected call fails the test.
#[derive(Default)]
pub(crate) struct TestUnitOfWork {
    pub users: MockUserRepository,
    pub catalog: MockCatalogRepository,
    pub bookings: MockBookingRepository,
}

impl TestUnitOfWork {
    pub fn build(self) -> Arc<MockedUnitOfWork> {
        Arc::new(MockedUnitOfWork {
            users: Arc::new(self.users),
            catalog: Arc::new(self.catalog),
            bookings: Arc::new(self.bookings),
        })
    }
}

pub(crate) struct MockedUnitOfWork {
    users: Arc<MockUserRepository>,
    catalog: Arc<MockCatalogRepository>,
    bookings: Arc<MockBookingRepository>,
}

#[async_trait]
impl UnitOfWork for MockedUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.bookings.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> BoxFuture<'a, AppResult<T>> + Send,
        T: Send,
    {
        // Transactional paths are covered by the SQLite integration tests
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}
