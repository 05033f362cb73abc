//! Unit of Work: repository access plus transaction management.
//!
//! Check-then-write sequences (booking creation, status transitions,
//! review admission, service creation) run inside `transaction` so their
//! reads and the write see one consistent snapshot.

use async_trait::async_trait;
use futures::future::BoxFuture;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction,
    IsolationLevel, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::{
    booking_repository, catalog_repository, review_repository, user_repository,
    BookingRepository, BookingStore, CatalogRepository, CatalogStore, UserRepository, UserStore,
};
use crate::domain::{Booking, BookingStatus, NewService, Review, Service, ServiceType, User};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because `transaction` is generic. Unit tests supply
/// a small hand-written implementation over the repository mocks.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn catalog(&self) -> Arc<dyn CatalogRepository>;

    fn bookings(&self) -> Arc<dyn BookingRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed when the closure returns `Ok`, rolled back otherwise.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> BoxFuture<'a, AppResult<T>> + Send,
        T: Send;
}

/// Repository access bound to one open transaction.
///
/// Everything inside a transaction must go through this context: the pool
/// may hold a single connection, which the transaction already owns.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn catalog(&self) -> TxCatalogRepository<'_> {
        TxCatalogRepository { txn: self.txn }
    }

    pub fn bookings(&self) -> TxBookingRepository<'_> {
        TxBookingRepository { txn: self.txn }
    }

    pub fn reviews(&self) -> TxReviewRepository<'_> {
        TxReviewRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    catalog_repo: Arc<CatalogStore>,
    booking_repo: Arc<BookingStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            catalog_repo: Arc::new(CatalogStore::new(db.clone())),
            booking_repo: Arc::new(BookingStore::new(db.clone())),
            db,
        }
    }

    async fn begin(&self) -> AppResult<DatabaseTransaction> {
        // SQLite has no per-transaction isolation or access mode
        let txn = match self.db.get_database_backend() {
            DatabaseBackend::Sqlite => self.db.begin().await?,
            _ => {
                self.db
                    .begin_with_config(
                        Some(IsolationLevel::ReadCommitted),
                        Some(AccessMode::ReadWrite),
                    )
                    .await?
            }
        };
        Ok(txn)
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog_repo.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.booking_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> BoxFuture<'a, AppResult<T>> + Send,
        T: Send,
    {
        let txn = self.begin().await?;
        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// User repository bound to a transaction
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        user_repository::find_by_id(self.txn, id).await
    }

    pub async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
        user_repository::find_by_ids(self.txn, ids).await
    }
}

/// Catalog repository bound to a transaction
pub struct TxCatalogRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCatalogRepository<'a> {
    pub async fn find_service(&self, id: Uuid) -> AppResult<Option<Service>> {
        catalog_repository::find_service(self.txn, id).await
    }

    pub async fn find_service_type(&self, id: Uuid) -> AppResult<Option<ServiceType>> {
        catalog_repository::find_service_type(self.txn, id).await
    }

    pub async fn create_service(
        &self,
        provider_id: Uuid,
        service: NewService,
    ) -> AppResult<Service> {
        catalog_repository::create_service(self.txn, provider_id, service).await
    }
}

/// Booking repository bound to a transaction
pub struct TxBookingRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxBookingRepository<'a> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        booking_repository::find_by_id(self.txn, id).await
    }

    pub async fn create(&self, booking: Booking) -> AppResult<Booking> {
        booking_repository::create(self.txn, booking).await
    }

    /// Compare-and-set status update; `false` means the stored status moved.
    pub async fn update_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> AppResult<bool> {
        booking_repository::update_status(self.txn, id, expected, next).await
    }
}

/// Review repository bound to a transaction
pub struct TxReviewRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxReviewRepository<'a> {
    pub async fn find_by_booking(&self, booking_id: Uuid) -> AppResult<Option<Review>> {
        review_repository::find_by_booking(self.txn, booking_id).await
    }

    pub async fn create(&self, review: Review) -> AppResult<Review> {
        review_repository::create(self.txn, review).await
    }
}

/// Run a block inside `UnitOfWork::transaction`.
///
/// ```ignore
/// let booking = with_transaction!(uow, |ctx| {
///     ctx.bookings().find_by_id(id).await
/// })?;
/// ```
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
