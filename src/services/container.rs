//! Service Container - Centralized service access.
//!
//! Builds every application service over one shared `Persistence` and one
//! `TokenService`, and hands them out as trait objects.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, BookingManager, BookingService, CatalogManager, CatalogService,
    ReviewManager, ReviewService, TokenService,
};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn bookings(&self) -> Arc<dyn BookingService>;

    fn reviews(&self) -> Arc<dyn ReviewService>;

    fn catalog(&self) -> Arc<dyn CatalogService>;

    fn tokens(&self) -> Arc<TokenService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    booking_service: Arc<dyn BookingService>,
    review_service: Arc<dyn ReviewService>,
    catalog_service: Arc<dyn CatalogService>,
    token_service: Arc<TokenService>,
}

impl Services {
    /// Wire every service over a database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let tokens = Arc::new(TokenService::new(config));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), tokens.clone())),
            booking_service: Arc::new(BookingManager::new(uow.clone())),
            review_service: Arc::new(ReviewManager::new(uow.clone())),
            catalog_service: Arc::new(CatalogManager::new(uow)),
            token_service: tokens,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingService> {
        self.booking_service.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.review_service.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    fn tokens(&self) -> Arc<TokenService> {
        self.token_service.clone()
    }
}

/// Run independent store reads concurrently.
pub mod parallel {
    use std::future::Future;

    use crate::errors::AppResult;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// Returns as soon as either fails.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }
}
