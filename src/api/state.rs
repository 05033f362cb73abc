//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, BookingService, CatalogService, ReviewService, ServiceContainer, Services,
};

/// Application state shared by every handler.
///
/// Cloning is cheap: services are behind `Arc` and the database wrapper
/// shares one pool.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub booking_service: Arc<dyn BookingService>,
    pub review_service: Arc<dyn ReviewService>,
    pub catalog_service: Arc<dyn CatalogService>,
    /// Used by the health check
    pub database: Database,
}

impl AppState {
    /// Wire the full service container over `database`.
    pub fn from_config(database: Database, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::new(&container, database)
    }

    /// Take services from any container (real or mocked).
    pub fn new(container: &dyn ServiceContainer, database: Database) -> Self {
        Self {
            auth_service: container.auth(),
            booking_service: container.bookings(),
            review_service: container.reviews(),
            catalog_service: container.catalog(),
            database,
        }
    }
}
