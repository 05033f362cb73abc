//! Catalog service - service types and provider offerings.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::container::parallel;
use crate::domain::{
    CatalogEntry, CatalogError, NewService, ServiceListing, ServiceType, User, UserSummary,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Every service type with its services and their providers
    async fn list_all(&self) -> AppResult<Vec<CatalogEntry>>;

    /// Register a new service type. Names are unique.
    async fn create_service_type(
        &self,
        name: String,
        description: Option<String>,
    ) -> AppResult<ServiceType>;

    /// Publish a service offered by `provider_id`
    async fn create_service(
        &self,
        provider_id: Uuid,
        service: NewService,
    ) -> AppResult<ServiceListing>;
}

pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    async fn list_all(&self) -> AppResult<Vec<CatalogEntry>> {
        let catalog = self.uow.catalog();
        let (service_types, services) =
            parallel::join2(catalog.list_service_types(), catalog.list_services()).await?;

        let mut provider_ids: Vec<Uuid> = services.iter().map(|s| s.provider_id).collect();
        provider_ids.sort_unstable();
        provider_ids.dedup();

        let providers: HashMap<Uuid, UserSummary> = self
            .uow
            .users()
            .find_by_ids(provider_ids)
            .await?
            .iter()
            .map(|u| (u.id, u.summary()))
            .collect();

        let mut by_type: HashMap<Uuid, Vec<ServiceListing>> = HashMap::new();
        for service in services {
            match providers.get(&service.provider_id) {
                Some(provider) => by_type
                    .entry(service.service_type_id)
                    .or_default()
                    .push(ServiceListing::new(service, provider.clone())),
                None => tracing::warn!(
                    service_id = %service.id,
                    provider_id = %service.provider_id,
                    "Skipping service whose provider no longer exists"
                ),
            }
        }

        Ok(service_types
            .into_iter()
            .map(|service_type| CatalogEntry {
                services: by_type.remove(&service_type.id).unwrap_or_default(),
                id: service_type.id,
                name: service_type.name,
                description: service_type.description,
            })
            .collect())
    }

    async fn create_service_type(
        &self,
        name: String,
        description: Option<String>,
    ) -> AppResult<ServiceType> {
        let catalog = self.uow.catalog();

        if catalog.find_service_type_by_name(&name).await?.is_some() {
            return Err(CatalogError::DuplicateServiceType(name).into());
        }

        // The unique index on name covers a concurrent insert
        let service_type = catalog.create_service_type(name, description).await?;

        tracing::info!(service_type_id = %service_type.id, name = %service_type.name, "Service type created");
        Ok(service_type)
    }

    async fn create_service(
        &self,
        provider_id: Uuid,
        service: NewService,
    ) -> AppResult<ServiceListing> {
        if !service.price.is_finite() || service.price < 0.0 {
            return Err(AppError::validation("Price must be a non-negative number."));
        }

        let listing = with_transaction!(self.uow, |ctx| {
            let provider = ctx
                .users()
                .find_by_id(provider_id)
                .await?
                .filter(User::is_provider)
                .ok_or(CatalogError::ProviderNotFound)?;

            ctx.catalog()
                .find_service_type(service.service_type_id)
                .await?
                .ok_or(CatalogError::ServiceTypeNotFound)?;

            let created = ctx.catalog().create_service(provider.id, service).await?;
            Ok(ServiceListing::new(created, provider.summary()))
        })?;

        tracing::info!(service_id = %listing.id, provider_id = %provider_id, "Service created");
        Ok(listing)
    }
}
