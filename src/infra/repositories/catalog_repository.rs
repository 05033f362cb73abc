//! Catalog repository - service types and provider services.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::service::{self, Entity as ServiceEntity};
use super::entities::service_type::{self, Entity as ServiceTypeEntity};
use crate::domain::{CatalogError, NewService, Service, ServiceType};
use crate::errors::{is_unique_violation, AppError, AppResult};

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All service types ordered by name
    async fn list_service_types(&self) -> AppResult<Vec<ServiceType>>;

    async fn find_service_type(&self, id: Uuid) -> AppResult<Option<ServiceType>>;

    async fn find_service_type_by_name(&self, name: &str) -> AppResult<Option<ServiceType>>;

    /// Insert a service type. A taken name surfaces as `DuplicateServiceType`.
    async fn create_service_type(
        &self,
        name: String,
        description: Option<String>,
    ) -> AppResult<ServiceType>;

    /// All services ordered by title
    async fn list_services(&self) -> AppResult<Vec<Service>>;

    async fn find_service(&self, id: Uuid) -> AppResult<Option<Service>>;

    async fn find_services_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Service>>;

    async fn create_service(&self, provider_id: Uuid, service: NewService) -> AppResult<Service>;
}

/// SeaORM-backed catalog repository
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn list_service_types(&self) -> AppResult<Vec<ServiceType>> {
        let models = ServiceTypeEntity::find()
            .order_by_asc(service_type::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(ServiceType::from).collect())
    }

    async fn find_service_type(&self, id: Uuid) -> AppResult<Option<ServiceType>> {
        find_service_type(&self.db, id).await
    }

    async fn find_service_type_by_name(&self, name: &str) -> AppResult<Option<ServiceType>> {
        find_service_type_by_name(&self.db, name).await
    }

    async fn create_service_type(
        &self,
        name: String,
        description: Option<String>,
    ) -> AppResult<ServiceType> {
        create_service_type(&self.db, name, description).await
    }

    async fn list_services(&self) -> AppResult<Vec<Service>> {
        let models = ServiceEntity::find()
            .order_by_asc(service::Column::Title)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Service::from).collect())
    }

    async fn find_service(&self, id: Uuid) -> AppResult<Option<Service>> {
        find_service(&self.db, id).await
    }

    async fn find_services_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Service>> {
        find_services_by_ids(&self.db, ids).await
    }

    async fn create_service(&self, provider_id: Uuid, service: NewService) -> AppResult<Service> {
        create_service(&self.db, provider_id, service).await
    }
}

pub(crate) async fn find_service_type<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> AppResult<Option<ServiceType>> {
    Ok(ServiceTypeEntity::find_by_id(id)
        .one(conn)
        .await?
        .map(ServiceType::from))
}

pub(crate) async fn find_service_type_by_name<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> AppResult<Option<ServiceType>> {
    Ok(ServiceTypeEntity::find()
        .filter(service_type::Column::Name.eq(name))
        .one(conn)
        .await?
        .map(ServiceType::from))
}

pub(crate) async fn create_service_type<C: ConnectionTrait>(
    conn: &C,
    name: String,
    description: Option<String>,
) -> AppResult<ServiceType> {
    let active_model = service_type::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.clone()),
        description: Set(description),
        created_at: Set(Utc::now()),
    };

    let model = active_model.insert(conn).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::from(CatalogError::DuplicateServiceType(name))
        } else {
            AppError::from(e)
        }
    })?;

    Ok(ServiceType::from(model))
}

pub(crate) async fn find_service<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> AppResult<Option<Service>> {
    Ok(ServiceEntity::find_by_id(id)
        .one(conn)
        .await?
        .map(Service::from))
}

pub(crate) async fn find_services_by_ids<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<Uuid>,
) -> AppResult<Vec<Service>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let models = ServiceEntity::find()
        .filter(service::Column::Id.is_in(ids))
        .all(conn)
        .await?;

    Ok(models.into_iter().map(Service::from).collect())
}

pub(crate) async fn create_service<C: ConnectionTrait>(
    conn: &C,
    provider_id: Uuid,
    new_service: NewService,
) -> AppResult<Service> {
    let active_model = service::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(new_service.title),
        description: Set(new_service.description),
        price: Set(new_service.price),
        provider_id: Set(provider_id),
        service_type_id: Set(new_service.service_type_id),
        created_at: Set(Utc::now()),
    };

    let model = active_model.insert(conn).await?;
    Ok(Service::from(model))
}
