//! Service catalog: service types and the provider-owned services under them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserSummary;

/// A category of work (e.g. "Plumbing"). Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A concrete offering by one provider. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub provider_id: Uuid,
    pub service_type_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn summary(&self) -> ServiceSummary {
        ServiceSummary {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

/// Input for a new service offering
#[derive(Debug, Clone)]
pub struct NewService {
    pub service_type_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
}

/// Minimal service reference embedded in booking responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ServiceSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

/// Service as listed in the catalog, with its provider
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListing {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub service_type_id: Uuid,
    pub provider: UserSummary,
}

impl ServiceListing {
    pub fn new(service: Service, provider: UserSummary) -> Self {
        Self {
            id: service.id,
            title: service.title,
            description: service.description,
            price: service.price,
            service_type_id: service.service_type_id,
            provider,
        }
    }
}

/// Catalog entry: a service type with every service filed under it
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub services: Vec<ServiceListing>,
}
