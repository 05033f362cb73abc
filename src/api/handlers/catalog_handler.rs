//! Service catalog handlers.

use axum::{extract::State, http::StatusCode, response::Json, Extension};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::not_blank;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CatalogEntry, NewService, ServiceListing, ServiceType};
use crate::errors::AppResult;

/// New service type
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceTypeRequest {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    #[schema(example = "Plumbing")]
    pub name: String,
    pub description: Option<String>,
}

/// New service offering
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub service_type_id: Uuid,
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    #[schema(example = "Leak repair")]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be a non-negative number."))]
    #[schema(example = 80.0)]
    pub price: f64,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Full catalog: service types with their services and providers
#[utoipa::path(
    get,
    path = "/services",
    tag = "Services",
    responses(
        (status = 200, description = "Catalog", body = [CatalogEntry])
    )
)]
pub async fn list_catalog(State(state): State<AppState>) -> AppResult<Json<Vec<CatalogEntry>>> {
    let catalog = state.catalog_service.list_all().await?;
    Ok(Json(catalog))
}

/// Create a service type
#[utoipa::path(
    post,
    path = "/services",
    tag = "Services",
    security(("bearer_auth" = [])),
    request_body = CreateServiceTypeRequest,
    responses(
        (status = 201, description = "Service type created", body = ServiceType),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an ADMIN"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_service_type(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateServiceTypeRequest>,
) -> AppResult<(StatusCode, Json<ServiceType>)> {
    let service_type = state
        .catalog_service
        .create_service_type(payload.name.trim().to_string(), trimmed(payload.description))
        .await?;

    Ok((StatusCode::CREATED, Json(service_type)))
}

/// Publish a service as the calling provider
#[utoipa::path(
    post,
    path = "/services/offerings",
    tag = "Services",
    security(("bearer_auth" = [])),
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ServiceListing),
        (status = 400, description = "Validation error or unknown service type"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not a PROVIDER")
    )
)]
pub async fn create_service(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<ServiceListing>)> {
    let listing = state
        .catalog_service
        .create_service(
            current_user.id,
            NewService {
                service_type_id: payload.service_type_id,
                title: payload.title.trim().to_string(),
                description: trimmed(payload.description),
                price: payload.price,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(listing)))
}
