//! Booking handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::valid_booking_status;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{BookingDetails, BookingStatus};
use crate::errors::{AppError, AppResult};

/// Booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub provider_id: Uuid,
    pub service_id: Uuid,
}

/// Status change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingStatusRequest {
    /// Target status
    #[validate(custom(function = "valid_booking_status"))]
    #[schema(example = "ACCEPTED")]
    pub status: String,
}

/// Book a service
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created in PENDING", body = BookingDetails),
        (status = 400, description = "Provider or service not found, or service not offered by provider"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not a CLIENT")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let booking = state
        .booking_service
        .create(current_user.id, payload.provider_id, payload.service_id)
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Bookings the caller takes part in, newest first
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bookings where the caller is client or provider", body = [BookingDetails]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.booking_service.list_for_user(current_user.id).await?;
    Ok(Json(bookings))
}

/// Move a booking through its lifecycle
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Booking updated", body = BookingDetails),
        (status = 400, description = "Invalid transition, terminal state, not found or not the booking's provider"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not a PROVIDER")
    )
)]
pub async fn update_booking_status(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBookingStatusRequest>,
) -> AppResult<Json<BookingDetails>> {
    let status: BookingStatus = payload
        .status
        .parse()
        .map_err(|_| AppError::validation("Invalid booking status"))?;

    let booking = state
        .booking_service
        .update_status(id, status, current_user.id)
        .await?;

    Ok(Json(booking))
}
