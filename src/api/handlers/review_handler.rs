//! Review handlers.

use axum::{extract::State, http::StatusCode, response::Json, Extension};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::ReviewDetails;
use crate::errors::AppResult;

/// Review request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub booking_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: i32,
    #[schema(example = "Quick and friendly")]
    pub comment: Option<String>,
}

/// Review a completed booking
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewDetails),
        (status = 400, description = "Booking not found, not completed, not yours, or already reviewed"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not a CLIENT")
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ReviewDetails>)> {
    let comment = payload
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let review = state
        .review_service
        .create(current_user.id, payload.booking_id, payload.rating, comment)
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
