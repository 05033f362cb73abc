//! Review queries.
//!
//! Reviews are only written inside a transaction, so there is no
//! pool-bound store for them.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::review::{self, Entity as ReviewEntity};
use crate::domain::{Review, ReviewError};
use crate::errors::{is_unique_violation, AppError, AppResult};

pub(crate) async fn find_by_booking<C: ConnectionTrait>(
    conn: &C,
    booking_id: Uuid,
) -> AppResult<Option<Review>> {
    ReviewEntity::find()
        .filter(review::Column::BookingId.eq(booking_id))
        .one(conn)
        .await?
        .map(Review::try_from)
        .transpose()
}

/// Insert a review. A second review for the same booking surfaces as
/// `ReviewAlreadyExists`, even when the pre-check raced.
pub(crate) async fn create<C: ConnectionTrait>(conn: &C, review: Review) -> AppResult<Review> {
    let active_model = review::ActiveModel {
        id: Set(review.id),
        booking_id: Set(review.booking_id),
        author_id: Set(review.author_id),
        rating: Set(review.rating.value()),
        comment: Set(review.comment),
        created_at: Set(review.created_at),
    };

    let model = active_model.insert(conn).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::from(ReviewError::ReviewAlreadyExists)
        } else {
            AppError::from(e)
        }
    })?;

    Review::try_from(model)
}
