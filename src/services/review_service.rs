//! Review service - one review per completed booking, by its client.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Booking, Rating, Review, ReviewDetails, ReviewError, ReviewedBooking, ReviewedProvider,
    ReviewedService,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{TransactionContext, UnitOfWork};
use crate::with_transaction;

#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Attach a review to a completed booking.
    async fn create(
        &self,
        author_id: Uuid,
        booking_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> AppResult<ReviewDetails>;
}

pub struct ReviewManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReviewManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReviewService for ReviewManager<U> {
    async fn create(
        &self,
        author_id: Uuid,
        booking_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> AppResult<ReviewDetails> {
        // Request validation already bounds the rating; re-check here
        let rating = Rating::try_from(rating)?;

        let details = with_transaction!(self.uow, |ctx| {
            let booking = ctx
                .bookings()
                .find_by_id(booking_id)
                .await?
                .ok_or(ReviewError::BookingNotFound)?;

            let review = Review::admit(&booking, author_id, rating, comment)?;

            if ctx.reviews().find_by_booking(booking.id).await?.is_some() {
                return Err(ReviewError::ReviewAlreadyExists.into());
            }

            // Two racing submissions both pass the check above; the unique
            // index on booking_id turns the loser into ReviewAlreadyExists.
            let review = ctx.reviews().create(review).await?;

            load_details(&ctx, review, booking).await
        })?;

        tracing::info!(
            review_id = %details.id,
            booking_id = %booking_id,
            rating = details.rating.value(),
            "Review created"
        );
        Ok(details)
    }
}

async fn load_details(
    ctx: &TransactionContext<'_>,
    review: Review,
    booking: Booking,
) -> AppResult<ReviewDetails> {
    let users = ctx
        .users()
        .find_by_ids(vec![review.author_id, booking.provider_id])
        .await?;
    let find_user = |id: Uuid| {
        users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::internal(format!("Review references missing user {}", id)))
    };
    let author = find_user(review.author_id)?.summary();
    let provider = find_user(booking.provider_id)?;

    let service = ctx
        .catalog()
        .find_service(booking.service_id)
        .await?
        .ok_or_else(|| {
            AppError::internal(format!(
                "Booking references missing service {}",
                booking.service_id
            ))
        })?;

    Ok(ReviewDetails {
        id: review.id,
        rating: review.rating,
        comment: review.comment,
        created_at: review.created_at,
        author,
        booking: ReviewedBooking {
            id: booking.id,
            status: booking.status,
            service: ReviewedService {
                id: service.id,
                title: service.title,
            },
            provider: ReviewedProvider {
                id: provider.id,
                name: provider.name.clone(),
            },
        },
    })
}
