//! Review entity and admission rule.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::booking::{Booking, BookingStatus};
use super::error::ReviewError;
use super::user::UserSummary;
use crate::config::{MAX_RATING, MIN_RATING};

/// Integer rating in `MIN_RATING..=MAX_RATING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Rating(i32);

impl Rating {
    pub fn value(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = ReviewError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(ReviewError::InvalidRating(value))
        }
    }
}

/// Review entity. At most one per booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub author_id: Uuid,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Apply the admission rule against the booking being reviewed.
    ///
    /// Uniqueness (one review per booking) needs the store and is checked
    /// by the caller.
    pub fn admit(
        booking: &Booking,
        author_id: Uuid,
        rating: Rating,
        comment: Option<String>,
    ) -> Result<Self, ReviewError> {
        if booking.status != BookingStatus::Completed {
            return Err(ReviewError::BookingNotCompleted);
        }
        if booking.client_id != author_id {
            return Err(ReviewError::Unauthorized);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            booking_id: booking.id,
            author_id,
            rating,
            comment,
            created_at: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewedService {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewedProvider {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewedBooking {
    pub id: Uuid,
    pub status: BookingStatus,
    pub service: ReviewedService,
    pub provider: ReviewedProvider,
}

/// Review enriched with author and booking/service/provider summaries
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDetails {
    pub id: Uuid,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author: UserSummary,
    pub booking: ReviewedBooking,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_booking(client_id: Uuid) -> Booking {
        let mut booking = Booking::new(client_id, Uuid::new_v4(), Uuid::new_v4());
        booking.status = BookingStatus::Completed;
        booking
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::try_from(0).is_err());
        assert_eq!(Rating::try_from(1).unwrap().value(), 1);
        assert_eq!(Rating::try_from(5).unwrap().value(), 5);
        assert_eq!(Rating::try_from(6), Err(ReviewError::InvalidRating(6)));
    }

    #[test]
    fn test_admit_requires_completed_booking() {
        let client = Uuid::new_v4();
        let mut booking = completed_booking(client);
        booking.status = BookingStatus::Accepted;

        let result = Review::admit(&booking, client, Rating::try_from(4).unwrap(), None);
        assert_eq!(result, Err(ReviewError::BookingNotCompleted));
    }

    #[test]
    fn test_admit_requires_booking_client() {
        let booking = completed_booking(Uuid::new_v4());

        let result = Review::admit(&booking, Uuid::new_v4(), Rating::try_from(4).unwrap(), None);
        assert_eq!(result, Err(ReviewError::Unauthorized));
    }

    #[test]
    fn test_admit_builds_review() {
        let client = Uuid::new_v4();
        let booking = completed_booking(client);

        let review = Review::admit(
            &booking,
            client,
            Rating::try_from(5).unwrap(),
            Some("Great job".into()),
        )
        .unwrap();

        assert_eq!(review.booking_id, booking.id);
        assert_eq!(review.author_id, client);
        assert_eq!(review.rating.value(), 5);
    }
}
