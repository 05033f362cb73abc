//! Booking service - booking creation, status transitions and listing.
//!
//! Transition rules live on the domain types; this service loads the
//! booking, asks the domain for the next status and applies it with a
//! compare-and-set update inside a transaction.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::container::parallel;
use crate::domain::{
    Booking, BookingDetails, BookingError, BookingStatus, Service, ServiceSummary, User,
    UserSummary,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{TransactionContext, UnitOfWork};
use crate::with_transaction;

#[async_trait]
pub trait BookingService: Send + Sync {
    /// Book `service_id` from `provider_id` on behalf of a client.
    /// The caller must already hold the CLIENT role.
    async fn create(
        &self,
        client_id: Uuid,
        provider_id: Uuid,
        service_id: Uuid,
    ) -> AppResult<BookingDetails>;

    /// Move a booking to `next` on behalf of its provider.
    async fn update_status(
        &self,
        booking_id: Uuid,
        next: BookingStatus,
        acting_provider_id: Uuid,
    ) -> AppResult<BookingDetails>;

    /// Bookings where the user is client or provider, newest first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<BookingDetails>>;
}

pub struct BookingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> BookingManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> BookingService for BookingManager<U> {
    async fn create(
        &self,
        client_id: Uuid,
        provider_id: Uuid,
        service_id: Uuid,
    ) -> AppResult<BookingDetails> {
        let details = with_transaction!(self.uow, |ctx| {
            let provider = ctx
                .users()
                .find_by_id(provider_id)
                .await?
                .filter(User::is_provider)
                .ok_or(BookingError::ProviderNotFound)?;

            let service = ctx
                .catalog()
                .find_service(service_id)
                .await?
                .ok_or(BookingError::ServiceNotFound)?;

            if service.provider_id != provider.id {
                return Err(BookingError::ServiceOwnershipMismatch.into());
            }

            let booking = ctx
                .bookings()
                .create(Booking::new(client_id, provider.id, service.id))
                .await?;

            load_details(&ctx, booking).await
        })?;

        tracing::info!(
            booking_id = %details.id,
            client_id = %client_id,
            provider_id = %provider_id,
            "Booking created"
        );
        Ok(details)
    }

    async fn update_status(
        &self,
        booking_id: Uuid,
        next: BookingStatus,
        acting_provider_id: Uuid,
    ) -> AppResult<BookingDetails> {
        let details = with_transaction!(self.uow, |ctx| {
            let bookings = ctx.bookings();

            let mut booking = bookings
                .find_by_id(booking_id)
                .await?
                .ok_or(BookingError::BookingNotFound)?;

            let new_status = booking.plan_transition(acting_provider_id, next)?;

            if !bookings
                .update_status(booking.id, booking.status, new_status)
                .await?
            {
                // Someone else moved the booking after we read it. Judge the
                // request against the status that won.
                let current = bookings
                    .find_by_id(booking_id)
                    .await?
                    .ok_or(BookingError::BookingNotFound)?;
                return Err(lost_race_error(current.status, next).into());
            }

            booking.status = new_status;
            load_details(&ctx, booking).await
        })?;

        tracing::info!(
            booking_id = %booking_id,
            status = %details.status,
            "Booking status updated"
        );
        Ok(details)
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<BookingDetails>> {
        let bookings = self.uow.bookings().list_for_user(user_id).await?;

        let user_ids = distinct(bookings.iter().flat_map(|b| [b.client_id, b.provider_id]));
        let service_ids = distinct(bookings.iter().map(|b| b.service_id));

        let users_repo = self.uow.users();
        let catalog_repo = self.uow.catalog();
        let (users, services) = parallel::join2(
            users_repo.find_by_ids(user_ids),
            catalog_repo.find_services_by_ids(service_ids),
        )
        .await?;

        let index = DetailsIndex::new(users, services);
        bookings
            .into_iter()
            .map(|booking| index.details(booking))
            .collect()
    }
}

async fn load_details(ctx: &TransactionContext<'_>, booking: Booking) -> AppResult<BookingDetails> {
    let users = ctx
        .users()
        .find_by_ids(vec![booking.client_id, booking.provider_id])
        .await?;
    let service = ctx
        .catalog()
        .find_service(booking.service_id)
        .await?
        .into_iter()
        .collect();

    DetailsIndex::new(users, service).details(booking)
}

/// Error for a transition whose compare-and-set lost to a concurrent
/// update that left the booking in `current`.
fn lost_race_error(current: BookingStatus, next: BookingStatus) -> BookingError {
    current
        .transition_to(next)
        .err()
        .unwrap_or(BookingError::InvalidTransition { from: current, to: next })
}

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Lookup tables for turning bookings into `BookingDetails`
struct DetailsIndex {
    users: HashMap<Uuid, UserSummary>,
    services: HashMap<Uuid, ServiceSummary>,
}

impl DetailsIndex {
    fn new(users: Vec<User>, services: Vec<Service>) -> Self {
        Self {
            users: users.iter().map(|u| (u.id, u.summary())).collect(),
            services: services.iter().map(|s| (s.id, s.summary())).collect(),
        }
    }

    fn user(&self, id: Uuid) -> AppResult<UserSummary> {
        self.users
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::internal(format!("Booking references missing user {}", id)))
    }

    fn details(&self, booking: Booking) -> AppResult<BookingDetails> {
        let service = self.services.get(&booking.service_id).cloned().ok_or_else(|| {
            AppError::internal(format!(
                "Booking references missing service {}",
                booking.service_id
            ))
        })?;

        Ok(BookingDetails {
            id: booking.id,
            status: booking.status,
            created_at: booking.created_at,
            client: self.user(booking.client_id)?,
            provider: self.user(booking.provider_id)?,
            service,
        })
    }
}
