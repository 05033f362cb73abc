//! Booking repository.
//!
//! Status changes go through a compare-and-set update so two racing
//! transitions cannot both apply.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::booking::{self, Entity as BookingEntity};
use crate::domain::{Booking, BookingStatus};
use crate::errors::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Bookings where the user is client or provider, newest first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>>;
}

/// SeaORM-backed booking repository
pub struct BookingStore {
    db: DatabaseConnection,
}

impl BookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingRepository for BookingStore {
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>> {
        BookingEntity::find()
            .filter(
                Condition::any()
                    .add(booking::Column::ClientId.eq(user_id))
                    .add(booking::Column::ProviderId.eq(user_id)),
            )
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Booking::try_from)
            .collect()
    }
}

pub(crate) async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> AppResult<Option<Booking>> {
    BookingEntity::find_by_id(id)
        .one(conn)
        .await?
        .map(Booking::try_from)
        .transpose()
}

pub(crate) async fn create<C: ConnectionTrait>(conn: &C, booking: Booking) -> AppResult<Booking> {
    let active_model = booking::ActiveModel {
        id: Set(booking.id),
        client_id: Set(booking.client_id),
        provider_id: Set(booking.provider_id),
        service_id: Set(booking.service_id),
        status: Set(booking.status.to_string()),
        created_at: Set(booking.created_at),
    };

    let model = active_model.insert(conn).await?;
    Booking::try_from(model)
}

/// Set `next` only if the stored status still equals `expected`.
/// Returns whether a row was updated.
pub(crate) async fn update_status<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    expected: BookingStatus,
    next: BookingStatus,
) -> AppResult<bool> {
    let result = BookingEntity::update_many()
        .col_expr(booking::Column::Status, Expr::value(next.as_str()))
        .filter(booking::Column::Id.eq(id))
        .filter(booking::Column::Status.eq(expected.as_str()))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::test_db;

    #[tokio::test]
    async fn test_update_status_requires_expected_status() {
        let db = test_db::migrated().await;
        let conn = db.connection();
        let booking = test_db::booking_with_status(conn, BookingStatus::Pending).await;

        // Stale expectation: the row is still PENDING
        let applied = update_status(
            conn,
            booking.id,
            BookingStatus::Accepted,
            BookingStatus::Completed,
        )
        .await
        .unwrap();
        assert!(!applied);
        let stored = find_by_id(conn, booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Pending);

        let applied = update_status(
            conn,
            booking.id,
            BookingStatus::Pending,
            BookingStatus::Accepted,
        )
        .await
        .unwrap();
        assert!(applied);
        let stored = find_by_id(conn, booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Accepted);
    }

    #[tokio::test]
    async fn test_update_status_second_writer_loses() {
        let db = test_db::migrated().await;
        let conn = db.connection();
        let booking = test_db::booking_with_status(conn, BookingStatus::Pending).await;

        // Both writers observed PENDING; only the first applies
        let accepted = update_status(
            conn,
            booking.id,
            BookingStatus::Pending,
            BookingStatus::Accepted,
        )
        .await
        .unwrap();
        let rejected = update_status(
            conn,
            booking.id,
            BookingStatus::Pending,
            BookingStatus::Rejected,
        )
        .await
        .unwrap();

        assert!(accepted);
        assert!(!rejected);
        let stored = find_by_id(conn, booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Accepted);
    }

    #[tokio::test]
    async fn test_list_for_user_covers_both_parties() {
        let db = test_db::migrated().await;
        let conn = db.connection();
        let booking = test_db::booking_with_status(conn, BookingStatus::Pending).await;
        let store = BookingStore::new(db.get_connection());

        let for_client = store.list_for_user(booking.client_id).await.unwrap();
        let for_provider = store.list_for_user(booking.provider_id).await.unwrap();
        let for_stranger = store.list_for_user(Uuid::new_v4()).await.unwrap();

        assert_eq!(for_client.len(), 1);
        assert_eq!(for_provider.len(), 1);
        assert!(for_stranger.is_empty());
    }
}
