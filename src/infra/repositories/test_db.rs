//! Migrated in-memory SQLite with one booking between two fresh users.

use sea_orm::DatabaseConnection;

use super::{booking_repository, catalog_repository, user_repository};
use crate::domain::{Booking, BookingStatus, NewService, NewUser, UserRole};
use crate::infra::Database;

pub(crate) async fn migrated() -> Database {
    let db = Database::connect_url("sqlite::memory:").await.unwrap();
    db.run_migrations().await.unwrap();
    db
}

pub(crate) async fn booking_with_status(
    conn: &DatabaseConnection,
    status: BookingStatus,
) -> Booking {
    let client = user_repository::create(conn, new_user("client", UserRole::Client))
        .await
        .unwrap();
    let provider = user_repository::create(conn, new_user("provider", UserRole::Provider))
        .await
        .unwrap();
    let service_type = catalog_repository::create_service_type(conn, "Plumbing".into(), None)
        .await
        .unwrap();
    let service = catalog_repository::create_service(
        conn,
        provider.id,
        NewService {
            service_type_id: service_type.id,
            title: "Leak repair".into(),
            description: None,
            price: 80.0,
        },
    )
    .await
    .unwrap();

    let booking = Booking {
        status,
        ..Booking::new(client.id, provider.id, service.id)
    };
    booking_repository::create(conn, booking).await.unwrap()
}

fn new_user(name: &str, role: UserRole) -> NewUser {
    NewUser {
        email: format!("{}@example.com", name),
        password_hash: "hash".into(),
        name: name.into(),
        role,
    }
}
