//! User repository - account persistence.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::EMAIL_IN_USE_MESSAGE;
use crate::domain::{NewUser, User};
use crate::errors::{is_unique_violation, AppError, AppResult};

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Batch lookup; missing IDs are simply absent from the result
    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>>;

    /// Insert a new user. A taken email surfaces as `Conflict`.
    async fn create(&self, user: NewUser) -> AppResult<User>;
}

/// SeaORM-backed user repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        find_by_id(&self.db, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        find_by_email(&self.db, email).await
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
        find_by_ids(&self.db, ids).await
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        create(&self.db, user).await
    }
}

// Queries shared by the store and the transactional repositories.

pub(crate) async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<User>> {
    UserEntity::find_by_id(id)
        .one(conn)
        .await?
        .map(User::try_from)
        .transpose()
}

pub(crate) async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> AppResult<Option<User>> {
    UserEntity::find()
        .filter(user::Column::Email.eq(email))
        .one(conn)
        .await?
        .map(User::try_from)
        .transpose()
}

pub(crate) async fn find_by_ids<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<Uuid>,
) -> AppResult<Vec<User>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    UserEntity::find()
        .filter(user::Column::Id.is_in(ids))
        .all(conn)
        .await?
        .into_iter()
        .map(User::try_from)
        .collect()
}

pub(crate) async fn create<C: ConnectionTrait>(conn: &C, new_user: NewUser) -> AppResult<User> {
    let active_model = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(new_user.email),
        password_hash: Set(new_user.password_hash),
        name: Set(new_user.name),
        role: Set(new_user.role.to_string()),
        created_at: Set(Utc::now()),
    };

    let model = active_model.insert(conn).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::conflict(EMAIL_IN_USE_MESSAGE)
        } else {
            AppError::from(e)
        }
    })?;

    User::try_from(model)
}
