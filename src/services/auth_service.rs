//! Authentication service - signup, login, profile and token refresh.
//!
//! Password hashing is delegated to the domain `Password` value object;
//! token work to the shared `TokenService`.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;
use uuid::Uuid;

use super::token_service::{Claims, TokenResponse, TokenService, TokenSubject};
use crate::config::EMAIL_IN_USE_MESSAGE;
use crate::domain::{NewUser, Password, User, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Verified against when the email is unknown, so a miss costs the same
/// hashing time as a wrong password.
static DUMMY_PASSWORD: Lazy<Option<Password>> =
    Lazy::new(|| Password::new("timing-equalizer-password").ok());

/// Signup input after request validation
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Authenticated user plus a fresh token
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: TokenResponse,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and sign the new user in
    async fn register(&self, registration: Registration) -> AppResult<AuthSession>;

    /// Check credentials and issue a token
    async fn login(&self, email: String, password: String) -> AppResult<AuthSession>;

    /// Load the caller's own profile
    async fn profile(&self, user_id: Uuid) -> AppResult<User>;

    /// Exchange a still-valid token for one with a later expiry
    fn refresh_token(&self, token: &str) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { uow, tokens }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, registration: Registration) -> AppResult<AuthSession> {
        let users = self.uow.users();

        if users.find_by_email(&registration.email).await?.is_some() {
            return Err(AppError::conflict(EMAIL_IN_USE_MESSAGE));
        }

        let password = Password::new_async(registration.password).await?;

        // A concurrent signup for the same email loses at the unique index
        let user = users
            .create(NewUser {
                email: registration.email,
                password_hash: password.into_string(),
                name: registration.name,
                role: registration.role,
            })
            .await?;

        let token = self.tokens.issue(&TokenSubject::from(&user))?;
        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(AuthSession { user, token })
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthSession> {
        let user = self.uow.users().find_by_email(&email).await?;

        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => (*DUMMY_PASSWORD)
                .clone()
                .unwrap_or_else(|| Password::from_hash(String::new())),
        };
        let password_valid = stored.verify_async(password).await;

        match user {
            Some(user) if password_valid => {
                let token = self.tokens.issue(&TokenSubject::from(&user))?;
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(AuthSession { user, token })
            }
            _ => {
                tracing::warn!("Failed login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    async fn profile(&self, user_id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User")
    }

    fn refresh_token(&self, token: &str) -> AppResult<TokenResponse> {
        self.tokens.refresh(token)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        Ok(self.tokens.verify(token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::errors::TokenError;
    use crate::services::test_support::TestUnitOfWork;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn tokens() -> Arc<TokenService> {
        let config =
            Config::new("sqlite::memory:", "unit-test-secret-key-at-least-32-bytes", 1).unwrap();
        Arc::new(TokenService::new(&config))
    }

    fn stored_user(email: &str, plain_password: &str, role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: Password::new(plain_password).unwrap().into_string(),
            name: "Stored User".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    fn registration(email: &str) -> Registration {
        Registration {
            name: "New User".into(),
            email: email.into(),
            password: "password123".into(),
            role: UserRole::Provider,
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let mut uow = TestUnitOfWork::default();
        uow.users
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .returning(|email| Ok(Some(stored_user(email, "password123", UserRole::Client))));
        uow.users.expect_create().never();

        let service = Authenticator::new(uow.build(), tokens());
        let result = service.register(registration("a@x.com")).await;

        match result {
            Err(AppError::Conflict(message)) => {
                assert!(message.contains("email address is already in use"))
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_issues_token() {
        let mut uow = TestUnitOfWork::default();
        uow.users.expect_find_by_email().returning(|_| Ok(None));
        uow.users
            .expect_create()
            .withf(|new_user| {
                new_user.password_hash != "password123"
                    && Password::from_hash(new_user.password_hash.clone()).verify("password123")
            })
            .returning(|new_user| {
                Ok(User {
                    id: Uuid::new_v4(),
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    name: new_user.name,
                    role: new_user.role,
                    created_at: Utc::now(),
                })
            });

        let tokens = tokens();
        let service = Authenticator::new(uow.build(), tokens.clone());
        let session = service.register(registration("new@x.com")).await.unwrap();

        let claims = tokens.verify(&session.token.token).unwrap();
        assert_eq!(claims.user_id, session.user.id);
        assert_eq!(claims.role, UserRole::Provider);
        assert_eq!(claims.email, "new@x.com");
    }

    #[tokio::test]
    async fn test_login_success() {
        let user = stored_user("login@x.com", "correct-horse", UserRole::Client);
        let expected_id = user.id;

        let mut uow = TestUnitOfWork::default();
        uow.users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = Authenticator::new(uow.build(), tokens());
        let session = service
            .login("login@x.com".into(), "correct-horse".into())
            .await
            .unwrap();

        assert_eq!(session.user.id, expected_id);
        assert_eq!(session.token.token_type, "Bearer");
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_email_look_the_same() {
        let user = stored_user("login@x.com", "correct-horse", UserRole::Client);

        let mut uow = TestUnitOfWork::default();
        uow.users
            .expect_find_by_email()
            .withf(|email| email == "login@x.com")
            .returning(move |_| Ok(Some(user.clone())));
        uow.users
            .expect_find_by_email()
            .withf(|email| email == "nobody@x.com")
            .returning(|_| Ok(None));

        let service = Authenticator::new(uow.build(), tokens());

        let wrong_password = service
            .login("login@x.com".into(), "battery-staple".into())
            .await;
        let unknown_email = service
            .login("nobody@x.com".into(), "correct-horse".into())
            .await;

        assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_profile_not_found() {
        let missing = Uuid::new_v4();
        let mut uow = TestUnitOfWork::default();
        uow.users
            .expect_find_by_id()
            .with(eq(missing))
            .returning(|_| Ok(None));

        let service = Authenticator::new(uow.build(), tokens());

        assert!(matches!(
            service.profile(missing).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_verify_token_maps_token_errors() {
        let service = Authenticator::new(TestUnitOfWork::default().build(), tokens());

        assert!(matches!(
            service.verify_token("garbage"),
            Err(AppError::Token(TokenError::Malformed))
        ));
    }
}
