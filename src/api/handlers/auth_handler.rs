//! Authentication handlers: signup, login, profile and token refresh.

use axum::{extract::State, http::StatusCode, response::Json, Extension};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{not_blank, trimmed_email};
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{User, UserResponse, UserRole};
use crate::errors::AppResult;
use crate::services::{AuthSession, Registration, TokenResponse};

/// Signup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    /// Display name
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[validate(custom(function = "trimmed_email", message = "Invalid email address"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Defaults to CLIENT
    pub role: Option<UserRole>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(custom(function = "trimmed_email", message = "Invalid email address"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// User as returned next to a token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Signup and login response
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = "Login successful.")]
    pub message: String,
    #[serde(flatten)]
    pub token: TokenResponse,
    pub user: AuthUser,
}

impl AuthResponse {
    fn new(message: &str, session: AuthSession) -> Self {
        Self {
            message: message.to_string(),
            token: session.token,
            user: AuthUser::from(session.user),
        }
    }
}

/// Create an account
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let session = state
        .auth_service
        .register(Registration {
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_string(),
            password: payload.password,
            role: payload.role.unwrap_or_default(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new("Signup successful.", session)),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let session = state
        .auth_service
        .login(payload.email.trim().to_string(), payload.password)
        .await?;

    Ok(Json(AuthResponse::new("Login successful.", session)))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile of the caller", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.auth_service.profile(current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Exchange a valid token for a fresh one
#[utoipa::path(
    post,
    path = "/token/refresh",
    tag = "Authentication",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Token expired or invalid")
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.auth_service.refresh_token(&payload.refresh_token)?;
    Ok(Json(token))
}
