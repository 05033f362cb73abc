//! Authentication and role gate.
//!
//! Two middleware stages composed in the router:
//! `authenticate` verifies the bearer token and attaches a `CurrentUser`;
//! `authorize` compares that identity against the role a route requires.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::domain::UserRole;
use crate::errors::AppError;

/// Authenticated identity extracted from the JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

/// Token verification stage.
///
/// A missing header is `MissingToken`; any verification failure is returned
/// with the token service's own failure kind.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or(AppError::MissingToken)?;

    let claims = state.auth_service.verify_token(token).map_err(|e| {
        tracing::warn!(error = %e, path = %request.uri().path(), "Rejected bearer token");
        e
    })?;

    request.extensions_mut().insert(CurrentUser {
        id: claims.user_id,
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Role stage. Layer with `from_fn_with_state(role, authorize)` inside
/// `authenticate`.
pub async fn authorize(
    State(required): State<UserRole>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = request.extensions().get::<CurrentUser>();
    if let Err(e) = authorize_role(identity, Some(required)) {
        tracing::warn!(
            user_id = ?identity.map(|u| u.id),
            required = %required,
            "Role check failed"
        );
        return Err(e);
    }
    Ok(next.run(request).await)
}

/// Gate decision: no identity is unauthenticated, a role mismatch is
/// forbidden. `None` admits any authenticated user.
pub fn authorize_role(
    identity: Option<&CurrentUser>,
    required: Option<UserRole>,
) -> Result<(), AppError> {
    let identity = identity.ok_or(AppError::MissingToken)?;

    match required {
        Some(role) if role != identity.role => Err(AppError::Forbidden),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "gate@example.com".into(),
            role,
        }
    }

    #[test]
    fn test_missing_identity_is_unauthenticated() {
        assert!(matches!(
            authorize_role(None, None),
            Err(AppError::MissingToken)
        ));
        assert!(matches!(
            authorize_role(None, Some(UserRole::Admin)),
            Err(AppError::MissingToken)
        ));
    }

    #[test]
    fn test_role_must_match_exactly() {
        let admin = identity(UserRole::Admin);

        // Admin gets no implicit pass on client or provider routes
        assert!(matches!(
            authorize_role(Some(&admin), Some(UserRole::Client)),
            Err(AppError::Forbidden)
        ));
        assert!(authorize_role(Some(&admin), Some(UserRole::Admin)).is_ok());
    }

    #[test]
    fn test_no_required_role_admits_any_identity() {
        for role in [UserRole::Client, UserRole::Provider, UserRole::Admin] {
            assert!(authorize_role(Some(&identity(role)), None).is_ok());
        }
    }
}
