//! Token service - issues, verifies and refreshes signed session tokens.
//!
//! Tokens are HS256 JWTs pinned to a fixed issuer and audience. Nothing is
//! stored server side: a token is valid exactly when its signature and
//! claims check out.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind as JwtErrorKind, Algorithm, DecodingKey, EncodingKey,
    Header, Validation,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{
    Config, BEARER_TOKEN_PREFIX, JWT_AUDIENCE, JWT_ISSUER, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER,
};
use crate::domain::{User, UserRole};
use crate::errors::{AppError, AppResult, TokenError};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Identity carried by a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Not before (seconds since epoch)
    pub nbf: i64,
    /// Expires at (seconds since epoch)
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

impl Claims {
    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            user_id: self.user_id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Token returned after signup, login and refresh
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Signed JWT
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Seconds until the token expires
    #[schema(example = 604800)]
    pub expires_in: i64,
}

/// Stateless JWT issuer/verifier
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime_secs: i64,
}

impl TokenService {
    /// Build from validated configuration. `Config` guarantees the secret
    /// is present and long enough, so construction cannot fail.
    pub fn new(config: &Config) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret_bytes()),
            lifetime_secs: config.jwt_expiration_hours * SECONDS_PER_HOUR,
        }
    }

    /// Token lifetime in seconds
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    /// Issue a token for `subject`, valid from now for the configured lifetime.
    pub fn issue(&self, subject: &TokenSubject) -> AppResult<TokenResponse> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    pub(crate) fn issue_at(&self, subject: &TokenSubject, now: i64) -> AppResult<TokenResponse> {
        self.sign(subject, now, now + self.lifetime_secs)
    }

    fn sign(&self, subject: &TokenSubject, now: i64, exp: i64) -> AppResult<TokenResponse> {
        let claims = Claims {
            user_id: subject.user_id,
            email: subject.email.clone(),
            role: subject.role,
            iat: now,
            nbf: now,
            exp,
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;

        Ok(TokenResponse {
            token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: exp - now,
        })
    }

    /// Verify signature, algorithm, issuer, audience and time window.
    ///
    /// Accepts the raw token or a `Bearer `-prefixed header value.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token = strip_bearer(token);

        let claims = decode::<Claims>(token, &self.decoding_key, &strict_validation())
            .map_err(|e| map_jwt_error(e.kind()))?
            .claims;

        // Same boundary as `is_expired`: a token is dead at its exp second
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Read claims without checking the signature or time window.
    ///
    /// Only for expiry probing. Never authorize on the result.
    pub fn decode_unsafe(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(ALGORITHM);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(strip_bearer(token), &self.decoding_key, &validation)
            .ok()
            .map(|data| data.claims)
    }

    /// Fail-closed expiry probe: undecodable input counts as expired.
    pub fn is_expired(&self, token: &str) -> bool {
        self.is_expired_at(token, Utc::now().timestamp())
    }

    fn is_expired_at(&self, token: &str, now: i64) -> bool {
        match self.decode_unsafe(token) {
            Some(claims) => claims.exp <= now,
            None => true,
        }
    }

    /// Re-issue a still-valid token with the same identity and a later expiry.
    ///
    /// Expired input is rejected like any other verification failure.
    pub fn refresh(&self, token: &str) -> AppResult<TokenResponse> {
        let claims = self.verify(token)?;

        let now = Utc::now().timestamp();
        let exp = (now + self.lifetime_secs).max(claims.exp + 1);
        self.sign(&claims.subject(), now, exp)
    }
}

fn strict_validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.set_issuer(&[JWT_ISSUER]);
    validation.set_audience(&[JWT_AUDIENCE]);
    validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud"]);
    validation
}

fn strip_bearer(token: &str) -> &str {
    let token = token.trim();
    token.strip_prefix(BEARER_TOKEN_PREFIX).unwrap_or(token).trim()
}

fn map_jwt_error(kind: &JwtErrorKind) -> TokenError {
    match kind {
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        JwtErrorKind::ImmatureSignature => TokenError::NotYetValid,
        JwtErrorKind::InvalidToken
        | JwtErrorKind::Base64(_)
        | JwtErrorKind::Json(_)
        | JwtErrorKind::Utf8(_) => TokenError::Malformed,
        _ => TokenError::Invalid,
    }
}
