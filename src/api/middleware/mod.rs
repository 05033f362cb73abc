//! API middleware.

mod auth;

pub use auth::{authenticate, authorize, authorize_role, CurrentUser};
