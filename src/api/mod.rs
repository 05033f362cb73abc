//! HTTP surface.
//!
//! Routes sit at the root path. Protected routes pass through
//! `authenticate`, then an optional role check, then `ValidatedJson`,
//! before reaching a handler.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
