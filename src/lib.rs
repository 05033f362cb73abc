//! HelpApp API - service marketplace backend
//!
//! Clients book services from providers, providers move bookings through
//! their lifecycle and clients review completed work.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, the booking state machine and review rules
//! - **services**: Application use cases and the token service
//! - **infra**: Database, repositories and the unit of work
//! - **api**: HTTP handlers, the auth gate and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Publish a service for an existing provider
//! cargo run -- seed service --provider-email pro@example.com \
//!     --service-type Plumbing --title "Leak repair" --price 80
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{BookingStatus, Password, User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::Database;
