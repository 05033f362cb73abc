//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, booking_handler, catalog_handler, review_handler};
use crate::domain::{
    BookingDetails, BookingStatus, CatalogEntry, Rating, ReviewDetails, ReviewedBooking,
    ReviewedProvider, ReviewedService, ServiceListing, ServiceSummary, ServiceType,
    UserResponse, UserRole, UserSummary,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the HelpApp API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "HelpApp API",
        version = "0.1.0",
        description = "Service marketplace: clients book providers, providers run the booking lifecycle, clients review completed work"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::signup,
        auth_handler::login,
        auth_handler::me,
        auth_handler::refresh_token,
        booking_handler::create_booking,
        booking_handler::list_bookings,
        booking_handler::update_booking_status,
        review_handler::create_review,
        catalog_handler::list_catalog,
        catalog_handler::create_service_type,
        catalog_handler::create_service,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            UserSummary,
            BookingStatus,
            BookingDetails,
            ServiceSummary,
            ServiceType,
            ServiceListing,
            CatalogEntry,
            Rating,
            ReviewDetails,
            ReviewedBooking,
            ReviewedProvider,
            ReviewedService,
            TokenResponse,
            auth_handler::SignupRequest,
            auth_handler::LoginRequest,
            auth_handler::RefreshTokenRequest,
            auth_handler::AuthResponse,
            auth_handler::AuthUser,
            booking_handler::CreateBookingRequest,
            booking_handler::UpdateBookingStatusRequest,
            review_handler::CreateReviewRequest,
            catalog_handler::CreateServiceTypeRequest,
            catalog_handler::CreateServiceRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login and tokens"),
        (name = "Bookings", description = "Booking lifecycle"),
        (name = "Reviews", description = "Reviews of completed bookings"),
        (name = "Services", description = "Service catalog")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /login or /signup"))
                        .build(),
                ),
            );
        }
    }
}
