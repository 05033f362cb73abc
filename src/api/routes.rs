//! Application route configuration.
//!
//! Every protected route runs `authenticate` first; routes restricted to a
//! role add an `authorize` stage on the method router itself.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{auth_handler, booking_handler, catalog_handler, review_handler};
use super::middleware::{authenticate, authorize};
use super::openapi::ApiDoc;
use super::AppState;
use crate::domain::UserRole;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/me", get(auth_handler::me))
        .route(
            "/bookings",
            get(booking_handler::list_bookings).merge(
                post(booking_handler::create_booking).route_layer(middleware::from_fn_with_state(
                    UserRole::Client,
                    authorize,
                )),
            ),
        )
        .route(
            "/bookings/:id",
            patch(booking_handler::update_booking_status).route_layer(
                middleware::from_fn_with_state(UserRole::Provider, authorize),
            ),
        )
        .route(
            "/reviews",
            post(review_handler::create_review)
                .route_layer(middleware::from_fn_with_state(UserRole::Client, authorize)),
        )
        .route(
            "/services/offerings",
            post(catalog_handler::create_service)
                .route_layer(middleware::from_fn_with_state(UserRole::Provider, authorize)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Reading the catalog is public, creating a service type is not
    let services = get(catalog_handler::list_catalog).merge(
        post(catalog_handler::create_service_type)
            .route_layer(middleware::from_fn_with_state(UserRole::Admin, authorize))
            .route_layer(middleware::from_fn_with_state(state.clone(), authenticate)),
    );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/signup", post(auth_handler::signup))
        .route("/login", post(auth_handler::login))
        .route("/token/refresh", post(auth_handler::refresh_token))
        .route("/services", services)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to the HelpApp API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.database.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
