//! Shared harness: the real router over a migrated in-memory SQLite database.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use helpapp_api::{create_router, AppState, Config, Database};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";
pub const PASSWORD: &str = "SecurePass123!";

pub struct TestApp {
    pub router: Router,
    pub database: Database,
}

/// A signed-up account and its bearer token
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = Config::new("sqlite::memory:", TEST_SECRET, 1).unwrap();
        let database = Database::connect(&config).await.unwrap();
        let state = AppState::from_config(database.clone(), &config);

        Self {
            router: create_router(state),
            database,
        }
    }

    /// Send one request and decode the JSON body (`Null` when not JSON)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn signup(&self, name: &str, role: &str) -> Account {
        let email = format!("{}@example.com", name.to_lowercase());
        let (status, body) = self
            .post(
                "/signup",
                None,
                json!({ "name": name, "email": email, "password": PASSWORD, "role": role }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);

        Account {
            id: body["user"]["id"].as_str().unwrap().parse().unwrap(),
            email,
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Creates a service type as `admin`, returning its id
    pub async fn service_type(&self, admin: &Account, name: &str) -> String {
        let (status, body) = self
            .post("/services", Some(&admin.token), json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "service type failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    /// Publishes a service for `provider`, returning its id
    pub async fn offering(&self, provider: &Account, service_type_id: &str, title: &str) -> String {
        let (status, body) = self
            .post(
                "/services/offerings",
                Some(&provider.token),
                json!({ "serviceTypeId": service_type_id, "title": title, "price": 80.0 }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "offering failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }
}

/// Client, provider and one bookable service owned by that provider
pub struct Marketplace {
    pub app: TestApp,
    pub client: Account,
    pub provider: Account,
    pub service_id: String,
}

impl Marketplace {
    pub async fn new() -> Self {
        let app = TestApp::new().await;
        let admin = app.signup("Admin", "ADMIN").await;
        let provider = app.signup("Provider", "PROVIDER").await;
        let client = app.signup("Client", "CLIENT").await;

        let plumbing = app.service_type(&admin, "Plumbing").await;
        let service_id = app.offering(&provider, &plumbing, "Leak repair").await;

        Self {
            app,
            client,
            provider,
            service_id,
        }
    }

    /// Books the marketplace service as the client, returning the booking id
    pub async fn book(&self) -> String {
        let (status, body) = self
            .app
            .post(
                "/bookings",
                Some(&self.client.token),
                json!({ "providerId": self.provider.id, "serviceId": self.service_id }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "booking failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn set_status(&self, booking_id: &str, status: &str) -> (StatusCode, Value) {
        self.app
            .patch(
                &format!("/bookings/{}", booking_id),
                Some(&self.provider.token),
                json!({ "status": status }),
            )
            .await
    }
}
