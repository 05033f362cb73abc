//! Booking lifecycle through the HTTP surface.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::Marketplace;

#[tokio::test]
async fn test_booking_lifecycle_accept_then_invalid_transition() {
    let market = Marketplace::new().await;

    let (status, body) = market
        .app
        .post(
            "/bookings",
            Some(&market.client.token),
            json!({ "providerId": market.provider.id, "serviceId": market.service_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["client"]["id"], market.client.id.to_string());
    assert_eq!(body["provider"]["id"], market.provider.id.to_string());
    assert_eq!(body["service"]["title"], "Leak repair");
    let booking_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = market.set_status(&booking_id, "ACCEPTED").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ACCEPTED");

    let (status, body) = market.set_status(&booking_id, "PENDING").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_terminal_booking_cannot_change() {
    let market = Marketplace::new().await;
    let booking_id = market.book().await;

    let (status, _) = market.set_status(&booking_id, "REJECTED").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = market.set_status(&booking_id, "ACCEPTED").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Cannot change status of a completed or rejected booking."
    );
}

#[tokio::test]
async fn test_only_assigned_provider_changes_status() {
    let market = Marketplace::new().await;
    let booking_id = market.book().await;
    let stranger = market.app.signup("Stranger", "PROVIDER").await;

    let (status, body) = market
        .app
        .patch(
            &format!("/bookings/{}", booking_id),
            Some(&stranger.token),
            json!({ "status": "ACCEPTED" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Unauthorized: You are not the provider for this booking."
    );

    // The booking is untouched
    let (_, bookings) = market.app.get("/bookings", Some(&market.client.token)).await;
    assert_eq!(bookings[0]["status"], "PENDING");
}

#[tokio::test]
async fn test_client_cannot_change_status() {
    let market = Marketplace::new().await;
    let booking_id = market.book().await;

    let (status, body) = market
        .app
        .patch(
            &format!("/bookings/{}", booking_id),
            Some(&market.client.token),
            json!({ "status": "ACCEPTED" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden: Insufficient privileges");
}

#[tokio::test]
async fn test_provider_cannot_book() {
    let market = Marketplace::new().await;

    let (status, _) = market
        .app
        .post(
            "/bookings",
            Some(&market.provider.token),
            json!({ "providerId": market.provider.id, "serviceId": market.service_id }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_booking_requires_token() {
    let market = Marketplace::new().await;

    let (status, _) = market
        .app
        .post(
            "/bookings",
            None,
            json!({ "providerId": market.provider.id, "serviceId": market.service_id }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_booking_rejects_bad_references() {
    let market = Marketplace::new().await;
    let other_provider = market.app.signup("Other", "PROVIDER").await;

    // Provider id belongs to a client
    let (status, body) = market
        .app
        .post(
            "/bookings",
            Some(&market.client.token),
            json!({ "providerId": market.client.id, "serviceId": market.service_id }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PROVIDER_NOT_FOUND");

    let (status, body) = market
        .app
        .post(
            "/bookings",
            Some(&market.client.token),
            json!({ "providerId": market.provider.id, "serviceId": Uuid::new_v4() }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "SERVICE_NOT_FOUND");

    let (status, body) = market
        .app
        .post(
            "/bookings",
            Some(&market.client.token),
            json!({ "providerId": other_provider.id, "serviceId": market.service_id }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Service does not belong to the specified provider."
    );
}

#[tokio::test]
async fn test_unknown_booking_and_bad_status() {
    let market = Marketplace::new().await;
    let booking_id = market.book().await;

    let (status, body) = market
        .set_status(&Uuid::new_v4().to_string(), "ACCEPTED")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Booking not found.");

    let (status, body) = market.set_status(&booking_id, "DONE").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["status"][0], "Invalid booking status");
}

#[tokio::test]
async fn test_list_bookings_for_both_parties() {
    let market = Marketplace::new().await;
    let first = market.book().await;
    let second = market.book().await;
    let outsider = market.app.signup("Outsider", "CLIENT").await;

    let (status, client_view) = market.app.get("/bookings", Some(&market.client.token)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = client_view
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|b| b["id"].as_str())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first.as_str()));
    assert!(ids.contains(&second.as_str()));

    let (_, provider_view) = market
        .app
        .get("/bookings", Some(&market.provider.token))
        .await;
    assert_eq!(provider_view.as_array().unwrap().len(), 2);

    let (_, outsider_view) = market.app.get("/bookings", Some(&outsider.token)).await;
    assert!(outsider_view.as_array().unwrap().is_empty());
}
