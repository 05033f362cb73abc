//! Review admission over HTTP.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::Marketplace;

#[tokio::test]
async fn test_review_completed_booking_once() {
    let market = Marketplace::new().await;
    let booking_id = market.book().await;
    market.set_status(&booking_id, "ACCEPTED").await;
    market.set_status(&booking_id, "COMPLETED").await;

    let review = json!({ "bookingId": booking_id, "rating": 5, "comment": "Great work" });

    let (status, body) = market
        .app
        .post("/reviews", Some(&market.client.token), review.clone())
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["rating"], 5);
    assert_eq!(body["comment"], "Great work");
    assert_eq!(body["author"]["id"], market.client.id.to_string());
    assert_eq!(body["booking"]["status"], "COMPLETED");
    assert_eq!(body["booking"]["service"]["title"], "Leak repair");
    assert_eq!(body["booking"]["provider"]["id"], market.provider.id.to_string());

    let (status, body) = market
        .app
        .post("/reviews", Some(&market.client.token), review)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_review_requires_completed_booking() {
    let market = Marketplace::new().await;
    let booking_id = market.book().await;
    market.set_status(&booking_id, "ACCEPTED").await;

    let (status, body) = market
        .app
        .post(
            "/reviews",
            Some(&market.client.token),
            json!({ "bookingId": booking_id, "rating": 4 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BOOKING_NOT_COMPLETED");
}

#[tokio::test]
async fn test_only_booking_client_may_review() {
    let market = Marketplace::new().await;
    let booking_id = market.book().await;
    market.set_status(&booking_id, "ACCEPTED").await;
    market.set_status(&booking_id, "COMPLETED").await;
    let other_client = market.app.signup("Other", "CLIENT").await;

    let (status, body) = market
        .app
        .post(
            "/reviews",
            Some(&other_client.token),
            json!({ "bookingId": booking_id, "rating": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Unauthorized: Only the client who made the booking can review it."
    );

    let (status, _) = market
        .app
        .post(
            "/reviews",
            Some(&market.provider.token),
            json!({ "bookingId": booking_id, "rating": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rating_out_of_range_is_rejected() {
    let market = Marketplace::new().await;
    let booking_id = market.book().await;

    for rating in [0, 6] {
        let (status, body) = market
            .app
            .post(
                "/reviews",
                Some(&market.client.token),
                json!({ "bookingId": booking_id, "rating": rating }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["rating"].is_array());
    }
}

#[tokio::test]
async fn test_review_unknown_booking() {
    let market = Marketplace::new().await;

    let (status, body) = market
        .app
        .post(
            "/reviews",
            Some(&market.client.token),
            json!({ "bookingId": uuid::Uuid::new_v4(), "rating": 5 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Booking not found.");
}
