//! Admission control at the router level: requests over the fixed-window
//! limit are rejected immediately with 429.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn requests_over_the_window_limit_get_429() {
    let app = TestApp::with_rate_limit(3);
    app.seed_pilot("VA1001", "hunter2");

    for _ in 0..3 {
        let (status, _) = app
            .acars(json!({ "action": "bid", "pilotId": "VA1001" }))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app
        .acars(json!({ "action": "bid", "pilotId": "VA1001" }))
        .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body["error"].as_str().unwrap().contains("Rate limit"));
}

#[tokio::test]
async fn the_status_route_is_also_limited() {
    let app = TestApp::with_rate_limit(1);

    let request = || async {
        use tower::ServiceExt;
        let response = app
            .router
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .method("GET")
                    .uri("/api/status")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    };

    assert_eq!(request().await, StatusCode::OK);
    assert_eq!(request().await, StatusCode::TOO_MANY_REQUESTS);
}
