//! Bid ledger workflow: creation through the authenticated portal route,
//! retrieval through the ACARS `bid` action, and completion via PIREP.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;
use vatrack::bids::BidStatus;

fn bid_body(dep: &str, arr: &str) -> serde_json::Value {
    json!({
        "flight_number": "VA412",
        "callsign": "VAR412",
        "departure_icao": dep,
        "arrival_icao": arr,
        "aircraft_type": "B738",
    })
}

#[tokio::test]
async fn bid_action_returns_null_when_nothing_is_bid() {
    let app = TestApp::new();
    app.seed_pilot("VA1001", "hunter2");

    let (status, body) = app
        .acars(json!({ "action": "bid", "pilotId": "VA1001" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["bid"].is_null());
}

#[tokio::test]
async fn bid_action_for_unknown_pilot_is_404() {
    let app = TestApp::new();

    let (status, _) = app
        .acars(json!({ "action": "bid", "pilotId": "VA9999" }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn creating_a_bid_requires_a_session() {
    let app = TestApp::new();
    app.seed_pilot("VA1001", "hunter2");

    let (status, _) = app.post_json("/api/bids", bid_body("KSEA", "KPDX")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post_json_with_auth("/api/bids", bid_body("KSEA", "KPDX"), Some("not-a-token"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn created_bid_is_visible_to_the_tracking_client() {
    let app = TestApp::new();
    let pilot = app.seed_pilot("VA1001", "hunter2");
    let token = app.state.jwt.generate_token(&pilot).unwrap();

    let (status, created) = app
        .post_json_with_auth("/api/bids", bid_body("KSEA", "KPDX"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["bid"]["departure_icao"], "KSEA");

    let (status, body) = app
        .acars(json!({ "action": "bid", "pilotId": "VA1001" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bid"]["flight_number"], "VA412");
    assert_eq!(body["bid"]["departure_icao"], "KSEA");
    assert_eq!(body["bid"]["arrival_icao"], "KPDX");
    assert_eq!(body["bid"]["status"], "Active");
}

#[tokio::test]
async fn a_new_bid_supersedes_the_previous_one() {
    let app = TestApp::new();
    let pilot = app.seed_pilot("VA1001", "hunter2");
    let token = app.state.jwt.generate_token(&pilot).unwrap();

    app.post_json_with_auth("/api/bids", bid_body("KSEA", "KPDX"), Some(&token))
        .await;
    app.post_json_with_auth("/api/bids", bid_body("KPDX", "KSFO"), Some(&token))
        .await;

    let (_, body) = app
        .acars(json!({ "action": "bid", "pilotId": "VA1001" }))
        .await;
    assert_eq!(body["bid"]["departure_icao"], "KPDX");

    let history = app.state.bids.history_for_pilot("VA1001");
    assert_eq!(history.len(), 2);
    assert_eq!(
        history
            .iter()
            .filter(|b| b.status == BidStatus::Active)
            .count(),
        1
    );
}

#[tokio::test]
async fn filing_a_pirep_over_the_bid_route_completes_the_bid() {
    let app = TestApp::new();
    let pilot = app.seed_pilot("VA1001", "hunter2");
    let token = app.state.jwt.generate_token(&pilot).unwrap();
    app.post_json_with_auth("/api/bids", bid_body("KSEA", "KPDX"), Some(&token))
        .await;

    app.acars(json!({
        "action": "pirep",
        "pilotId": "VA1001",
        "callsign": "VAR412",
        "departureIcao": "KSEA",
        "arrivalIcao": "KPDX",
        "aircraftType": "B738",
        "flightTimeMinutes": 45.0,
        "landingRate": -210.0,
        "fuelUsed": 1100.0,
        "distanceNm": 110.0,
    }))
    .await;

    assert!(app.state.bids.active_for_pilot("VA1001").is_none());
    let history = app.state.bids.history_for_pilot("VA1001");
    assert_eq!(history[0].status, BidStatus::Completed);
}
