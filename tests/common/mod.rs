//! Shared harness for integration tests.
//!
//! Builds the real application router over freshly seeded state and drives
//! it in-process, so tests exercise the same dispatch, middleware, and
//! handlers the server runs.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, body::Body, http::Request, http::StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use vatrack::active_flights_repo::ActiveFlightsRepository;
use vatrack::auth::JwtService;
use vatrack::bids_repo::BidsRepository;
use vatrack::bonuses_repo::BonusesRepository;
use vatrack::events::{self, PortalEvent};
use vatrack::flight_reports_repo::FlightReportsRepository;
use vatrack::pilots::Pilot;
use vatrack::policy::ThresholdPolicy;
use vatrack::ranks;
use vatrack::rate_limit::RateLimiter;
use vatrack::web::{AppState, build_router};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub events: flume::Receiver<PortalEvent>,
}

impl TestApp {
    /// App with default policy and an effectively unlimited rate limiter.
    pub fn new() -> Self {
        Self::with_rate_limit(10_000)
    }

    pub fn with_rate_limit(limit: u32) -> Self {
        let (events, events_rx) = events::channel(64);
        let state = AppState {
            pilots: vatrack::pilots_repo::PilotsRepository::new(),
            active_flights: ActiveFlightsRepository::new(),
            reports: FlightReportsRepository::new(),
            bids: BidsRepository::new(),
            bonuses: BonusesRepository::new(),
            policy: Arc::new(ThresholdPolicy::default()),
            ladder: Arc::new(ranks::default_ladder()),
            events,
            jwt: Arc::new(JwtService::new("test-secret")),
            limiter: Arc::new(RateLimiter::new(limit, Duration::from_secs(60))),
        };
        Self {
            router: build_router(state.clone()),
            state,
            events: events_rx,
        }
    }

    /// Seed a pilot with the given credentials at the bottom of the ladder.
    pub fn seed_pilot(&self, pilot_id: &str, password: &str) -> Pilot {
        self.seed_pilot_with_totals(pilot_id, password, 0.0, 0)
    }

    /// Seed a pilot with prior career totals (rank stays at the bottom so
    /// promotion paths can be exercised).
    pub fn seed_pilot_with_totals(
        &self,
        pilot_id: &str,
        password: &str,
        hours: f64,
        flights: i64,
    ) -> Pilot {
        let mut pilot = Pilot::new(
            pilot_id.to_string(),
            "Test Pilot".to_string(),
            bcrypt::hash(password, 4).expect("bcrypt hash"),
            "Cadet".to_string(),
        );
        pilot.total_hours = hours;
        pilot.total_flights = flights;
        self.state.pilots.insert(pilot.clone());
        pilot
    }

    /// POST a JSON body and return (status, parsed body).
    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.post_json_with_auth(path, body, None).await
    }

    pub async fn post_json_with_auth(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json");
        if let Some(token) = bearer {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = builder
            .body(Body::from(body.to_string()))
            .expect("request build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router oneshot");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collect")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    /// Send an ACARS action payload.
    pub async fn acars(&self, body: Value) -> (StatusCode, Value) {
        self.post_json("/api/acars", body).await
    }

    /// Drain every event emitted so far.
    pub fn drain_events(&self) -> Vec<PortalEvent> {
        self.events.try_iter().collect()
    }
}
