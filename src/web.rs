use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use crate::actions;
use crate::active_flights_repo::ActiveFlightsRepository;
use crate::auth::JwtService;
use crate::bids_repo::BidsRepository;
use crate::bonuses_repo::BonusesRepository;
use crate::events::EventPublisher;
use crate::flight_reports_repo::FlightReportsRepository;
use crate::pilots_repo::PilotsRepository;
use crate::policy::ThresholdPolicy;
use crate::ranks::RankThreshold;
use crate::rate_limit::RateLimiter;

/// Shared application state: repositories, policy, event publisher, session
/// service, and the admission-control limiter.
#[derive(Clone)]
pub struct AppState {
    pub pilots: PilotsRepository,
    pub active_flights: ActiveFlightsRepository,
    pub reports: FlightReportsRepository,
    pub bids: BidsRepository,
    pub bonuses: BonusesRepository,
    pub policy: Arc<ThresholdPolicy>,
    pub ladder: Arc<Vec<RankThreshold>>,
    pub events: EventPublisher,
    pub jwt: Arc<JwtService>,
    pub limiter: Arc<RateLimiter>,
}

// Middleware for request logging with correlation ID
async fn request_logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = Uuid::new_v4().to_string()[..8].to_string();
    let start_time = Instant::now();

    info!("Started {} {} [{}]", method, path, request_id);

    let response = next.run(request).await;
    let duration = start_time.elapsed();
    let status = response.status();

    info!(
        "Completed {} {} [{}] {} in {:.2}ms",
        method,
        path,
        request_id,
        status.as_u16(),
        duration.as_secs_f64() * 1000.0
    );
    metrics::histogram!("http.request_ms").record(duration.as_secs_f64() * 1000.0);

    response
}

/// Build the application router. Exposed separately from the server so tests
/// can drive it in-process.
pub fn build_router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/acars", post(actions::acars_action))
        .route("/bids", post(actions::create_bid))
        .route("/status", get(actions::get_status))
        .with_state(state.clone());

    Router::new()
        .nest("/api", api_router)
        .layer(middleware::from_fn_with_state(
            state,
            crate::rate_limit::rate_limit_middleware,
        ))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(CorsLayer::permissive())
}

pub async fn start_web_server(interface: String, port: u16, state: AppState) -> Result<()> {
    info!("Starting web server on {}:{}", interface, port);

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", interface, port)).await?;
    info!("Web server listening on http://{}:{}", interface, port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
