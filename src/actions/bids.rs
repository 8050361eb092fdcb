use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

use crate::actions::json_error;
use crate::auth::AuthPilot;
use crate::bids::Bid;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBidRequest {
    pub flight_number: String,
    pub callsign: String,
    pub departure_icao: String,
    pub arrival_icao: String,
    pub aircraft_type: String,
}

#[derive(Debug, Serialize)]
pub struct BidResponse {
    pub bid: Bid,
}

/// Create a bid for the authenticated pilot. Any prior active bid is
/// cancelled; the new bid becomes the one the tracking client pre-fills
/// flight parameters from.
pub async fn create_bid(
    State(state): State<AppState>,
    AuthPilot(pilot): AuthPilot,
    Json(request): Json<CreateBidRequest>,
) -> impl IntoResponse {
    if request.departure_icao.trim().is_empty() || request.arrival_icao.trim().is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "Bid route must not be empty")
            .into_response();
    }

    let bid = state.bids.create(Bid::new(
        pilot.pilot_id.clone(),
        request.flight_number,
        request.callsign,
        request.departure_icao.to_uppercase(),
        request.arrival_icao.to_uppercase(),
        request.aircraft_type,
    ));

    tracing::info!(
        "Pilot {} bid on {} {} -> {}",
        pilot.pilot_id,
        bid.flight_number,
        bid.departure_icao,
        bid.arrival_icao
    );

    (StatusCode::CREATED, Json(BidResponse { bid })).into_response()
}
