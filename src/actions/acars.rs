//! The ACARS action endpoint.
//!
//! The tracking client speaks JSON over a single POST route, dispatched on an
//! `action` field: `auth`, `bid`, `start`, `position`, `pirep`, `end`. Each
//! action has its own required-field contract; `position` is special in that
//! it always acknowledges with 200 so a dropped tick never interrupts the
//! client's reporting loop.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error, info};

use crate::actions::json_error;
use crate::active_flights::PositionUpdate;
use crate::adjudication::{DEFAULT_SCORE, adjudicate, base_points};
use crate::events::PortalEvent;
use crate::flight_reports::{FlightReport, ReportStatus};
use crate::progression::grant_reward;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthParams {
    pilot_id: String,
    password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BidParams {
    pilot_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartParams {
    pilot_id: String,
    callsign: String,
    departure_icao: String,
    arrival_icao: String,
    aircraft_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionParams {
    pilot_id: String,
    callsign: String,
    latitude: f64,
    longitude: f64,
    altitude: f64,
    heading: f64,
    ground_speed: f64,
    status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PirepParams {
    pilot_id: String,
    callsign: String,
    departure_icao: String,
    arrival_icao: String,
    aircraft_type: String,
    flight_time_minutes: f64,
    landing_rate: f64,
    fuel_used: f64,
    distance_nm: f64,
    score: Option<f64>,
    pax: Option<i64>,
    cargo: Option<f64>,
    log: Option<String>,
    comments: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EndParams {
    pilot_id: String,
    callsign: String,
}

/// `POST /api/acars` entry point.
pub async fn acars_action(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let action = match body.get("action").and_then(Value::as_str) {
        Some(action) => action.to_string(),
        None => {
            return json_error(StatusCode::BAD_REQUEST, "Missing 'action' field").into_response();
        }
    };

    metrics::counter!("acars.requests", "action" => action.clone()).increment(1);

    match action.as_str() {
        "auth" => handle_auth(state, body).await,
        "bid" => handle_bid(state, body).await,
        "start" => handle_start(state, body).await,
        "position" => handle_position(state, body).await,
        "pirep" => handle_pirep(state, body).await,
        "end" => handle_end(state, body).await,
        other => {
            json_error(StatusCode::BAD_REQUEST, &format!("Unknown action '{}'", other))
                .into_response()
        }
    }
}

/// Deserialize the action payload, mapping missing/invalid fields to a 400.
fn parse_params<T: serde::de::DeserializeOwned>(action: &str, body: Value) -> Result<T, Response> {
    serde_json::from_value(body).map_err(|e| {
        debug!("Invalid '{}' payload: {}", action, e);
        json_error(
            StatusCode::BAD_REQUEST,
            &format!("Invalid '{}' request: {}", action, e),
        )
        .into_response()
    })
}

async fn handle_auth(state: AppState, body: Value) -> Response {
    let params: AuthParams = match parse_params("auth", body) {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state
        .pilots
        .verify_credentials(&params.pilot_id, &params.password)
    {
        Ok(Some(pilot)) => match state.jwt.generate_token(&pilot) {
            Ok(token) => Json(json!({
                "success": true,
                "sessionToken": token,
                "pilot": {
                    "id": pilot.id,
                    "pilotId": pilot.pilot_id,
                    "name": pilot.name,
                    "rank": pilot.rank,
                    "totalHours": pilot.total_hours,
                },
            }))
            .into_response(),
            Err(e) => {
                error!(error = %e, "Failed to generate session token");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session")
                    .into_response()
            }
        },
        Ok(None) => {
            json_error(StatusCode::UNAUTHORIZED, "Invalid pilot ID or password").into_response()
        }
        Err(e) => {
            error!(error = %e, "Credential verification failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to verify credentials")
                .into_response()
        }
    }
}

async fn handle_bid(state: AppState, body: Value) -> Response {
    let params: BidParams = match parse_params("bid", body) {
        Ok(p) => p,
        Err(response) => return response,
    };

    if state.pilots.get_by_pilot_id(&params.pilot_id).is_none() {
        return json_error(StatusCode::NOT_FOUND, "Pilot not found").into_response();
    }

    match state.bids.active_for_pilot(&params.pilot_id) {
        Some(bid) => Json(json!({
            "success": true,
            "bid": {
                "id": bid.id,
                "flight_number": bid.flight_number,
                "callsign": bid.callsign,
                "departure_icao": bid.departure_icao,
                "arrival_icao": bid.arrival_icao,
                "aircraft_type": bid.aircraft_type,
                "status": bid.status,
            },
        }))
        .into_response(),
        None => Json(json!({ "success": true, "bid": null })).into_response(),
    }
}

async fn handle_start(state: AppState, body: Value) -> Response {
    let params: StartParams = match parse_params("start", body) {
        Ok(p) => p,
        Err(response) => return response,
    };

    // Unknown pilot IDs are silently skipped: the tracker gets the same
    // acknowledgment and nothing is written.
    if state.pilots.get_by_pilot_id(&params.pilot_id).is_none() {
        debug!("Ignoring 'start' for unknown pilot {}", params.pilot_id);
        return Json(json!({ "success": true, "message": "Flight tracking started" }))
            .into_response();
    }

    state.active_flights.start_flight(
        &params.pilot_id,
        &params.callsign,
        &params.departure_icao,
        &params.arrival_icao,
        &params.aircraft_type,
    );

    info!(
        "Pilot {} started {} {} -> {} ({})",
        params.pilot_id,
        params.callsign,
        params.departure_icao,
        params.arrival_icao,
        params.aircraft_type
    );

    Json(json!({ "success": true, "message": "Flight tracking started" })).into_response()
}

async fn handle_position(state: AppState, body: Value) -> Response {
    // Contract: this path always acknowledges with 200. A malformed tick, an
    // unknown pilot, or an internal failure must not interrupt the client's
    // reporting loop, so every branch below degrades to the same response.
    let ack = || Json(json!({ "success": true })).into_response();

    let params: PositionParams = match serde_json::from_value(body) {
        Ok(p) => p,
        Err(e) => {
            debug!("Swallowing malformed position tick: {}", e);
            return ack();
        }
    };

    let pilot = match state.pilots.get_by_pilot_id(&params.pilot_id) {
        Some(pilot) => pilot,
        None => {
            // Silent no-op, same as 'start': existence of pilot IDs is not
            // revealed to the telemetry source.
            debug!("Ignoring position tick for unknown pilot {}", params.pilot_id);
            return ack();
        }
    };

    let (flight, took_off) = state.active_flights.upsert_position(
        &params.pilot_id,
        &params.callsign,
        PositionUpdate {
            latitude: params.latitude,
            longitude: params.longitude,
            altitude: params.altitude,
            heading: params.heading,
            ground_speed: params.ground_speed,
        },
        &params.status,
    );

    if took_off {
        info!(
            "Pilot {} airborne as {} ({} -> {})",
            pilot.pilot_id, flight.callsign, flight.departure_icao, flight.arrival_icao
        );
        metrics::counter!("acars.takeoffs").increment(1);
        state.events.publish(PortalEvent::Takeoff {
            pilot_id: pilot.pilot_id.clone(),
            pilot_name: pilot.name.clone(),
            callsign: flight.callsign.clone(),
            departure_icao: flight.departure_icao.clone(),
            arrival_icao: flight.arrival_icao.clone(),
            aircraft_type: flight.aircraft_type.clone(),
        });
    }

    ack()
}

async fn handle_pirep(state: AppState, body: Value) -> Response {
    let params: PirepParams = match parse_params("pirep", body) {
        Ok(p) => p,
        Err(response) => return response,
    };

    let pilot = match state.pilots.get_by_pilot_id(&params.pilot_id) {
        Some(pilot) => pilot,
        None => return json_error(StatusCode::NOT_FOUND, "Pilot not found").into_response(),
    };

    let status = adjudicate(&state.policy, params.landing_rate, params.score);

    // Reward is computed for Approved and Pending alike; manual review gates
    // the record status, not the reward timing.
    let (points, note) = match status {
        ReportStatus::Rejected => (
            0,
            format!(
                "Landing rate {:.0} fpm at or below the {:.0} fpm rejection floor",
                params.landing_rate, state.policy.landing_rate_reject_floor
            ),
        ),
        ReportStatus::Approved | ReportStatus::Pending => {
            let bonus = state
                .bonuses
                .bonus_for_route(&params.departure_icao, &params.arrival_icao);
            let points = base_points(&state.policy, params.flight_time_minutes, params.distance_nm)
                + bonus;
            let note = if bonus > 0 {
                format!("{} points awarded ({} destination bonus)", points, bonus)
            } else {
                format!("{} points awarded", points)
            };
            (points, note)
        }
    };

    let report = FlightReport {
        id: uuid::Uuid::now_v7(),
        pilot_id: params.pilot_id.clone(),
        callsign: params.callsign.clone(),
        departure_icao: params.departure_icao.clone(),
        arrival_icao: params.arrival_icao.clone(),
        aircraft_type: params.aircraft_type.clone(),
        flight_time_minutes: params.flight_time_minutes,
        landing_rate: params.landing_rate,
        fuel_used: params.fuel_used,
        distance_nm: params.distance_nm,
        pax: params.pax.unwrap_or(0),
        cargo: params.cargo.unwrap_or(0.0),
        score: params.score.unwrap_or(DEFAULT_SCORE),
        points_awarded: points,
        status,
        note: note.clone(),
        log: params.log.clone(),
        comments: params.comments.clone(),
        filed_at: chrono::Utc::now(),
    };
    state.reports.create(report);

    // Whatever the outcome, the flight is over: tracking ends and the bid
    // ledger entry for this leg is closed.
    state
        .active_flights
        .end_flight(&params.pilot_id, &params.callsign);
    state
        .bids
        .complete_for_route(&params.pilot_id, &params.departure_icao, &params.arrival_icao);

    if status == ReportStatus::Rejected {
        info!(
            "PIREP rejected for {} ({}): landing rate {:.0} fpm",
            params.pilot_id, params.callsign, params.landing_rate
        );
        metrics::counter!("acars.pirep.rejected").increment(1);
        return Json(json!({
            "success": true,
            "message": format!("PIREP rejected: {}", note),
            "pointsEarned": 0,
            "newRank": pilot.rank,
        }))
        .into_response();
    }

    let outcome = match grant_reward(
        &state.pilots,
        &state.ladder,
        &state.events,
        &params.pilot_id,
        points,
        params.flight_time_minutes,
        &params.arrival_icao,
    ) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "Failed to apply flight reward");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to apply reward")
                .into_response();
        }
    };

    state.events.publish(PortalEvent::Landing {
        pilot_id: outcome.pilot.pilot_id.clone(),
        pilot_name: outcome.pilot.name.clone(),
        callsign: params.callsign.clone(),
        arrival_icao: params.arrival_icao.clone(),
        landing_rate: params.landing_rate,
        points,
        status,
    });

    let message = match status {
        ReportStatus::Approved => {
            metrics::counter!("acars.pirep.approved").increment(1);
            format!("PIREP approved: {}", note)
        }
        ReportStatus::Pending => {
            metrics::counter!("acars.pirep.pending").increment(1);
            format!("PIREP submitted for manual review: {}", note)
        }
        ReportStatus::Rejected => unreachable!(),
    };

    info!(
        "PIREP {} for {} ({}): {} points, rank {}",
        match status {
            ReportStatus::Approved => "approved",
            ReportStatus::Pending => "pending review",
            ReportStatus::Rejected => "rejected",
        },
        params.pilot_id,
        params.callsign,
        points,
        outcome.new_rank
    );

    Json(json!({
        "success": true,
        "message": message,
        "pointsEarned": points,
        "newRank": outcome.new_rank,
    }))
    .into_response()
}

async fn handle_end(state: AppState, body: Value) -> Response {
    let params: EndParams = match parse_params("end", body) {
        Ok(p) => p,
        Err(response) => return response,
    };

    if state.pilots.get_by_pilot_id(&params.pilot_id).is_none() {
        return json_error(StatusCode::NOT_FOUND, "Pilot not found").into_response();
    }

    state
        .active_flights
        .end_flight(&params.pilot_id, &params.callsign);
    info!("Pilot {} ended flight {}", params.pilot_id, params.callsign);

    Json(json!({ "success": true, "message": "Flight tracking ended" })).into_response()
}
