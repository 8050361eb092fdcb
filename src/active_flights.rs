use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Phase label reported by the tracking client once airborne.
///
/// Phase strings are otherwise stored verbatim: the client is trusted to
/// report a monotonically progressing sequence and only the transition onto
/// this value is guarded (one takeoff notification per flight).
pub const PHASE_AIRBORNE: &str = "Airborne";

/// Initial phase label for a freshly started flight.
pub const PHASE_PREFLIGHT: &str = "Preflight";

/// The single in-progress flight for a pilot.
///
/// Rows live from `start` (or the first position tick) until the PIREP is
/// filed or the flight is cancelled. At most one row exists per pilot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveFlight {
    pub id: Uuid,

    /// Owning pilot (member ID)
    pub pilot_id: String,

    /// ATC callsign for this leg (e.g. "VAR1234")
    pub callsign: String,

    pub departure_icao: String,
    pub arrival_icao: String,
    pub aircraft_type: String,

    /// Live telemetry, overwritten by every position tick
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub heading: f64,
    pub ground_speed: f64,

    /// Free-form phase string as reported by the client
    pub status: String,

    /// One-shot flag: set when the flight first reports `Airborne`, never
    /// cleared for the lifetime of the row
    pub takeoff_notified: bool,

    pub last_update: DateTime<Utc>,
}

impl ActiveFlight {
    /// A fresh row in `Preflight` with zeroed position.
    pub fn new(
        pilot_id: String,
        callsign: String,
        departure_icao: String,
        arrival_icao: String,
        aircraft_type: String,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            pilot_id,
            callsign,
            departure_icao,
            arrival_icao,
            aircraft_type,
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0.0,
            heading: 0.0,
            ground_speed: 0.0,
            status: PHASE_PREFLIGHT.to_string(),
            takeoff_notified: false,
            last_update: Utc::now(),
        }
    }
}

/// Telemetry fields carried by a single position tick.
#[derive(Debug, Clone, Copy)]
pub struct PositionUpdate {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub heading: f64,
    pub ground_speed: f64,
}
