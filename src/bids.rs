use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidStatus {
    Active,
    Cancelled,
    Completed,
}

/// A pilot's declared intent to fly a route before telemetry begins.
///
/// Unlike active flights, bids are kept for history: superseded bids are
/// soft-cancelled rather than deleted. At most one bid per pilot is `Active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bid {
    pub id: Uuid,

    /// Owning pilot (member ID)
    pub pilot_id: String,

    /// Scheduled flight number (e.g. "VA412")
    pub flight_number: String,

    pub callsign: String,
    pub departure_icao: String,
    pub arrival_icao: String,
    pub aircraft_type: String,

    pub status: BidStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bid {
    pub fn new(
        pilot_id: String,
        flight_number: String,
        callsign: String,
        departure_icao: String,
        arrival_icao: String,
        aircraft_type: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            pilot_id,
            flight_number,
            callsign,
            departure_icao,
            arrival_icao,
            aircraft_type,
            status: BidStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}
