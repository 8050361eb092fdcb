use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Adjudication outcome of a filed flight report.
///
/// `Pending` reports await manual review; the automatic path never revisits
/// them. Admin overrides happen outside this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Pending,
    Approved,
    Rejected,
}

/// A filed PIREP. Immutable once written: the automatic adjudication path
/// creates exactly one of these per completed flight and never updates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightReport {
    pub id: Uuid,

    /// Owning pilot (member ID)
    pub pilot_id: String,

    pub callsign: String,
    pub departure_icao: String,
    pub arrival_icao: String,
    pub aircraft_type: String,

    /// Block time in minutes as reported by the client
    pub flight_time_minutes: f64,

    /// Touchdown vertical speed in feet per minute (negative is downward)
    pub landing_rate: f64,

    pub fuel_used: f64,
    pub distance_nm: f64,
    pub pax: i64,
    pub cargo: f64,

    /// Quality score reported by the client; absent scores were defaulted
    /// to 100 before adjudication
    pub score: f64,

    /// Points credited for this flight (zero when rejected)
    pub points_awarded: i64,

    pub status: ReportStatus,

    /// Human-readable adjudication note (e.g. which threshold was violated)
    pub note: String,

    /// Raw client flight log, if submitted
    pub log: Option<String>,
    pub comments: Option<String>,

    pub filed_at: DateTime<Utc>,
}
