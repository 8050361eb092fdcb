use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account lifecycle state for a pilot.
///
/// A pilot on leave or marked inactive is silently reactivated by a
/// successful login or an accepted flight report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilotStatus {
    Active,
    OnLeave,
    Inactive,
}

/// A pilot account with cumulative career totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pilot {
    /// Unique identifier for this pilot
    pub id: Uuid,

    /// Callsign-style member ID (e.g. "VA1234"), unique across the airline
    pub pilot_id: String,

    /// Display name
    pub name: String,

    /// Bcrypt hash of the pilot's password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Cumulative logged hours
    pub total_hours: f64,

    /// Cumulative accepted flight count
    pub total_flights: i64,

    /// Spendable credit balance
    pub credits: i64,

    /// Current rank name, from the rank-threshold ladder
    pub rank: String,

    /// Last known location (ICAO code), set to the arrival of each
    /// adjudicated flight report
    pub location: Option<String>,

    /// Account status
    pub status: PilotStatus,

    /// Last time this account did anything (login or adjudicated PIREP)
    pub last_activity: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pilot {
    /// Create a new pilot at the bottom of the rank ladder.
    pub fn new(
        pilot_id: String,
        name: String,
        password_hash: String,
        initial_rank: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            pilot_id,
            name,
            password_hash,
            total_hours: 0.0,
            total_flights: 0,
            credits: 0,
            rank: initial_rank,
            location: None,
            status: PilotStatus::Active,
            last_activity: now,
            created_at: now,
            updated_at: now,
        }
    }
}
