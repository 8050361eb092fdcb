use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Featured-destination bonus ("destination of the month").
///
/// At most one record is active at a time. Flights departing from or
/// arriving at the featured airport earn the bonus on top of the computed
/// reward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedDestinationBonus {
    pub id: Uuid,

    /// Featured airport
    pub icao: String,

    /// Bonus points awarded per qualifying flight
    pub bonus_points: i64,

    /// Label shown in the portal (e.g. "March 2026")
    pub month: String,

    pub active: bool,

    pub created_at: DateTime<Utc>,
}

impl FeaturedDestinationBonus {
    pub fn new(icao: String, bonus_points: i64, month: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            icao,
            bonus_points,
            month,
            active: true,
            created_at: Utc::now(),
        }
    }
}
