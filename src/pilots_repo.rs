use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use dashmap::DashMap;

use crate::pilots::{Pilot, PilotStatus};

/// Repository for pilot accounts, keyed by the callsign-style member ID.
///
/// The portal database proper is an external collaborator; this store keeps
/// the narrow read/update surface the engine needs, with every compound
/// update applied under a single map entry so concurrent requests for the
/// same pilot never interleave partial writes.
#[derive(Clone, Default)]
pub struct PilotsRepository {
    pilots: Arc<DashMap<String, Pilot>>,
}

impl PilotsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a pilot by member ID.
    pub fn get_by_pilot_id(&self, pilot_id: &str) -> Option<Pilot> {
        self.pilots.get(pilot_id).map(|p| p.clone())
    }

    /// Insert a pilot. Replaces any existing account with the same member ID.
    pub fn insert(&self, pilot: Pilot) {
        self.pilots.insert(pilot.pilot_id.clone(), pilot);
    }

    /// Verify credentials against the stored bcrypt hash.
    ///
    /// Returns the pilot on success. A successful login also refreshes the
    /// activity timestamp and reactivates dormant accounts.
    pub fn verify_credentials(&self, pilot_id: &str, password: &str) -> Result<Option<Pilot>> {
        let hash = match self.pilots.get(pilot_id) {
            Some(pilot) => pilot.password_hash.clone(),
            None => return Ok(None),
        };

        if !bcrypt::verify(password, &hash)? {
            return Ok(None);
        }

        Ok(self.pilots.get_mut(pilot_id).map(|mut pilot| {
            pilot.status = PilotStatus::Active;
            pilot.last_activity = Utc::now();
            pilot.updated_at = Utc::now();
            pilot.clone()
        }))
    }

    /// Apply the reward side effects of an adjudicated flight report in one
    /// atomic update: flight count, hours, credits, location, activity
    /// timestamp, and account reactivation.
    ///
    /// Returns the updated pilot, or `None` if the member ID is unknown.
    pub fn apply_flight_reward(
        &self,
        pilot_id: &str,
        points: i64,
        flight_time_minutes: f64,
        arrival_icao: &str,
    ) -> Option<Pilot> {
        self.pilots.get_mut(pilot_id).map(|mut pilot| {
            pilot.total_flights += 1;
            pilot.total_hours += flight_time_minutes / 60.0;
            pilot.credits += points;
            pilot.location = Some(arrival_icao.to_string());
            pilot.last_activity = Utc::now();
            pilot.status = PilotStatus::Active;
            pilot.updated_at = Utc::now();
            pilot.clone()
        })
    }

    /// Store a new rank for the pilot. Returns false if the member ID is
    /// unknown.
    pub fn set_rank(&self, pilot_id: &str, rank: &str) -> bool {
        match self.pilots.get_mut(pilot_id) {
            Some(mut pilot) => {
                pilot.rank = rank.to_string();
                pilot.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}
