use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

use crate::active_flights::{ActiveFlight, PHASE_AIRBORNE, PositionUpdate};

/// Repository for in-progress flights, keyed by (pilot, callsign).
///
/// Lifecycle operations are latest-write-wins upserts so they stay idempotent
/// under re-ordered or duplicated requests; a stale tick arriving after a
/// newer one simply overwrites it, which the tracker accepts by design.
#[derive(Clone, Default)]
pub struct ActiveFlightsRepository {
    flights: Arc<DashMap<(String, String), ActiveFlight>>,
}

impl ActiveFlightsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a flight.
    ///
    /// Removes every existing row for this pilot first (one active flight per
    /// pilot, whatever callsign it was under), then inserts a fresh row in
    /// `Preflight`. Calling twice leaves exactly one row.
    pub fn start_flight(
        &self,
        pilot_id: &str,
        callsign: &str,
        departure_icao: &str,
        arrival_icao: &str,
        aircraft_type: &str,
    ) -> ActiveFlight {
        self.flights.retain(|(pilot, _), _| pilot != pilot_id);

        let flight = ActiveFlight::new(
            pilot_id.to_string(),
            callsign.to_string(),
            departure_icao.to_string(),
            arrival_icao.to_string(),
            aircraft_type.to_string(),
        );
        self.flights
            .insert((pilot_id.to_string(), callsign.to_string()), flight.clone());
        flight
    }

    /// Apply a position tick to the pilot's flight, creating the row if the
    /// client never sent an explicit `start`.
    ///
    /// A tick under a new callsign supersedes whatever the pilot was flying
    /// before: like `start_flight`, any rows under other callsigns are
    /// cleared first, keeping the one-row-per-pilot invariant.
    ///
    /// Returns a snapshot of the row plus whether this tick crossed the
    /// one-shot takeoff edge (`takeoff_notified` was false and the reported
    /// status is `Airborne`). The flag is flipped inside the same map entry,
    /// so two racing `Airborne` ticks cannot both report the crossing.
    pub fn upsert_position(
        &self,
        pilot_id: &str,
        callsign: &str,
        position: PositionUpdate,
        status: &str,
    ) -> (ActiveFlight, bool) {
        if !self
            .flights
            .contains_key(&(pilot_id.to_string(), callsign.to_string()))
        {
            self.flights.retain(|(pilot, _), _| pilot != pilot_id);
        }

        let mut entry = self
            .flights
            .entry((pilot_id.to_string(), callsign.to_string()))
            .or_insert_with(|| {
                ActiveFlight::new(
                    pilot_id.to_string(),
                    callsign.to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                )
            });

        let flight = entry.value_mut();
        flight.latitude = position.latitude;
        flight.longitude = position.longitude;
        flight.altitude = position.altitude;
        flight.heading = position.heading;
        flight.ground_speed = position.ground_speed;
        flight.status = status.to_string();
        flight.last_update = Utc::now();

        let mut took_off = false;
        if !flight.takeoff_notified && status == PHASE_AIRBORNE {
            // Non-reversible: the flag stays set for the life of the row.
            flight.takeoff_notified = true;
            took_off = true;
        }

        (flight.clone(), took_off)
    }

    /// Stop tracking the pilot's flight under this callsign. Removing a row
    /// that does not exist is success.
    pub fn end_flight(&self, pilot_id: &str, callsign: &str) {
        self.flights
            .remove(&(pilot_id.to_string(), callsign.to_string()));
    }

    /// All rows for a pilot. The invariant says this is never more than one.
    pub fn flights_for_pilot(&self, pilot_id: &str) -> Vec<ActiveFlight> {
        self.flights
            .iter()
            .filter(|entry| entry.key().0 == pilot_id)
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn get(&self, pilot_id: &str, callsign: &str) -> Option<ActiveFlight> {
        self.flights
            .get(&(pilot_id.to_string(), callsign.to_string()))
            .map(|f| f.clone())
    }
}
