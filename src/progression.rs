//! Reward application and rank progression.
//!
//! Invoked after a PIREP is adjudicated Approved or Pending. Applies the
//! pilot-record side effects, then re-evaluates the rank ladder against the
//! new cumulative totals. Rank only ever moves upward here; re-running with
//! unchanged totals is a no-op.

use anyhow::{Result, anyhow};
use tracing::info;

use crate::events::{EventPublisher, PortalEvent};
use crate::pilots::Pilot;
use crate::pilots_repo::PilotsRepository;
use crate::ranks::{RankThreshold, ladder_index, rank_for};

/// Outcome of granting a reward.
#[derive(Debug, Clone)]
pub struct RewardOutcome {
    pub points: i64,
    pub new_rank: String,
    pub promoted: bool,
    pub pilot: Pilot,
}

/// Credit `points` to the pilot, fold the flight into their totals, and
/// evaluate promotion. Emits a promotion event only when a threshold was
/// newly crossed.
pub fn grant_reward(
    pilots: &PilotsRepository,
    ladder: &[RankThreshold],
    events: &EventPublisher,
    pilot_id: &str,
    points: i64,
    flight_time_minutes: f64,
    arrival_icao: &str,
) -> Result<RewardOutcome> {
    let mut pilot = pilots
        .apply_flight_reward(pilot_id, points, flight_time_minutes, arrival_icao)
        .ok_or_else(|| anyhow!("Pilot {} not found", pilot_id))?;

    let earned = rank_for(ladder, pilot.total_hours, pilot.total_flights);
    let current_index = ladder_index(ladder, &pilot.rank);
    let earned_index = ladder_index(ladder, &earned.name);

    // Upward only: an earned rank at or below the stored one changes nothing.
    let promoted = match (current_index, earned_index) {
        (Some(current), Some(earned)) => earned > current,
        // Stored rank is not on the ladder (legacy name); adopt the earned one.
        (None, Some(_)) => true,
        _ => false,
    };

    if promoted {
        pilots.set_rank(pilot_id, &earned.name);
        pilot.rank = earned.name.clone();
        info!(
            "Pilot {} promoted to {} ({:.1} hours, {} flights)",
            pilot_id, earned.name, pilot.total_hours, pilot.total_flights
        );
        metrics::counter!("progression.promotions").increment(1);
        events.publish(PortalEvent::Promotion {
            pilot_id: pilot.pilot_id.clone(),
            pilot_name: pilot.name.clone(),
            new_rank: earned.name.clone(),
        });
    }

    Ok(RewardOutcome {
        points,
        new_rank: pilot.rank.clone(),
        promoted,
        pilot,
    })
}
