use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

use crate::bids::{Bid, BidStatus};

/// Repository for route bids.
///
/// Enforces "at most one active bid per pilot" as a soft status flip:
/// creating a bid cancels every prior active bid for that pilot but keeps
/// the rows for history.
#[derive(Clone, Default)]
pub struct BidsRepository {
    bids: Arc<DashMap<uuid::Uuid, Bid>>,
}

impl BidsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new active bid, cancelling all of the pilot's prior active
    /// bids first.
    pub fn create(&self, bid: Bid) -> Bid {
        for mut entry in self.bids.iter_mut() {
            if entry.pilot_id == bid.pilot_id && entry.status == BidStatus::Active {
                entry.status = BidStatus::Cancelled;
                entry.updated_at = Utc::now();
            }
        }
        self.bids.insert(bid.id, bid.clone());
        bid
    }

    /// The pilot's single active bid, if any.
    pub fn active_for_pilot(&self, pilot_id: &str) -> Option<Bid> {
        self.bids
            .iter()
            .find(|entry| entry.pilot_id == pilot_id && entry.status == BidStatus::Active)
            .map(|entry| entry.value().clone())
    }

    /// Mark the pilot's active bid completed if it covers this route.
    /// Filing a PIREP over the bid route closes the ledger entry.
    pub fn complete_for_route(&self, pilot_id: &str, departure_icao: &str, arrival_icao: &str) {
        for mut entry in self.bids.iter_mut() {
            if entry.pilot_id == pilot_id
                && entry.status == BidStatus::Active
                && entry.departure_icao == departure_icao
                && entry.arrival_icao == arrival_icao
            {
                entry.status = BidStatus::Completed;
                entry.updated_at = Utc::now();
            }
        }
    }

    /// Full bid history for a pilot, newest first.
    pub fn history_for_pilot(&self, pilot_id: &str) -> Vec<Bid> {
        let mut bids: Vec<Bid> = self
            .bids
            .iter()
            .filter(|entry| entry.pilot_id == pilot_id)
            .map(|entry| entry.value().clone())
            .collect();
        bids.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bids
    }
}
