use std::sync::Arc;

use dashmap::DashMap;

use crate::bonuses::FeaturedDestinationBonus;

/// Read-mostly store for featured-destination bonuses. The adjudication path
/// only ever reads it; activation happens through admin tooling outside this
/// engine.
#[derive(Clone, Default)]
pub struct BonusesRepository {
    bonuses: Arc<DashMap<uuid::Uuid, FeaturedDestinationBonus>>,
}

impl BonusesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a bonus and make it the single active one, deactivating any
    /// prior active record.
    pub fn set_active(&self, bonus: FeaturedDestinationBonus) {
        for mut entry in self.bonuses.iter_mut() {
            entry.active = false;
        }
        self.bonuses.insert(bonus.id, bonus);
    }

    /// Bonus points for a route: the active record's value when its ICAO
    /// matches either end of the route, otherwise zero.
    pub fn bonus_for_route(&self, departure_icao: &str, arrival_icao: &str) -> i64 {
        self.bonuses
            .iter()
            .find(|entry| {
                entry.active && (entry.icao == departure_icao || entry.icao == arrival_icao)
            })
            .map(|entry| entry.bonus_points)
            .unwrap_or(0)
    }
}
