//! Rank ladder and threshold evaluation.
//!
//! The ladder is an ordered table of (rank, minimum hours, minimum flights),
//! monotonically increasing in both dimensions. A pilot's rank is the highest
//! entry whose hour and flight minimums are both satisfied.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankThreshold {
    pub name: String,
    pub min_hours: f64,
    pub min_flights: i64,
}

impl RankThreshold {
    fn new(name: &str, min_hours: f64, min_flights: i64) -> Self {
        Self {
            name: name.to_string(),
            min_hours,
            min_flights,
        }
    }
}

/// The airline's default ladder. The first entry has zero minimums so every
/// pilot always satisfies at least one rank.
pub fn default_ladder() -> Vec<RankThreshold> {
    vec![
        RankThreshold::new("Cadet", 0.0, 0),
        RankThreshold::new("Second Officer", 10.0, 5),
        RankThreshold::new("First Officer", 50.0, 25),
        RankThreshold::new("Senior First Officer", 100.0, 50),
        RankThreshold::new("Captain", 250.0, 100),
        RankThreshold::new("Senior Captain", 500.0, 200),
    ]
}

/// The highest ladder entry whose minimums are both met by the given totals.
///
/// Totals that cross several rows at once land on the highest satisfied row,
/// not the next incremental one.
pub fn rank_for(ladder: &[RankThreshold], total_hours: f64, total_flights: i64) -> &RankThreshold {
    ladder
        .iter()
        .rev()
        .find(|rank| total_hours >= rank.min_hours && total_flights >= rank.min_flights)
        .unwrap_or(&ladder[0])
}

/// Position of a rank name in the ladder; unknown names sort below the
/// bottom so a stored rank from an older ladder never blocks promotion.
pub fn ladder_index(ladder: &[RankThreshold], name: &str) -> Option<usize> {
    ladder.iter().position(|rank| rank.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_totals_land_on_the_bottom_rank() {
        let ladder = default_ladder();
        assert_eq!(rank_for(&ladder, 0.0, 0).name, "Cadet");
    }

    #[test]
    fn both_minimums_must_be_met() {
        let ladder = default_ladder();
        // Plenty of hours but too few flights.
        assert_eq!(rank_for(&ladder, 75.0, 4).name, "Cadet");
        // Plenty of flights but too few hours.
        assert_eq!(rank_for(&ladder, 9.9, 40).name, "Cadet");
    }

    #[test]
    fn exact_thresholds_qualify() {
        let ladder = default_ladder();
        assert_eq!(rank_for(&ladder, 10.0, 5).name, "Second Officer");
    }

    #[test]
    fn crossing_two_rows_at_once_lands_on_the_highest() {
        let ladder = default_ladder();
        // Satisfies Second Officer AND First Officer in one jump.
        assert_eq!(rank_for(&ladder, 60.0, 30).name, "First Officer");
    }

    #[test]
    fn top_of_the_ladder() {
        let ladder = default_ladder();
        assert_eq!(rank_for(&ladder, 1200.0, 900).name, "Senior Captain");
    }

    #[test]
    fn ladder_index_orders_ranks() {
        let ladder = default_ladder();
        assert_eq!(ladder_index(&ladder, "Cadet"), Some(0));
        assert_eq!(ladder_index(&ladder, "Captain"), Some(4));
        assert_eq!(ladder_index(&ladder, "Wing Commander"), None);
    }
}
