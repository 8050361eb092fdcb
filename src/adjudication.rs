//! Pure PIREP adjudication: threshold decision and reward arithmetic.
//!
//! The decision is terminal in one request. Rejection checks the landing
//! rate with `<=` against the floor; auto-approval checks the score with
//! `>=` against the minimum. A missing score counts as a perfect 100.

use crate::flight_reports::ReportStatus;
use crate::policy::ThresholdPolicy;

/// Score assumed when the client omits a quality signal.
pub const DEFAULT_SCORE: f64 = 100.0;

/// Apply the approval policy to a submitted report.
pub fn adjudicate(policy: &ThresholdPolicy, landing_rate: f64, score: Option<f64>) -> ReportStatus {
    if landing_rate <= policy.landing_rate_reject_floor {
        return ReportStatus::Rejected;
    }
    if score.unwrap_or(DEFAULT_SCORE) >= policy.min_auto_approve_score {
        return ReportStatus::Approved;
    }
    ReportStatus::Pending
}

/// Base reward before any destination bonus:
/// `round(minutes * points_per_minute + nm * points_per_nm)`.
pub fn base_points(policy: &ThresholdPolicy, flight_time_minutes: f64, distance_nm: f64) -> i64 {
    (flight_time_minutes * policy.points_per_minute + distance_nm * policy.points_per_nm).round()
        as i64
}
