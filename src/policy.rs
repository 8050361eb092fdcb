use tracing::warn;

/// Numeric adjudication thresholds and reward coefficients.
///
/// Pure configuration: defaults compiled in, individual values overridable
/// through the environment. Parse failures fall back to the default rather
/// than aborting startup.
#[derive(Debug, Clone)]
pub struct ThresholdPolicy {
    /// Landing rates at or below this floor (fpm, negative is downward)
    /// reject the PIREP outright.
    pub landing_rate_reject_floor: f64,

    /// Scores at or above this value auto-approve; anything between the
    /// floor and this value goes to manual review.
    pub min_auto_approve_score: f64,

    /// Reward coefficients: points per flight minute and per nautical mile.
    pub points_per_minute: f64,
    pub points_per_nm: f64,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            landing_rate_reject_floor: -600.0,
            min_auto_approve_score: 85.0,
            points_per_minute: 10.0,
            points_per_nm: 5.0,
        }
    }
}

impl ThresholdPolicy {
    /// Build the policy from the environment, keeping defaults for anything
    /// unset or unparseable.
    pub fn from_env() -> Self {
        let mut policy = Self::default();
        policy.landing_rate_reject_floor =
            env_f64("VATRACK_REJECT_FLOOR", policy.landing_rate_reject_floor);
        policy.min_auto_approve_score =
            env_f64("VATRACK_MIN_SCORE", policy.min_auto_approve_score);
        policy.points_per_minute = env_f64("VATRACK_POINTS_PER_MINUTE", policy.points_per_minute);
        policy.points_per_nm = env_f64("VATRACK_POINTS_PER_NM", policy.points_per_nm);
        policy
    }
}

fn env_f64(var: &str, default: f64) -> f64 {
    match std::env::var(var) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring unparseable {} value '{}'", var, raw);
                default
            }
        },
        Err(_) => default,
    }
}
