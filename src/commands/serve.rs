use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::active_flights_repo::ActiveFlightsRepository;
use crate::auth::{JwtService, get_jwt_secret};
use crate::bids_repo::BidsRepository;
use crate::bonuses::FeaturedDestinationBonus;
use crate::bonuses_repo::BonusesRepository;
use crate::events::{self, LoggingSink};
use crate::flight_reports_repo::FlightReportsRepository;
use crate::pilots::Pilot;
use crate::pilots_repo::PilotsRepository;
use crate::policy::ThresholdPolicy;
use crate::ranks;
use crate::rate_limit::RateLimiter;
use crate::web::{AppState, start_web_server};

const EVENT_CHANNEL_CAPACITY: usize = 1024;
const LIMITER_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Run the portal engine: builds state, spawns the event dispatcher and the
/// rate-limiter sweeper, then serves until shutdown.
pub async fn handle_serve(interface: String, port: u16, demo: bool) -> Result<()> {
    let policy = ThresholdPolicy::from_env();
    info!(
        "Threshold policy: reject floor {:.0} fpm, min auto-approve score {:.0}",
        policy.landing_rate_reject_floor, policy.min_auto_approve_score
    );

    let (events, events_rx) = events::channel(EVENT_CHANNEL_CAPACITY);
    tokio::spawn(events::run_dispatcher(events_rx, Box::new(LoggingSink)));

    let limiter = Arc::new(RateLimiter::from_env());
    let sweeper = limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LIMITER_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sweeper.sweep();
        }
    });

    let state = AppState {
        pilots: PilotsRepository::new(),
        active_flights: ActiveFlightsRepository::new(),
        reports: FlightReportsRepository::new(),
        bids: BidsRepository::new(),
        bonuses: BonusesRepository::new(),
        policy: Arc::new(policy),
        ladder: Arc::new(ranks::default_ladder()),
        events,
        jwt: Arc::new(JwtService::new(&get_jwt_secret())),
        limiter,
    };

    if demo {
        seed_demo_data(&state)?;
    }

    start_web_server(interface, port, state).await
}

/// Seed a demo pilot and an active featured destination so a bare checkout
/// can exercise the full ACARS flow.
fn seed_demo_data(state: &AppState) -> Result<()> {
    let ladder = ranks::default_ladder();
    let pilot = Pilot::new(
        "VA1001".to_string(),
        "Demo Pilot".to_string(),
        bcrypt::hash("demo", bcrypt::DEFAULT_COST)?,
        ladder[0].name.clone(),
    );
    info!("Seeded demo pilot VA1001 (password 'demo')");
    state.pilots.insert(pilot);

    state.bonuses.set_active(FeaturedDestinationBonus::new(
        "LOWI".to_string(),
        500,
        "Demo".to_string(),
    ));
    info!("Seeded featured destination LOWI (+500)");

    Ok(())
}
