//! vatrack - flight lifecycle tracking and PIREP adjudication for a
//! virtual-airline pilot portal.
//!
//! The engine accepts live telemetry from a remote ACARS-style client,
//! maintains the single authoritative active flight per pilot, adjudicates
//! submitted flight reports against numeric thresholds, and advances pilot
//! rank and credit totals deterministically.

pub mod actions;
pub mod active_flights;
pub mod active_flights_repo;
pub mod adjudication;
pub mod auth;
pub mod bids;
pub mod bids_repo;
pub mod bonuses;
pub mod bonuses_repo;
pub mod commands;
pub mod events;
pub mod flight_reports;
pub mod flight_reports_repo;
pub mod pilots;
pub mod pilots_repo;
pub mod policy;
pub mod progression;
pub mod ranks;
pub mod rate_limit;
pub mod web;
