//! Fixed-window admission control keyed by client address.
//!
//! The only shared mutable resource outside the repositories: a concurrent
//! counter map. Requests over the per-window limit are answered immediately
//! with 429 rather than queued. A background sweep evicts windows that have
//! expired so idle clients do not accumulate.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use serde_json::json;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

pub struct RateLimiter {
    windows: DashMap<IpAddr, Window>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            limit,
            window,
        }
    }

    /// Limiter configured from `VATRACK_RATE_LIMIT` and
    /// `VATRACK_RATE_WINDOW_SECS`, defaulting to 120 requests per 10 s.
    pub fn from_env() -> Self {
        let limit = std::env::var("VATRACK_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(120);
        let window_secs = std::env::var("VATRACK_RATE_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        Self::new(limit, Duration::from_secs(window_secs))
    }

    /// Count a request from `addr`. Returns false when the client has
    /// exhausted its window. The counter update runs under a single map
    /// entry, safe against concurrent ticks from the same client.
    pub fn allow(&self, addr: IpAddr) -> bool {
        let now = Instant::now();
        let mut entry = self.windows.entry(addr).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        entry.count += 1;
        entry.count <= self.limit
    }

    /// Drop expired windows. Called periodically from a background task.
    pub fn sweep(&self) {
        let now = Instant::now();
        let window = self.window;
        let mut evicted = 0usize;
        self.windows.retain(|_, w| {
            let keep = now.duration_since(w.started) < window;
            if !keep {
                evicted += 1;
            }
            keep
        });
        if evicted > 0 {
            debug!("Rate limiter evicted {} idle windows", evicted);
        }
    }
}

/// Axum middleware applying the limiter from `AppState`.
///
/// Falls back to the unspecified address when no peer address is attached
/// (in-process test clients), so the limiter still counts those requests.
pub async fn rate_limit_middleware(
    State(state): State<crate::web::AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if !state.limiter.allow(addr) {
        warn!("Rate limit exceeded for {}", addr);
        metrics::counter!("http.rate_limited").increment(1);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            axum::Json(json!({"error": "Rate limit exceeded, slow down"})),
        )
            .into_response();
    }

    next.run(request).await
}
