//! Fire-and-forget portal events.
//!
//! Adjudication and tracking decide *that* something is worth announcing and
//! *what* the payload is; delivery belongs to a `NotificationSink`
//! collaborator fed through a bounded channel. Publishing never blocks a
//! request and sink failures never propagate back.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::flight_reports::ReportStatus;

/// Structured event emitted by the engine.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PortalEvent {
    Takeoff {
        pilot_id: String,
        pilot_name: String,
        callsign: String,
        departure_icao: String,
        arrival_icao: String,
        aircraft_type: String,
    },
    Landing {
        pilot_id: String,
        pilot_name: String,
        callsign: String,
        arrival_icao: String,
        landing_rate: f64,
        points: i64,
        status: ReportStatus,
    },
    Promotion {
        pilot_id: String,
        pilot_name: String,
        new_rank: String,
    },
}

/// Non-blocking sender half of the event pipeline.
#[derive(Clone)]
pub struct EventPublisher {
    tx: flume::Sender<PortalEvent>,
}

impl EventPublisher {
    /// Publish an event. A full or closed channel drops the event with a
    /// warning; the triggering request is never failed over it.
    pub fn publish(&self, event: PortalEvent) {
        if let Err(e) = self.tx.try_send(event) {
            warn!("Dropping portal event: {}", e);
            metrics::counter!("events.dropped").increment(1);
        }
    }
}

/// Create the publisher and its receiver. The receiver goes to
/// `run_dispatcher`; tests keep it to observe emitted events directly.
pub fn channel(capacity: usize) -> (EventPublisher, flume::Receiver<PortalEvent>) {
    let (tx, rx) = flume::bounded(capacity);
    (EventPublisher { tx }, rx)
}

/// Delivery collaborator. Implementations own transport (chat webhook,
/// email, ...); the engine only hands them structured payloads.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, event: &PortalEvent) -> anyhow::Result<()>;
}

/// Default sink: logs each event. Stands in wherever no real transport is
/// configured.
pub struct LoggingSink;

#[async_trait]
impl NotificationSink for LoggingSink {
    async fn deliver(&self, event: &PortalEvent) -> anyhow::Result<()> {
        match event {
            PortalEvent::Takeoff {
                pilot_id, callsign, departure_icao, arrival_icao, ..
            } => info!(
                "Takeoff: {} as {} {} -> {}",
                pilot_id, callsign, departure_icao, arrival_icao
            ),
            PortalEvent::Landing {
                pilot_id, callsign, landing_rate, points, ..
            } => info!(
                "Landing: {} as {} at {:.0} fpm for {} points",
                pilot_id, callsign, landing_rate, points
            ),
            PortalEvent::Promotion {
                pilot_id, new_rank, ..
            } => info!("Promotion: {} is now {}", pilot_id, new_rank),
        }
        Ok(())
    }
}

/// Drain the channel and feed the sink until all publishers are gone.
/// Runs as a spawned task beside the web server.
pub async fn run_dispatcher(rx: flume::Receiver<PortalEvent>, sink: Box<dyn NotificationSink>) {
    while let Ok(event) = rx.recv_async().await {
        metrics::counter!("events.dispatched").increment(1);
        if let Err(e) = sink.deliver(&event).await {
            // Delivery is best-effort by contract.
            warn!(error = %e, "Notification delivery failed");
        }
    }
    info!("Event dispatcher shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_to_a_full_channel_drops_instead_of_blocking() {
        let (publisher, rx) = channel(1);

        publisher.publish(PortalEvent::Promotion {
            pilot_id: "VA1001".to_string(),
            pilot_name: "Test".to_string(),
            new_rank: "Captain".to_string(),
        });
        publisher.publish(PortalEvent::Promotion {
            pilot_id: "VA1001".to_string(),
            pilot_name: "Test".to_string(),
            new_rank: "Senior Captain".to_string(),
        });

        // Second publish was dropped, first is intact.
        assert_eq!(rx.len(), 1);
    }

    #[tokio::test]
    async fn dispatcher_survives_sink_failures() {
        struct FailingSink;

        #[async_trait]
        impl NotificationSink for FailingSink {
            async fn deliver(&self, _event: &PortalEvent) -> anyhow::Result<()> {
                anyhow::bail!("transport down")
            }
        }

        let (publisher, rx) = channel(8);
        publisher.publish(PortalEvent::Promotion {
            pilot_id: "VA1001".to_string(),
            pilot_name: "Test".to_string(),
            new_rank: "Captain".to_string(),
        });
        drop(publisher);

        // Must run to completion without panicking.
        run_dispatcher(rx, Box::new(FailingSink)).await;
    }
}
