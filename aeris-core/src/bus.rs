//! AlertBus — broadcast fan-out of alerts to zero or more subscribers.
//!
//! The dashboard, logger, and report collector all consume the same stream.
//! Publishing never blocks; with no subscribers the alert is dropped.

use tokio::sync::broadcast;

use crate::alert::Alert;

/// Default channel capacity. Slow receivers lag past this many alerts.
pub const BUS_CHANNEL_CAP: usize = 256;

/// Clone freely — all clones share the same underlying channel.
#[derive(Clone)]
pub struct AlertBus {
    tx: broadcast::Sender<Alert>,
}

impl AlertBus {
    /// Create a bus with the default channel capacity.
    pub fn new() -> Self {
        Self::with_capacity(BUS_CHANNEL_CAP)
    }

    /// Create a bus with an explicit channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to the alert stream.
    ///
    /// Slow receivers see [`broadcast::error::RecvError::Lagged`] when they
    /// fall more than the channel capacity behind.
    pub fn subscribe(&self) -> broadcast::Receiver<Alert> {
        self.tx.subscribe()
    }

    /// Publish an alert to all current subscribers (non-blocking).
    pub fn publish(&self, alert: Alert) {
        // send() only fails when there are no receivers, which is fine.
        let _ = self.tx.send(alert);
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for AlertBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::{AlertKind, Severity};
    use crate::telemetry::Subsystem;

    fn test_alert() -> Alert {
        Alert::new(
            AlertKind::Anomaly,
            "UAV_1",
            Subsystem::Power,
            Severity::Medium,
            "test",
            serde_json::json!({}),
        )
    }

    #[tokio::test]
    async fn publish_reaches_all_subscribers() {
        let bus = AlertBus::new();
        let mut rx_a = bus.subscribe();
        let mut rx_b = bus.subscribe();

        bus.publish(test_alert());

        assert_eq!(rx_a.recv().await.unwrap().entity_id, "UAV_1");
        assert_eq!(rx_b.recv().await.unwrap().entity_id, "UAV_1");
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_noop() {
        let bus = AlertBus::new();
        bus.publish(test_alert());
        assert_eq!(bus.subscriber_count(), 0);
    }
}
