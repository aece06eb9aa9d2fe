use std::sync::Arc;

use guardian_domain::Alert;
use tracing::warn;

use crate::ports::{AlertChannelPort, AlertStorePort};

/// Alert Pipeline dispatch (C14): record the alert, then fan it out to every
/// configured channel whose severity floor it clears. Channels are
/// independent — one failing must not block the others, so failures are
/// logged and absorbed rather than short-circuiting the loop.
pub struct DispatchAlertsUseCase {
    store: Arc<dyn AlertStorePort>,
    channels: Vec<Arc<dyn AlertChannelPort>>,
}

impl DispatchAlertsUseCase {
    pub fn new(store: Arc<dyn AlertStorePort>, channels: Vec<Arc<dyn AlertChannelPort>>) -> Self {
        Self { store, channels }
    }

    /// Returns the number of channels that accepted the alert.
    pub async fn execute(&self, alert: &Alert) -> usize {
        if let Err(e) = self.store.record(alert).await {
            warn!(error = %e, alert_type = alert.alert_type.as_str(), "failed to persist alert");
        }

        let mut delivered = 0;
        for channel in &self.channels {
            if alert.severity < channel.min_severity() {
                continue;
            }
            if channel.send(alert).await {
                delivered += 1;
            } else {
                warn!(channel = channel.name(), alert_type = alert.alert_type.as_str(), "alert delivery failed");
            }
        }
        delivered
    }
}
