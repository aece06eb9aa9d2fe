use std::time::Duration;

use async_trait::async_trait;
use guardian_application::ports::AlertChannelPort;
use guardian_domain::{Alert, AlertDetail, AlertSeverity};
use serde_json::json;
use tracing::warn;

/// Webhook dispatch channel (C14): serializes the alert as JSON and POSTs it
/// with a bounded timeout. SPEC_FULL.md §4.14 — failures are logged and
/// absorbed, never propagated.
pub struct WebhookAlertChannelPort {
    http_client: reqwest::Client,
    webhook_url: String,
    min_severity: AlertSeverity,
    timeout: Duration,
}

impl WebhookAlertChannelPort {
    pub fn new(http_client: reqwest::Client, webhook_url: String, min_severity: AlertSeverity, timeout_ms: u64) -> Self {
        Self { http_client, webhook_url, min_severity, timeout: Duration::from_millis(timeout_ms) }
    }

    fn payload(alert: &Alert) -> serde_json::Value {
        let details = match &alert.details {
            AlertDetail::FieldChange { field, old_value, new_value } => {
                json!({ "field": field.as_ref(), "old_value": old_value.as_ref(), "new_value": new_value.as_ref() })
            }
            AlertDetail::Count(n) => json!({ "count": n }),
            AlertDetail::KeyValue(map) => json!(map),
        };
        json!({
            "severity": alert.severity.as_str(),
            "alert_type": alert.alert_type.as_str(),
            "ip": alert.ip.as_ref(),
            "mac": alert.mac.as_deref(),
            "message": alert.message,
            "details": details,
            "timestamp": alert.timestamp,
        })
    }
}

#[async_trait]
impl AlertChannelPort for WebhookAlertChannelPort {
    fn name(&self) -> &'static str {
        "webhook"
    }

    fn min_severity(&self) -> AlertSeverity {
        self.min_severity
    }

    async fn send(&self, alert: &Alert) -> bool {
        let result = self
            .http_client
            .post(&self.webhook_url)
            .timeout(self.timeout)
            .json(&Self::payload(alert))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(status = %response.status(), "webhook channel rejected alert");
                false
            }
            Err(e) => {
                warn!(error = %e, "webhook channel request failed");
                false
            }
        }
    }
}
