use async_trait::async_trait;
use guardian_domain::{Alert, AlertSeverity};

/// Application-facing port for one Alert Pipeline dispatch channel (C14).
/// Channels are independent; one failing must not block others, so
/// delivery failures are reported, not propagated as hard errors.
#[async_trait]
pub trait AlertChannelPort: Send + Sync {
    fn name(&self) -> &'static str;

    /// Per-channel severity floor; alerts below it are skipped before
    /// `send` is even called.
    fn min_severity(&self) -> AlertSeverity;

    /// Returns `true` on a successful delivery, `false` on an absorbed
    /// failure (logged by the caller).
    async fn send(&self, alert: &Alert) -> bool;
}
