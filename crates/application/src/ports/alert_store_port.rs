use async_trait::async_trait;
use guardian_domain::{Alert, DomainError};

/// Persistence for the Alert Pipeline's (C14) ambient `alerts` table. Every
/// evaluated alert is recorded once, independent of channel dispatch
/// outcome.
#[async_trait]
pub trait AlertStorePort: Send + Sync {
    async fn record(&self, alert: &Alert) -> Result<(), DomainError>;
}
