use thiserror::Error;

/// Error taxonomy for the Guardian core, one variant family per §7 bucket.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("invalid rule action: {0}")]
    InvalidAction(String),

    #[error("invalid firewall rule type: {0}")]
    InvalidRuleType(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("rate limited")]
    RateLimited,

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("PID file held by a live process: {0}")]
    PidConflict(u32),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
