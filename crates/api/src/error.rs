use axum::http::StatusCode;
use guardian_domain::DomainError;

/// Maps a `DomainError` to the HTTP status the API surface reports it under.
/// Persistence/upstream failures stay opaque to the caller; validation and
/// lookup failures carry their message through.
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidDomainName(_)
        | DomainError::InvalidIpAddress(_)
        | DomainError::InvalidAction(_)
        | DomainError::InvalidRuleType(_)
        | DomainError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
        DomainError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        DomainError::PidConflict(_) => StatusCode::CONFLICT,
        DomainError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
        DomainError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn to_response(err: DomainError) -> (StatusCode, String) {
    let status = status_for(&err);
    (status, err.to_string())
}
