use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::handlers::{firewall, guardian, threat};
use crate::state::AppState;

async fn liveness() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Merges the Guardian, Threat Intelligence, and Firewall route groups
/// behind one shared `AppState`, plus a bare liveness probe for load
/// balancers that shouldn't pay the cost of `/api/guardian/health`.
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .merge(guardian::routes())
        .merge(threat::routes())
        .merge(firewall::routes())
        .with_state(state)
}
