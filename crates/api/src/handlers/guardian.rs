use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, instrument};

use guardian_domain::RuleAction;

use crate::dto::guardian::{
    AddRuleRequest, AddRuleResponse, BlocklistSourcesResponse, BlocklistUpdateResponse,
    GuardianStatusResponse, HealthResponse, RuleResponse, StatsResponse,
};
use crate::error::to_response;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/guardian/status", get(get_status))
        .route("/api/guardian/stats", get(get_stats))
        .route("/api/guardian/rules", get(list_rules).post(add_rule))
        .route("/api/guardian/rules/{id}", axum::routing::delete(remove_rule))
        .route("/api/guardian/blocklists", get(list_blocklists))
        .route("/api/guardian/blocklist/update", post(update_blocklists))
        .route("/api/guardian/health", get(health))
}

#[instrument(skip(state), name = "api_guardian_status")]
async fn get_status(State(state): State<AppState>) -> Json<GuardianStatusResponse> {
    match state.guardian_status.execute().await {
        Ok(status) => Json(status.into()),
        Err(err) => {
            error!(error = %err, "failed to read guardian status");
            Json(GuardianStatusResponse {
                cache_entries: 0,
                cache_hits: 0,
                cache_misses: 0,
                active_rules: 0,
                blocked_domains_indexed: 0,
            })
        }
    }
}

#[instrument(skip(state), name = "api_guardian_stats")]
async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.guardian_stats.execute().into())
}

#[instrument(skip(state), name = "api_guardian_list_rules")]
async fn list_rules(
    State(state): State<AppState>,
) -> Result<Json<Vec<RuleResponse>>, (StatusCode, String)> {
    let rules = state.guardian_list_rules.execute().await.map_err(to_response)?;
    Ok(Json(rules.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state), name = "api_guardian_add_rule")]
async fn add_rule(
    State(state): State<AppState>,
    Json(request): Json<AddRuleRequest>,
) -> Result<Json<AddRuleResponse>, (StatusCode, String)> {
    let action = RuleAction::from_str(&request.action).map_err(to_response)?;
    let id = state
        .guardian_add_rule
        .execute(action, &request.domain, &request.category, &request.reason)
        .await
        .map_err(to_response)?;
    Ok(Json(AddRuleResponse { id }))
}

#[instrument(skip(state), name = "api_guardian_remove_rule")]
async fn remove_rule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.guardian_remove_rule.execute(id).await.map_err(to_response)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state), name = "api_guardian_list_blocklists")]
async fn list_blocklists(
    State(state): State<AppState>,
) -> Result<Json<BlocklistSourcesResponse>, (StatusCode, String)> {
    let report = state.guardian_blocklist_sources.execute().await.map_err(to_response)?;
    Ok(Json(report.into()))
}

#[instrument(skip(state), name = "api_guardian_update_blocklists")]
async fn update_blocklists(
    State(state): State<AppState>,
) -> Result<Json<BlocklistUpdateResponse>, (StatusCode, String)> {
    let domains_synced =
        state.guardian_update_all_blocklists.execute().await.map_err(to_response)?;
    Ok(Json(BlocklistUpdateResponse { domains_synced }))
}

#[instrument(skip(state), name = "api_guardian_health")]
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let report = state.guardian_health.execute().await;
    Json(report.into())
}
