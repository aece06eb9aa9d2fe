use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::instrument;

use guardian_domain::{Direction, FirewallRule, FirewallRuleType, Protocol, RuleSource};
use guardian_infrastructure::firewall::platform::all_adapters;

use crate::dto::firewall::{
    AddFirewallRuleRequest, AddFirewallRuleResponse, DailyEventCountResponse,
    FirewallConfigResponse, FirewallEventResponse, FirewallRuleResponse, FirewallStatusResponse,
    SyncRulesResponse, ToggleFirewallRuleRequest, UpdateFirewallConfigRequest,
};
use crate::error::to_response;
use crate::state::AppState;

const DEFAULT_EVENT_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
struct LimitQuery {
    limit: Option<u32>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/firewall/status", get(get_status))
        .route("/api/firewall/rules", get(list_rules).post(add_rule))
        .route("/api/firewall/rules/{id}", axum::routing::delete(remove_rule))
        .route("/api/firewall/rules/{id}/toggle", put(toggle_rule))
        .route("/api/firewall/events", get(list_events))
        .route("/api/firewall/config", get(get_config).put(update_config))
        .route("/api/firewall/stats/daily", get(daily_stats))
        .route("/api/firewall/sync/threats", post(sync_threats))
        .route("/api/firewall/sync/ports", post(sync_ports))
        .route("/api/firewall/adapter/install", post(install_adapter))
}

#[instrument(skip(state), name = "api_firewall_status")]
async fn get_status(
    State(state): State<AppState>,
) -> Result<Json<FirewallStatusResponse>, (StatusCode, String)> {
    let status = state.firewall_status.execute().await.map_err(to_response)?;
    Ok(Json(FirewallStatusResponse::new(status, all_adapters())))
}

#[instrument(skip(state), name = "api_firewall_list_rules")]
async fn list_rules(
    State(state): State<AppState>,
) -> Result<Json<Vec<FirewallRuleResponse>>, (StatusCode, String)> {
    let rules = state.firewall_list_rules.execute().await.map_err(to_response)?;
    Ok(Json(rules.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state), name = "api_firewall_add_rule")]
async fn add_rule(
    State(state): State<AppState>,
    Json(request): Json<AddFirewallRuleRequest>,
) -> Result<Json<AddFirewallRuleResponse>, (StatusCode, String)> {
    let rule_type = FirewallRuleType::from_str(&request.rule_type).map_err(to_response)?;
    let direction = Direction::from_str(&request.direction).map_err(to_response)?;
    let protocol = Protocol::from_str(&request.protocol).map_err(to_response)?;

    let rule = FirewallRule {
        id: 0,
        rule_type,
        target: request.target.into(),
        direction,
        protocol,
        source: RuleSource::User,
        reason: request.reason.into(),
        is_active: true,
        created_at: chrono::Utc::now().to_rfc3339(),
        expires_at: request.expires_at,
        hit_count: 0,
    };

    let id = state.firewall_add_rule.execute(rule).await.map_err(to_response)?;
    Ok(Json(AddFirewallRuleResponse { id }))
}

#[instrument(skip(state), name = "api_firewall_remove_rule")]
async fn remove_rule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.firewall_remove_rule.execute(id).await.map_err(to_response)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state), name = "api_firewall_toggle_rule")]
async fn toggle_rule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ToggleFirewallRuleRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .firewall_toggle_rule
        .execute(id, request.is_active)
        .await
        .map_err(to_response)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state), name = "api_firewall_list_events")]
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<FirewallEventResponse>>, (StatusCode, String)> {
    let limit = query.limit.unwrap_or(DEFAULT_EVENT_LIMIT);
    let events = state.firewall_list_events.execute(limit).await.map_err(to_response)?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state), name = "api_firewall_daily_stats")]
async fn daily_stats(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<DailyEventCountResponse>>, (StatusCode, String)> {
    let limit = query.limit.unwrap_or(DEFAULT_EVENT_LIMIT);
    let counts = state.firewall_daily_stats.execute(limit).await.map_err(to_response)?;
    Ok(Json(counts.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state), name = "api_firewall_get_config")]
async fn get_config(State(state): State<AppState>) -> Json<FirewallConfigResponse> {
    let config = state.config.read().await;
    Json(FirewallConfigResponse {
        threat_score_threshold: config.firewall.threat_score_threshold,
        auto_sync_ports: config.firewall.auto_sync_ports,
    })
}

#[instrument(skip(state), name = "api_firewall_update_config")]
async fn update_config(
    State(state): State<AppState>,
    Json(request): Json<UpdateFirewallConfigRequest>,
) -> Result<Json<FirewallConfigResponse>, (StatusCode, String)> {
    if let Some(threshold) = request.threat_score_threshold {
        if !(0.0..=1.0).contains(&threshold) {
            return Err((StatusCode::BAD_REQUEST, "threat_score_threshold must be in [0.0, 1.0]".into()));
        }
    }

    let mut config = state.config.write().await;
    if let Some(threshold) = request.threat_score_threshold {
        config.firewall.threat_score_threshold = threshold;
    }
    if let Some(auto_sync) = request.auto_sync_ports {
        config.firewall.auto_sync_ports = auto_sync;
    }

    Ok(Json(FirewallConfigResponse {
        threat_score_threshold: config.firewall.threat_score_threshold,
        auto_sync_ports: config.firewall.auto_sync_ports,
    }))
}

#[instrument(skip(state), name = "api_firewall_sync_threats")]
async fn sync_threats(
    State(state): State<AppState>,
) -> Result<Json<SyncRulesResponse>, (StatusCode, String)> {
    let rules_inserted = state.firewall_sync_threat_rules.execute().await.map_err(to_response)?;
    Ok(Json(SyncRulesResponse { rules_inserted }))
}

#[instrument(skip(state), name = "api_firewall_sync_ports")]
async fn sync_ports(
    State(state): State<AppState>,
) -> Result<Json<SyncRulesResponse>, (StatusCode, String)> {
    let rules_inserted = state.firewall_sync_port_rules.execute().await.map_err(to_response)?;
    Ok(Json(SyncRulesResponse { rules_inserted }))
}

#[instrument(skip(state), name = "api_firewall_install_adapter")]
async fn install_adapter(State(state): State<AppState>) -> Result<StatusCode, (StatusCode, String)> {
    state.firewall_install_adapter.execute().await.map_err(to_response)?;
    Ok(StatusCode::NO_CONTENT)
}
