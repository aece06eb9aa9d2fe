use std::net::Ipv4Addr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::instrument;

use crate::dto::threat::{
    SyncAllFeedsResponse, SyncSingleFeedResponse, ThreatFeedResponse, ThreatIndicatorResponse,
    ThreatStatsResponse,
};
use crate::error::to_response;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/threat/feeds", get(list_feeds))
        .route("/api/threat/feeds/sync", post(sync_all_feeds))
        .route("/api/threat/feeds/{name}/sync", post(sync_single_feed))
        .route("/api/threat/stats", get(get_stats))
        .route("/api/threat/lookup/{ip}", get(lookup))
}

#[instrument(skip(state), name = "api_threat_list_feeds")]
async fn list_feeds(
    State(state): State<AppState>,
) -> Result<Json<Vec<ThreatFeedResponse>>, (StatusCode, String)> {
    let feeds = state.threat_list_feeds.execute().await.map_err(to_response)?;
    Ok(Json(feeds.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state), name = "api_threat_sync_all_feeds")]
async fn sync_all_feeds(
    State(state): State<AppState>,
) -> Result<Json<SyncAllFeedsResponse>, (StatusCode, String)> {
    let report = state.threat_sync_all.execute().await.map_err(to_response)?;
    Ok(Json(report.into()))
}

#[instrument(skip(state), name = "api_threat_sync_single_feed")]
async fn sync_single_feed(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SyncSingleFeedResponse>, (StatusCode, String)> {
    let parser = state
        .threat_feed_parsers
        .get(name.as_str())
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown feed: {name}")))?;
    let indicators_fetched =
        state.threat_sync_single.execute(parser).await.map_err(to_response)?;
    Ok(Json(SyncSingleFeedResponse { indicators_fetched }))
}

#[instrument(skip(state), name = "api_threat_stats")]
async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ThreatStatsResponse>, (StatusCode, String)> {
    let summary = state.threat_stats.execute().await.map_err(to_response)?;
    Ok(Json(summary.into()))
}

#[instrument(skip(state), name = "api_threat_lookup")]
async fn lookup(
    State(state): State<AppState>,
    Path(ip): Path<Ipv4Addr>,
) -> Result<Json<Option<ThreatIndicatorResponse>>, (StatusCode, String)> {
    let indicator = state.threat_lookup.execute(ip).await.map_err(to_response)?;
    Ok(Json(indicator.map(Into::into)))
}
