//! # Routes
//!
//! - `GET /`    service status: TTL and the strategy chosen at startup.
//! - `GET /nfl` the normalized projection list, cache-first.
//!
//! The router also carries the HTTP plumbing layers: request tracing,
//! permissive CORS, gzip compression and two hardening response headers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderValue;
use axum::http::header::{X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use axum::routing::get;
use axum::{Json, Router};
use lib_common::retrieve::PayloadSource;
use lib_common::sports::prizepicks::ProjectionRecord;
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::error::AppError;
use super::state::AppState;

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
    endpoint: &'static str,
    cache_ttl_sec: u64,
    priority: &'static str,
}

pub fn build_router<S: PayloadSource + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(status::<S>))
        .route("/nfl", get(nfl::<S>))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn status<S: PayloadSource + 'static>(State(state): State<AppState<S>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        endpoint: "/nfl",
        cache_ttl_sec: state.service.cache_ttl().as_secs(),
        priority: state.priority(),
    })
}

async fn nfl<S: PayloadSource + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Arc<Vec<ProjectionRecord>>>, AppError> {
    let records = state.service.get_projections().await?;
    Ok(Json(records))
}
