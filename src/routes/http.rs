// GET handlers: version, summary, health, dashboard data

use axum::{extract::State, response::IntoResponse};

use super::AppState;
use crate::charts;
use crate::summary;
use crate::version::{NAME, VERSION};

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /metrics/summary — latest sample per kind, health status, active alerts.
pub(super) async fn metrics_summary_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(summary::summarize(&state.store))
}

/// GET /metrics/health — health status and alerts only.
pub(super) async fn metrics_health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let summary = summary::summarize(&state.store);
    axum::Json(serde_json::json!({
        "status": summary.health_status,
        "timestamp": summary.timestamp,
        "alerts": summary.alerts,
    }))
}

/// GET /dashboard/data — one-shot version of the WS push payload, plus the
/// performance score and subscriber count.
pub(super) async fn dashboard_data_handler(State(state): State<AppState>) -> impl IntoResponse {
    let summary = summary::summarize(&state.store);
    let charts = charts::render_charts(&state.store, state.config.dashboard.chart_history_points);
    let score = summary::performance_score(&summary);
    axum::Json(serde_json::json!({
        "summary": summary,
        "charts": charts,
        "performanceScore": score,
        "activeConnections": state.registry.active_count(),
    }))
}
