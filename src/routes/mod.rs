// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::registry::SubscriberRegistry;
use crate::store::MetricsStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<MetricsStore>,
    pub(crate) registry: Arc<SubscriberRegistry>,
    pub(crate) config: AppConfig,
}

pub fn app(
    store: Arc<MetricsStore>,
    registry: Arc<SubscriberRegistry>,
    config: AppConfig,
) -> Router {
    let state = AppState {
        store,
        registry,
        config,
    };
    Router::new()
        .route("/", get(|| async { "agentwatch: metrics core online" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/metrics/summary", get(http::metrics_summary_handler)) // GET /metrics/summary
        .route("/metrics/health", get(http::metrics_health_handler)) // GET /metrics/health
        .route("/dashboard/data", get(http::dashboard_data_handler)) // GET /dashboard/data
        .route("/ws/dashboard", get(ws::ws_dashboard)) // WS /ws/dashboard
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
