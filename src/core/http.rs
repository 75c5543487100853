//! Operational HTTP endpoints using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::bot::Session;
use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(session: Arc<Session>, metrics: Arc<Metrics>) -> Self {
        Self {
            session,
            metrics,
            start_time: Arc::new(Instant::now()),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "subscribed": state.session.is_subscribed(),
        "service": "signalbot"
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn count_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.metrics.http_requests_total.inc();
    next.run(request).await
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn_with_state(state.clone(), count_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(port: u16, state: AppState) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port = port, "HTTP server listening on 0.0.0.0:{}", port);
    axum::serve(listener, create_router(state)).await
}
