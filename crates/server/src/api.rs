//! HTTP API serving page view models, health checks and Prometheus metrics

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use monitor_lib::{
    aggregate::AlertSummary,
    health::{ComponentStatus, HealthRegistry},
    observability::{MonitorMetrics, StructuredLogger},
    views, AlertsTab, ClusterDetailTab, DataProvider, MonitorError, ReportsTab, TabState,
};
use prometheus::{Encoder, TextEncoder};
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DataProvider>,
    pub health_registry: HealthRegistry,
    pub metrics: MonitorMetrics,
    pub logger: StructuredLogger,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn DataProvider>,
        health_registry: HealthRegistry,
        metrics: MonitorMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            provider,
            health_registry,
            metrics,
            logger,
        }
    }

    /// Publish the current number of unacknowledged alerts, returning it
    pub async fn refresh_alert_gauge(&self) -> usize {
        let active = AlertSummary::from_alerts(&self.provider.list_alerts().await).active();
        self.metrics.set_active_alerts(active as i64);
        active
    }

    /// Build a view and record how long it took
    async fn render<T>(&self, view: &'static str, build: impl Future<Output = T>) -> T {
        let started = Instant::now();
        let rendered = build.await;
        self.metrics
            .observe_view(view, started.elapsed().as_secs_f64());
        rendered
    }
}

/// Error body: `{"error": {"code": ..., "message": ...}}`
pub struct ApiError(MonitorError);

impl From<MonitorError> for ApiError {
    fn from(err: MonitorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            MonitorError::ClusterNotFound(_) | MonitorError::AlertNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            MonitorError::UnknownTab { .. } => StatusCode::BAD_REQUEST,
            MonitorError::SlugConflict(_) => {
                error!(error = %self.0, "Catalog invariant violated");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = json!({
            "error": {
                "code": self.0.code(),
                "message": self.0.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TabParams {
    pub tab: Option<String>,
}

async fn dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let view = state
        .render("dashboard", views::dashboard(state.provider.as_ref()))
        .await;
    Json(view)
}

async fn clusters(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let view = state
        .render("clusters", views::clusters(state.provider.as_ref(), &params.q))
        .await;
    Json(view)
}

async fn cluster_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<TabParams>,
) -> Result<impl IntoResponse, ApiError> {
    let tabs = TabState::<ClusterDetailTab>::from_selection(params.tab.as_deref())?;
    let view = state
        .render(
            "cluster_detail",
            views::cluster_detail(state.provider.as_ref(), &id, tabs),
        )
        .await;

    if let Err(MonitorError::ClusterNotFound(_)) = &view {
        state.metrics.inc_lookup_miss("cluster");
        state.logger.log_cluster_lookup_miss(&id);
    }
    Ok(Json(view?))
}

async fn workflows(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let view = state
        .render("workflows", views::workflows(state.provider.as_ref(), &params.q))
        .await;
    Json(view)
}

/// Always returns the view; an unknown slug yields its `not_found` state with a 404
async fn workflow_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    let view = state
        .render(
            "workflow_detail",
            views::workflow_detail(state.provider.as_ref(), &slug),
        )
        .await;

    let status = if view.is_found() {
        StatusCode::OK
    } else {
        state.metrics.inc_lookup_miss("workflow");
        state.logger.log_workflow_lookup_miss(&slug);
        StatusCode::NOT_FOUND
    };
    (status, Json(view))
}

async fn alerts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TabParams>,
) -> Result<impl IntoResponse, ApiError> {
    let tabs = TabState::<AlertsTab>::from_selection(params.tab.as_deref())?;
    let view = state
        .render("alerts", views::alerts(state.provider.as_ref(), tabs))
        .await;
    Ok(Json(view))
}

async fn acknowledge_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<impl IntoResponse, ApiError> {
    let alert = match state.provider.acknowledge_alert(id).await {
        Ok(alert) => alert,
        Err(err) => {
            state.metrics.inc_lookup_miss("alert");
            return Err(err.into());
        }
    };

    state.metrics.inc_alerts_acknowledged();
    let remaining = state.refresh_alert_gauge().await;
    state
        .logger
        .log_alert_acknowledged(alert.id, &alert.title, remaining);

    Ok(Json(alert))
}

async fn reports(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TabParams>,
) -> Result<impl IntoResponse, ApiError> {
    let tabs = TabState::<ReportsTab>::from_selection(params.tab.as_deref())?;
    let view = state
        .render("reports", views::reports(state.provider.as_ref(), tabs))
        .await;
    Ok(Json(view))
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let results = state
        .render("search", state.provider.search(&params.q))
        .await;
    Json(results)
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy | ComponentStatus::Degraded => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %err, "Failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/dashboard", get(dashboard))
        .route("/api/v1/clusters", get(clusters))
        .route("/api/v1/clusters/:id", get(cluster_detail))
        .route("/api/v1/workflows", get(workflows))
        .route("/api/v1/workflows/:slug", get(workflow_detail))
        .route("/api/v1/alerts", get(alerts))
        .route("/api/v1/alerts/:id/acknowledge", post(acknowledge_alert))
        .route("/api/v1/reports", get(reports))
        .route("/api/v1/search", get(search))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
