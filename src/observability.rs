use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::routes::AppState;

/// Application health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    pub api: String,
    pub repository: String,
}

/// Application metrics
#[derive(Debug, Clone)]
pub struct AppMetrics {
    pub start_time: Instant,
    pub total_requests: Arc<RwLock<u64>>,
    pub successful_requests: Arc<RwLock<u64>>,
    pub not_found_requests: Arc<RwLock<u64>>,
    pub failed_requests: Arc<RwLock<u64>>,
    pub created_resources: Arc<RwLock<u64>>,
    pub deleted_resources: Arc<RwLock<u64>>,
}

impl AppMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            total_requests: Arc::new(RwLock::new(0)),
            successful_requests: Arc::new(RwLock::new(0)),
            not_found_requests: Arc::new(RwLock::new(0)),
            failed_requests: Arc::new(RwLock::new(0)),
            created_resources: Arc::new(RwLock::new(0)),
            deleted_resources: Arc::new(RwLock::new(0)),
        }
    }

    pub async fn increment_requests(&self) {
        *self.total_requests.write().await += 1;
    }

    /// Buckets a finished request by its response status.
    pub async fn record_status(&self, status: StatusCode) {
        match status {
            StatusCode::CREATED => {
                *self.created_resources.write().await += 1;
                *self.successful_requests.write().await += 1;
            }
            StatusCode::NO_CONTENT => {
                *self.deleted_resources.write().await += 1;
                *self.successful_requests.write().await += 1;
            }
            StatusCode::NOT_FOUND => *self.not_found_requests.write().await += 1,
            s if s.is_success() => *self.successful_requests.write().await += 1,
            _ => *self.failed_requests.write().await += 1,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts every request passing through the router.
pub async fn track_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    state.metrics.increment_requests().await;
    let response = next.run(request).await;
    state.metrics.record_status(response.status()).await;
    response
}

/// Health check endpoint handler
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.metrics.uptime_seconds();

    let (status, repository) = match state.repository.get_lists(Some(0), Some(1)).await {
        Ok(_) => ("healthy", "ok"),
        Err(e) => {
            warn!("Repository health check failed: {}", e);
            ("degraded", "error")
        }
    };

    let health = HealthStatus {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        checks: HealthChecks {
            api: "ok".to_string(),
            repository: repository.to_string(),
        },
    };

    info!(
        "Health check requested - status: {}, uptime: {}s",
        status, uptime
    );
    (StatusCode::OK, Json(health))
}

/// Metrics endpoint handler
#[derive(Debug, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub uptime_seconds: u64,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub not_found_requests: u64,
    pub failed_requests: u64,
    pub created_resources: u64,
    pub deleted_resources: u64,
    pub success_rate: f64,
}

pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let metrics = &state.metrics;
    let total = *metrics.total_requests.read().await;
    let success = *metrics.successful_requests.read().await;

    let success_rate = if total > 0 {
        (success as f64 / total as f64) * 100.0
    } else {
        100.0
    };

    let response = MetricsResponse {
        uptime_seconds: metrics.uptime_seconds(),
        total_requests: total,
        successful_requests: success,
        not_found_requests: *metrics.not_found_requests.read().await,
        failed_requests: *metrics.failed_requests.read().await,
        created_resources: *metrics.created_resources.read().await,
        deleted_resources: *metrics.deleted_resources.read().await,
        success_rate,
    };

    (StatusCode::OK, Json(response))
}

/// Initialize tracing subscriber for structured logging
pub fn init_tracing() {
    let filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "todo_api=info,tower_http=info".to_string());

    let filter_clone = filter.clone();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .json()
        .init();

    info!("Tracing initialized with filter: {}", filter_clone);
}
