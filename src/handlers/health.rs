// handlers/health.rs - service index and health check

use axum::extract::State;
use serde::Serialize;
use tracing::error;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct Index {
    pub name: &'static str,
    pub version: &'static str,
    pub services: [&'static str; 3],
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub store: &'static str,
}

/// GET /
pub async fn root() -> ApiResult<Index> {
    Ok(ApiResponse::success(Index {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        services: ["trivia", "coffee", "listings"],
    }))
}

/// GET /health - 503 when the database does not answer
pub async fn health(State(state): State<AppState>) -> ApiResult<Health> {
    state.stores.health_check().await.map_err(|e| {
        error!("Health check failed: {}", e);
        ApiError::service_unavailable("database unavailable")
    })?;
    Ok(ApiResponse::success(Health {
        status: "ok",
        store: state.stores.backend_name(),
    }))
}
