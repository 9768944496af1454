//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use core_kernel::{HealthCheckResult, HealthCheckable};

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Body of `/api/health`, kept compatible with the website's status page
#[derive(Serialize)]
pub struct ApiHealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub database_url_set: bool,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub checks: Vec<HealthCheckResult>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Database status for the website; always `200`
pub async fn api_health(State(state): State<AppState>) -> Json<ApiHealthResponse> {
    let store = state.intake.store().health_check().await;

    Json(ApiHealthResponse {
        status: "ok",
        database: if store.is_healthy() { "connected" } else { "error" },
        database_url_set: state.config.database_url_set(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        error_message: if store.is_healthy() { None } else { store.message },
    })
}

/// Readiness check
///
/// Only the submission store gates readiness. CRM and email are reported but
/// a degraded integration never takes the service out of rotation.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let store = state.intake.store().health_check().await;
    let ready = store.is_healthy();

    let mut checks = vec![store];
    if let Some(crm) = state.intake.crm() {
        checks.push(crm.port().health_check().await);
    }
    if let Some(notifier) = state.intake.notifier() {
        checks.push(notifier.mailer().health_check().await);
    }

    let (status, label) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status,
        Json(ReadinessResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks,
        }),
    )
}
