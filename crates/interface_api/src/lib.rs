//! HTTP API Layer
//!
//! This crate provides the REST API of the lead intake service using Axum.
//!
//! # Architecture
//!
//! - **Intake**: validate, persist, sync to the CRM, notify by email
//! - **Handlers**: one module per form, plus health and CRM admin
//! - **Middleware**: bearer-token auth for admin routes, request logging
//! - **Error Handling**: German error bodies with field-level details
//!
//! Public form endpoints are unauthenticated. Listing endpoints and CRM
//! maintenance require a bearer token carrying the matching role.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState, LeadIntake};
//!
//! let intake = LeadIntake::new(store).with_crm(crm_sync);
//! let app = create_router(AppState::new(intake, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod auth;
pub mod middleware;
pub mod extract;
pub mod dto;
pub mod intake;
pub mod handlers;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::handlers::{admin, bookings, calculator, careers, health, partners};
use crate::middleware::{auth_middleware, request_log_middleware};

pub use crate::config::LogFormat;
pub use crate::error::ErrorResponse;
pub use crate::intake::LeadIntake;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub intake: Arc<LeadIntake>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(intake: LeadIntake, config: ApiConfig) -> Self {
        Self {
            intake: Arc::new(intake),
            config: Arc::new(config),
        }
    }
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound("route".to_string())
}

/// Creates the main router
///
/// When `config.static_dir` exists, every path outside `/api` and `/health`
/// is served from it, with `index.html` as the single-page-app fallback.
pub fn create_router(state: AppState) -> Router {
    // Public form endpoints
    let public_routes = Router::new()
        .route("/health", get(health::api_health))
        .route("/anfrage", post(bookings::create_booking))
        .route("/booking", post(bookings::create_booking))
        .route("/calculator/send-results", post(calculator::send_results))
        .route("/partner", post(partners::register_partner))
        .route("/karriere", post(careers::apply));

    // Admin endpoints, role checks in the handlers
    let protected_routes = Router::new()
        .route("/anfrage", get(bookings::list_bookings))
        .route("/calculator/submissions", get(calculator::list_submissions))
        .route("/partner", get(partners::list_registrations))
        .route("/karriere", get(careers::list_applications))
        .route("/admin/crm/properties", get(admin::crm_properties))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api_routes = public_routes
        .merge(protected_routes)
        .fallback(api_not_found)
        .layer(axum_middleware::from_fn(request_log_middleware));

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/api", api_routes);

    let static_dir = Path::new(&state.config.static_dir);
    if static_dir.is_dir() {
        info!(dir = %static_dir.display(), "Serving frontend bundle");
        let index = ServeFile::new(static_dir.join("index.html"));
        router = router.fallback_service(ServeDir::new(static_dir).fallback(index));
    } else {
        info!(dir = %static_dir.display(), "Static directory not found, serving API only");
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
