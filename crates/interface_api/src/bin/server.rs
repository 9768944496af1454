//! Lead Intake - API Server Binary
//!
//! Starts the HTTP API: form intake, admin listings, health checks and the
//! built frontend bundle.
//!
//! # Usage
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run --bin leads-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` / `HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` / `PORT` - Server port (default: 5000)
//! * `API_DATABASE_URL` / `DATABASE_URL` - PostgreSQL connection string (required)
//! * `API_JWT_SECRET` - Secret for admin bearer tokens
//! * `API_LOG_LEVEL` / `RUST_LOG` - Log filter (default: info)
//! * `API_LOG_FORMAT` - `pretty` or `json`
//! * `API_STATIC_DIR` - Frontend bundle directory (default: dist/public)
//! * `API_CRM_ENABLED` - Mirror submissions into HubSpot (default: true)
//! * `HUBSPOT_ACCESS_TOKEN` - HubSpot private-app token
//! * `API_NOTIFICATIONS_ENABLED` - Send emails through Resend (default: false)
//! * `RESEND_API_KEY` - Resend API key
//! * `ADMIN_EMAIL` - Recipient of admin notifications
//! * `REPLIT_CONNECTORS_HOSTNAME`, `REPL_IDENTITY`, `WEB_REPL_RENEWAL` -
//!   connector service used when no token or key is configured

use anyhow::{bail, Context};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_crm::{CrmSync, HubSpotAdapter};
use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresSubmissionStore};
use infra_email::{Notifier, ResendMailer};
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState, LeadIntake, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::load().context("failed to load configuration")?;
    init_tracing(&config.log_level, config.log_format);

    info!(host = %config.host, port = config.port, "Starting lead intake API server");

    if !config.database_url_set() {
        bail!("DATABASE_URL is not set");
    }

    let pool = create_pool(DatabaseConfig::new(config.database_url.clone()))
        .await
        .context("failed to connect to the database")?;
    run_migrations(&pool).await.context("failed to run migrations")?;

    let intake = build_intake(&config, PostgresSubmissionStore::new(pool))?;
    let app = create_router(AppState::new(intake, config.clone()));

    let addr: SocketAddr = config.server_addr().parse().context("invalid server address")?;
    info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wires the CRM and email integrations that are configured
fn build_intake(config: &ApiConfig, store: PostgresSubmissionStore) -> anyhow::Result<LeadIntake> {
    let mut intake = LeadIntake::new(Arc::new(store));

    if config.crm_enabled {
        match config.hubspot_credentials()? {
            Some(credentials) => {
                let hubspot = HubSpotAdapter::new(config.hubspot_config(), credentials)?;
                intake = intake.with_crm(CrmSync::new(Arc::new(hubspot), config.retry_policy()));
                info!("CRM sync enabled");
            }
            None => warn!("No HubSpot token or connector configured, CRM sync disabled"),
        }
    }

    if config.notifications_enabled {
        match config.resend_credentials()? {
            Some(credentials) => {
                let mailer = ResendMailer::new(config.resend_config(), credentials)?;
                intake = intake.with_notifier(Notifier::new(Arc::new(mailer), config.admin_email.clone()));
                info!(admin_email = %config.admin_email, "Email notifications enabled");
            }
            None => warn!("No Resend key or connector configured, email notifications disabled"),
        }
    }

    Ok(intake)
}

/// Initializes the tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests, including their CRM sync, run to completion.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
