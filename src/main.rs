//! FitPulse server binary.
//!
//! Loads configuration, connects the database, wires services and the
//! dispatch scheduler together, and serves the HTTP API.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use fitpulse_core::config::AppConfig;
use fitpulse_core::error::AppError;
use fitpulse_database::DatabasePool;
use fitpulse_database::repositories::{PgNotificationStore, PgReminderStore};
use fitpulse_entity::notification::NotificationSink;
use fitpulse_service::{NotificationService, ReminderService};
use fitpulse_worker::{DueDispatcher, TickScheduler};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("FITPULSE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FitPulse v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    fitpulse_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Initialize stores ────────────────────────────────
    let reminder_store = Arc::new(PgReminderStore::new(db.pool().clone()));
    let notification_store = Arc::new(PgNotificationStore::new(db.pool().clone()));

    // ── Step 3: Initialize services ──────────────────────────────
    let notification_service = Arc::new(NotificationService::new(notification_store));
    let sink: Arc<dyn NotificationSink> = notification_service.clone();
    let reminder_service = Arc::new(ReminderService::new(
        reminder_store.clone(),
        Arc::clone(&sink),
        config.reminders.clone(),
    ));
    tracing::info!("Services initialized");

    // ── Step 4: Start dispatch scheduler ─────────────────────────
    let tick_scheduler = if config.scheduler.enabled {
        let dispatcher = Arc::new(DueDispatcher::new(
            reminder_store.clone(),
            Arc::clone(&sink),
            config.scheduler.due_batch_limit,
        ));
        Some(TickScheduler::start(&config.scheduler, dispatcher).await?)
    } else {
        tracing::info!("Dispatch scheduler disabled");
        None
    };

    // ── Step 5: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = fitpulse_api::state::AppState {
        config: Arc::new(config),
        reminder_service,
        notification_service,
    };
    let app = fitpulse_api::router::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("FitPulse server listening on {addr}");

    // ── Step 6: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(mut scheduler) = tick_scheduler {
        scheduler.shutdown().await?;
    }
    db.close().await;

    tracing::info!("FitPulse server shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    #[cfg(unix)]
    let sigterm = async {
        let mut signal =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler");
        signal.recv().await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.expect("Failed to install Ctrl+C handler");
        }
        _ = sigterm => {}
    }
}
