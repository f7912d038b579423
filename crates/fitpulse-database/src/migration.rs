//! Embedded migration runner.

use sqlx::PgPool;
use tracing::info;

use fitpulse_core::error::{AppError, ErrorKind};

/// Apply any pending migrations from the workspace `migrations/` directory.
///
/// Runs at startup before anything else touches the schema; already-applied
/// migrations are skipped via sqlx's bookkeeping table.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Applying database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
        })?;

    info!("Database schema up to date");
    Ok(())
}
