//! Cron tick that drives the due-reminder dispatcher.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::{error, info, trace, warn};

use fitpulse_core::config::scheduler::SchedulerConfig;
use fitpulse_core::{AppError, AppResult};

use crate::dispatcher::DueDispatcher;

/// Cron-driven tick loop for reminder dispatch.
///
/// Ticks are serialized with a try-lock: when a cycle outlives the tick
/// interval the next tick is skipped rather than piled on top of it.
pub struct TickScheduler {
    scheduler: JobScheduler,
}

impl std::fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickScheduler").finish()
    }
}

impl TickScheduler {
    /// Register the dispatch tick and start the scheduler.
    pub async fn start(
        config: &SchedulerConfig,
        dispatcher: Arc<DueDispatcher>,
    ) -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        let running = Arc::new(Mutex::new(()));
        let job = CronJob::new_async(config.cron.as_str(), move |_uuid, _lock| {
            let dispatcher = Arc::clone(&dispatcher);
            let running = Arc::clone(&running);
            Box::pin(async move {
                let Ok(_guard) = running.try_lock() else {
                    warn!("Previous dispatch cycle still running, skipping tick");
                    return;
                };
                match dispatcher.run_due_cycle().await {
                    Ok(summary) if summary.selected > 0 => {
                        info!(
                            selected = summary.selected,
                            fired = summary.fired,
                            failed = summary.failed,
                            skipped = summary.skipped,
                            "Dispatch cycle complete"
                        );
                    }
                    Ok(_) => trace!("Dispatch cycle found nothing due"),
                    Err(e) => error!(error = %e, "Dispatch cycle failed"),
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create dispatch schedule: {e}")))?;

        scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add dispatch schedule: {e}")))?;
        scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        info!(cron = %config.cron, "Reminder tick scheduler started");
        Ok(Self { scheduler })
    }

    /// Stop ticking. An in-flight cycle finishes on its own.
    pub async fn shutdown(&mut self) -> AppResult<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        info!("Reminder tick scheduler shut down");
        Ok(())
    }
}
