//! Cron scheduler for the draft finalize sweep

use std::sync::Arc;

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{config::DraftConfig, services::DraftService};

/// Scheduler that closes expired drafts on a cron schedule
pub struct DraftScheduler {
    settings: DraftConfig,
    draft_service: Arc<DraftService>,
    scheduler: JobScheduler,
}

impl DraftScheduler {
    /// Create a new draft scheduler
    pub async fn new(settings: DraftConfig, draft_service: Arc<DraftService>) -> Result<Self> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            settings,
            draft_service,
            scheduler,
        })
    }

    /// Register the finalize job when enabled
    pub async fn setup_jobs(&mut self) -> Result<()> {
        if self.settings.finalize_enabled {
            self.add_finalize_job().await?;
        } else {
            tracing::info!("Draft finalize job disabled");
        }

        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<()> {
        self.scheduler.start().await?;
        Ok(())
    }

    /// Shutdown the scheduler gracefully
    pub async fn shutdown(&mut self) -> Result<()> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    async fn add_finalize_job(&self) -> Result<()> {
        let draft_service = self.draft_service.clone();
        let cron_expr = self.settings.finalize_cron.clone();

        tracing::info!("Adding draft finalize job: {}", cron_expr);

        let job = Job::new_async(cron_expr.as_str(), move |_uuid, _lock| {
            let draft_service = draft_service.clone();

            Box::pin(async move {
                tracing::debug!("Running draft finalize job");

                match draft_service.finalize_expired_drafts().await {
                    Ok(summary) if summary.leagues_finalized > 0 => {
                        tracing::info!(
                            "Draft finalize: leagues={}, auto_picks={}, short_pool={}, failed={}",
                            summary.leagues_finalized,
                            summary.picks_auto_assigned,
                            summary.short_pool_leagues.len(),
                            summary.failed_leagues.len()
                        );
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!("Draft finalize failed: {}", e);
                    }
                }
            })
        })?;

        self.scheduler.add(job).await?;
        Ok(())
    }
}
