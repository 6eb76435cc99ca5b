//! Detached scrape-job execution.
//!
//! Submission is fire-and-forget: the HTTP handler inserts a `submitted`
//! run, hands the query to [`JobRunner::spawn`], and responds immediately.
//! Everything that happens afterwards is visible only as run status plus
//! structured logs; a job task never propagates an error to its submitter.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::Semaphore;

use leadscout_core::{AppConfig, SearchQuery};
use leadscout_db::{complete_scrape_run, fail_scrape_run, insert_leads, start_scrape_run};
use leadscout_scraper::{PageSource, ScrapePipeline};

pub struct JobRunner {
    pool: PgPool,
    config: Arc<AppConfig>,
    source: Arc<dyn PageSource>,
    /// Bounds the number of concurrently running browser sessions.
    limiter: Arc<Semaphore>,
}

impl JobRunner {
    #[must_use]
    pub fn new(pool: PgPool, config: Arc<AppConfig>, source: Arc<dyn PageSource>) -> Self {
        let limiter = Arc::new(Semaphore::new(config.scraper_max_concurrent_jobs));
        Self {
            pool,
            config,
            source,
            limiter,
        }
    }

    /// Schedules `run` on a detached tokio task and returns immediately.
    pub fn spawn(self: &Arc<Self>, run_id: i64, query: SearchQuery) {
        let runner = Arc::clone(self);
        tokio::spawn(async move {
            runner.run(run_id, &query).await;
        });
    }

    /// Executes one scrape job end to end. Infallible by contract: every
    /// failure is recorded on the run row and logged, never returned.
    pub async fn run(&self, run_id: i64, query: &SearchQuery) {
        let permit = match self.limiter.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                tracing::error!(run_id, error = %e, "job semaphore closed, dropping job");
                return;
            }
        };

        if let Err(e) = start_scrape_run(&self.pool, run_id).await {
            tracing::error!(run_id, error = %e, "could not transition run to running");
            drop(permit);
            return;
        }

        tracing::info!(
            run_id,
            keywords = query.keywords(),
            location = query.location(),
            "scrape job started"
        );

        let pipeline = ScrapePipeline::from_app_config(Arc::clone(&self.source), &self.config);

        let result = match pipeline.run(query).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(run_id, error = %e, "scrape job failed");
                self.mark_failed(run_id, &e.to_string()).await;
                drop(permit);
                return;
            }
        };

        if let Err(e) = insert_leads(&self.pool, run_id, &result.leads).await {
            tracing::error!(run_id, error = %e, "could not persist extracted leads");
            self.mark_failed(run_id, "failed to persist extracted leads")
                .await;
            drop(permit);
            return;
        }

        let leads_found = i32::try_from(result.count()).unwrap_or(i32::MAX);
        if let Err(e) = complete_scrape_run(&self.pool, run_id, leads_found).await {
            tracing::error!(run_id, error = %e, "could not transition run to completed");
        } else {
            tracing::info!(run_id, leads_found, "scrape job completed");
        }
        drop(permit);
    }

    async fn mark_failed(&self, run_id: i64, message: &str) {
        if let Err(e) = fail_scrape_run(&self.pool, run_id, message).await {
            tracing::error!(run_id, error = %e, "could not transition run to failed");
        }
    }
}
