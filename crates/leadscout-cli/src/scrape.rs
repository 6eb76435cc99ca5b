//! Inline scrape command: one job, run to completion, with the same run
//! bookkeeping the server's detached jobs get.

use std::sync::Arc;

use leadscout_core::{AppConfig, SearchQuery};
use leadscout_db::{complete_scrape_run, create_scrape_run, fail_scrape_run, insert_leads,
    start_scrape_run};
use leadscout_scraper::{BrowserFetcher, ScrapePipeline};

pub(crate) async fn run(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    keywords: &str,
    location: &str,
    radius_km: i32,
) -> anyhow::Result<()> {
    let query = SearchQuery::new(keywords, location, radius_km)?;

    let run = create_scrape_run(pool, &query, "cli").await?;
    start_scrape_run(pool, run.id).await?;
    println!(
        "scrape run {} started (keywords: {:?}, location: {:?})",
        run.public_id,
        query.keywords(),
        query.location()
    );

    let fetcher = Arc::new(BrowserFetcher::from_app_config(config));
    let pipeline = ScrapePipeline::from_app_config(fetcher, config);

    let result = match pipeline.run(&query).await {
        Ok(result) => result,
        Err(e) => {
            fail_run_best_effort(pool, run.id, &e.to_string()).await;
            return Err(e.into());
        }
    };

    if let Err(e) = insert_leads(pool, run.id, &result.leads).await {
        fail_run_best_effort(pool, run.id, "failed to persist extracted leads").await;
        return Err(e.into());
    }

    let leads_found = i32::try_from(result.count()).unwrap_or(i32::MAX);
    complete_scrape_run(pool, run.id, leads_found).await?;

    println!("scrape run {} completed: {leads_found} lead(s)", run.public_id);
    for lead in &result.leads {
        println!(
            "  {} | phone: {} | address: {}",
            lead.business_name,
            lead.phone.as_deref().unwrap_or("-"),
            lead.address.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

async fn fail_run_best_effort(pool: &sqlx::PgPool, run_id: i64, message: &str) {
    if let Err(e) = fail_scrape_run(pool, run_id, message).await {
        tracing::error!(run_id, error = %e, "could not mark run as failed");
    }
}
