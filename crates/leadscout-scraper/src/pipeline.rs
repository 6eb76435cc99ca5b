//! Fetch-then-extract orchestration for a single scrape job.

use std::sync::Arc;

use leadscout_core::{AppConfig, Lead, SearchQuery, SourcePlatform};

use crate::error::FetchError;
use crate::extract::extract_leads;
use crate::fetch::PageSource;
use crate::pace::Pacer;
use crate::retry::retry_with_backoff;

/// The outcome of one completed scrape job.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeResult {
    /// Extracted leads, in document order. Possibly empty; an empty batch is
    /// a successful scrape of a page with no usable listings.
    pub leads: Vec<Lead>,
}

impl ScrapeResult {
    #[must_use]
    pub fn count(&self) -> usize {
        self.leads.len()
    }
}

/// Runs one search query end to end: fetch the rendered page (with bounded
/// retries on transient failures), then extract up to the configured number
/// of leads, pacing between listings.
///
/// The page source is behind a trait object so the pipeline is exercised
/// with stub sources in tests and with [`crate::BrowserFetcher`] in
/// production.
pub struct ScrapePipeline {
    source: Arc<dyn PageSource>,
    pacer: Pacer,
    listing_limit: usize,
    platform: SourcePlatform,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl ScrapePipeline {
    #[must_use]
    pub fn new(
        source: Arc<dyn PageSource>,
        pacer: Pacer,
        listing_limit: usize,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Self {
        Self {
            source,
            pacer,
            listing_limit,
            platform: SourcePlatform::IndiaMart,
            max_retries,
            backoff_base_secs,
        }
    }

    #[must_use]
    pub fn from_app_config(source: Arc<dyn PageSource>, config: &AppConfig) -> Self {
        Self::new(
            source,
            Pacer::new(config.scraper_pace_min_ms, config.scraper_pace_max_ms),
            config.scraper_listing_limit,
            config.scraper_max_retries,
            config.scraper_retry_backoff_base_secs,
        )
    }

    /// Executes the full scrape for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the page cannot be fetched even after
    /// retries. Extraction itself never fails; a page without usable
    /// listings yields an empty result.
    pub async fn run(&self, query: &SearchQuery) -> Result<ScrapeResult, FetchError> {
        let html = retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            self.source.fetch(query)
        })
        .await?;

        let leads = extract_leads(&html, self.listing_limit, self.platform, &self.pacer).await;
        tracing::info!(
            keywords = query.keywords(),
            location = query.location(),
            leads = leads.len(),
            "scrape completed"
        );
        Ok(ScrapeResult { leads })
    }
}
