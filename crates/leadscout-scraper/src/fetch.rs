//! Browser-driven page fetching.
//!
//! The target site populates its results container asynchronously, so a
//! plain HTTP GET sees an empty shell; each fetch drives a real headless
//! Chrome session over CDP instead. One isolated session per invocation,
//! torn down on every exit path.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;

use leadscout_core::{AppConfig, SearchQuery};

use crate::error::FetchError;
use crate::extract::RESULTS_SELECTOR;
use crate::query::search_url;

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A source of rendered search-results markup.
///
/// The trait is the seam between the orchestrator and the browser: the
/// production implementation is [`BrowserFetcher`], tests substitute stubs.
/// The method returns a boxed future so the trait stays object-safe.
pub trait PageSource: Send + Sync {
    /// Fetches the rendered results page for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the page cannot be loaded or its results
    /// container never renders within the configured bounds.
    fn fetch<'a>(
        &'a self,
        query: &'a SearchQuery,
    ) -> Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>>;
}

/// Headless-Chrome implementation of [`PageSource`].
///
/// Navigation and selector waits are independent, configurable bounds. On
/// any failure a best-effort diagnostic screenshot of the current page state
/// is written before the error is reported; the screenshot is a debug aid,
/// not part of the contract.
pub struct BrowserFetcher {
    search_base_url: String,
    results_selector: String,
    navigation_timeout: Duration,
    selector_timeout: Duration,
    screenshot_path: PathBuf,
}

impl BrowserFetcher {
    #[must_use]
    pub fn new(
        search_base_url: impl Into<String>,
        navigation_timeout: Duration,
        selector_timeout: Duration,
        screenshot_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            search_base_url: search_base_url.into(),
            results_selector: RESULTS_SELECTOR.to_string(),
            navigation_timeout,
            selector_timeout,
            screenshot_path: screenshot_path.into(),
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(
            config.scraper_search_base_url.clone(),
            Duration::from_secs(config.scraper_navigation_timeout_secs),
            Duration::from_secs(config.scraper_selector_timeout_secs),
            config.scraper_screenshot_path.clone(),
        )
    }

    /// Launches an isolated browser session, renders `url`, and returns the
    /// page HTML once the results container has appeared.
    ///
    /// The session is closed on every exit path, success or failure.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on launch, navigation, or selector-wait
    /// failure.
    pub async fn fetch_rendered(&self, url: &str) -> Result<String, FetchError> {
        // Sandbox restrictions are disabled for container compatibility.
        let browser_config = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-setuid-sandbox")
            .build()
            .map_err(|reason| FetchError::Launch { reason })?;

        let (mut browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| FetchError::Launch {
                    reason: e.to_string(),
                })?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let result = self.drive(&browser, url).await;

        // Teardown runs on every path out of `drive`.
        if let Err(e) = browser.close().await {
            tracing::warn!(error = %e, "failed to close browser session");
        }
        if let Err(e) = browser.wait().await {
            tracing::warn!(error = %e, "browser process did not exit cleanly");
        }
        handler_task.abort();

        result
    }

    async fn drive(&self, browser: &Browser, url: &str) -> Result<String, FetchError> {
        let page = browser.new_page("about:blank").await?;
        let outcome = self.navigate_and_read(&page, url).await;
        if outcome.is_err() {
            self.capture_failure_screenshot(&page).await;
        }
        outcome
    }

    async fn navigate_and_read(&self, page: &Page, url: &str) -> Result<String, FetchError> {
        let navigation = async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            Ok::<(), CdpError>(())
        };

        match tokio::time::timeout(self.navigation_timeout, navigation).await {
            Err(_) => {
                return Err(FetchError::Timeout {
                    url: url.to_owned(),
                    timeout_secs: self.navigation_timeout.as_secs(),
                })
            }
            Ok(Err(source)) => {
                return Err(FetchError::NavigationFailed {
                    url: url.to_owned(),
                    source,
                })
            }
            Ok(Ok(())) => {}
        }

        // "Page loaded" is not "results rendered": the container is
        // populated asynchronously, so poll for it separately.
        self.wait_for_results(page).await?;

        Ok(page.content().await?)
    }

    async fn wait_for_results(&self, page: &Page) -> Result<(), FetchError> {
        let deadline = tokio::time::Instant::now() + self.selector_timeout;
        loop {
            if page
                .find_element(self.results_selector.as_str())
                .await
                .is_ok()
            {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(FetchError::SelectorNotFound {
                    selector: self.results_selector.clone(),
                    timeout_secs: self.selector_timeout.as_secs(),
                });
            }
            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn capture_failure_screenshot(&self, page: &Page) {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();

        match page.save_screenshot(params, &self.screenshot_path).await {
            Ok(_) => tracing::info!(
                path = %self.screenshot_path.display(),
                "saved diagnostic screenshot of failed fetch"
            ),
            Err(e) => tracing::warn!(error = %e, "could not capture diagnostic screenshot"),
        }
    }
}

impl PageSource for BrowserFetcher {
    fn fetch<'a>(
        &'a self,
        query: &'a SearchQuery,
    ) -> Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let url = search_url(&self.search_base_url, query);
            tracing::info!(%url, "fetching search results page");
            self.fetch_rendered(&url).await
        })
    }
}
