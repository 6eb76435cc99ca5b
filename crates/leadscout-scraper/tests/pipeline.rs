//! End-to-end pipeline tests over stub page sources.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use leadscout_core::SearchQuery;
use leadscout_scraper::{FetchError, PageSource, Pacer, ScrapePipeline};

/// Serves a fixed HTML document for every query.
struct FixtureSource {
    html: String,
}

impl PageSource for FixtureSource {
    fn fetch<'a>(
        &'a self,
        _query: &'a SearchQuery,
    ) -> Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.html.clone()) })
    }
}

/// Fails every fetch with a navigation timeout.
struct TimeoutSource {
    calls: AtomicU32,
}

impl PageSource for TimeoutSource {
    fn fetch<'a>(
        &'a self,
        _query: &'a SearchQuery,
    ) -> Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(FetchError::Timeout {
                url: "https://dir.indiamart.com/search.mp?ss=x&cq=y".to_owned(),
                timeout_secs: 60,
            })
        })
    }
}

/// Fails the first `failures` fetches, then serves the document.
struct FlakySource {
    failures: u32,
    calls: AtomicU32,
    html: String,
}

impl PageSource for FlakySource {
    fn fetch<'a>(
        &'a self,
        _query: &'a SearchQuery,
    ) -> Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(FetchError::SelectorNotFound {
                    selector: ".box-result".to_owned(),
                    timeout_secs: 30,
                })
            } else {
                Ok(self.html.clone())
            }
        })
    }
}

fn listing(name: Option<&str>, phone: Option<&str>) -> String {
    let name_html = name.map_or_else(String::new, |n| {
        format!("<h2 class=\"r-cl-h dn-h\">{n}</h2>")
    });
    let phone_html = phone.map_or_else(String::new, |p| {
        format!("<span class=\"pns_h g-call l-f17\" data-slno=\"{p}\"></span>")
    });
    format!(
        "<div class=\"box-result\">{name_html}{phone_html}\
         <p class=\"r-cl-l pa\">MIDC, Pune</p></div>"
    )
}

fn page(blocks: &[String]) -> String {
    format!("<html><body>{}</body></html>", blocks.concat())
}

fn query() -> SearchQuery {
    SearchQuery::new("steel pipes", "Mumbai", 25).expect("valid query")
}

fn pipeline(source: Arc<dyn PageSource>, limit: usize, max_retries: u32) -> ScrapePipeline {
    ScrapePipeline::new(source, Pacer::new(0, 0), limit, max_retries, 0)
}

#[tokio::test]
async fn twelve_blocks_one_unnamed_limit_ten_yields_nine_leads() {
    // Twelve result blocks; block 4 has no business name. With a limit of
    // ten, only the first ten blocks are scanned and the unnamed one is
    // dropped after the cap, so exactly nine leads come out.
    let mut blocks = Vec::new();
    for i in 1..=12 {
        let block = if i == 4 {
            listing(None, Some("000"))
        } else {
            listing(Some(&format!("Business {i}")), Some(&format!("{i:03}")))
        };
        blocks.push(block);
    }
    let source = Arc::new(FixtureSource { html: page(&blocks) });

    let result = pipeline(source, 10, 0).run(&query()).await.expect("scrape");

    assert_eq!(result.count(), 9);
    let names: Vec<&str> = result
        .leads
        .iter()
        .map(|l| l.business_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Business 1",
            "Business 2",
            "Business 3",
            "Business 5",
            "Business 6",
            "Business 7",
            "Business 8",
            "Business 9",
            "Business 10",
        ]
    );
}

#[tokio::test]
async fn empty_results_page_is_a_successful_empty_scrape() {
    let source = Arc::new(FixtureSource {
        html: "<html><body><p>No matches found</p></body></html>".to_owned(),
    });
    let result = pipeline(source, 10, 0).run(&query()).await.expect("scrape");
    assert_eq!(result.count(), 0);
    assert!(result.leads.is_empty());
}

#[tokio::test]
async fn fetch_failure_propagates_after_retries_exhausted() {
    let source = Arc::new(TimeoutSource {
        calls: AtomicU32::new(0),
    });
    let result = pipeline(Arc::clone(&source) as Arc<dyn PageSource>, 10, 2)
        .run(&query())
        .await;

    assert!(matches!(result, Err(FetchError::Timeout { .. })));
    // max_retries=2 means three attempts in total.
    assert_eq!(source.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn transient_failure_recovers_within_retry_budget() {
    let source = Arc::new(FlakySource {
        failures: 2,
        calls: AtomicU32::new(0),
        html: page(&[listing(Some("Gupta Gears"), Some("777"))]),
    });
    let result = pipeline(Arc::clone(&source) as Arc<dyn PageSource>, 10, 2)
        .run(&query())
        .await
        .expect("scrape recovers");

    assert_eq!(result.count(), 1);
    assert_eq!(result.leads[0].business_name, "Gupta Gears");
    assert_eq!(result.leads[0].phone.as_deref(), Some("777"));
    assert_eq!(source.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn transient_failure_beyond_budget_fails_the_job() {
    let source = Arc::new(FlakySource {
        failures: 5,
        calls: AtomicU32::new(0),
        html: page(&[listing(Some("Never Reached"), None)]),
    });
    let result = pipeline(source, 10, 1).run(&query()).await;
    assert!(matches!(result, Err(FetchError::SelectorNotFound { .. })));
}
