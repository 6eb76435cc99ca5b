pub mod error;
pub mod extract;
pub mod fetch;
pub mod pace;
pub mod pipeline;
pub mod query;
mod retry;

pub use error::FetchError;
pub use extract::{extract_leads, RESULTS_SELECTOR};
pub use fetch::{BrowserFetcher, PageSource};
pub use pace::Pacer;
pub use pipeline::{ScrapePipeline, ScrapeResult};
pub use query::search_url;
