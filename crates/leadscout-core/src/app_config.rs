use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub scraper_search_base_url: String,
    pub scraper_navigation_timeout_secs: u64,
    pub scraper_selector_timeout_secs: u64,
    pub scraper_listing_limit: usize,
    pub scraper_pace_min_ms: u64,
    pub scraper_pace_max_ms: u64,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_secs: u64,
    pub scraper_max_concurrent_jobs: usize,
    pub scraper_screenshot_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("scraper_search_base_url", &self.scraper_search_base_url)
            .field(
                "scraper_navigation_timeout_secs",
                &self.scraper_navigation_timeout_secs,
            )
            .field(
                "scraper_selector_timeout_secs",
                &self.scraper_selector_timeout_secs,
            )
            .field("scraper_listing_limit", &self.scraper_listing_limit)
            .field("scraper_pace_min_ms", &self.scraper_pace_min_ms)
            .field("scraper_pace_max_ms", &self.scraper_pace_max_ms)
            .field("scraper_max_retries", &self.scraper_max_retries)
            .field(
                "scraper_retry_backoff_base_secs",
                &self.scraper_retry_backoff_base_secs,
            )
            .field(
                "scraper_max_concurrent_jobs",
                &self.scraper_max_concurrent_jobs,
            )
            .field("scraper_screenshot_path", &self.scraper_screenshot_path)
            .finish()
    }
}
