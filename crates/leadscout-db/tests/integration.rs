//! Offline unit tests for leadscout-db pool configuration and row types.
//! These tests do not require a live database connection.

use leadscout_core::{AppConfig, Environment};
use leadscout_db::{LeadRow, PoolConfig, ScrapeRunRow};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        scraper_search_base_url: "https://dir.indiamart.com/search.mp".to_string(),
        scraper_navigation_timeout_secs: 60,
        scraper_selector_timeout_secs: 30,
        scraper_listing_limit: 10,
        scraper_pace_min_ms: 500,
        scraper_pace_max_ms: 1500,
        scraper_max_retries: 2,
        scraper_retry_backoff_base_secs: 5,
        scraper_max_concurrent_jobs: 2,
        scraper_screenshot_path: PathBuf::from("./scrape_failure.png"),
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`ScrapeRunRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn scrape_run_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = ScrapeRunRow {
        id: 1_i64,
        public_id: Uuid::new_v4(),
        keywords: "steel pipes".to_string(),
        location: "Mumbai".to_string(),
        radius_km: 25_i32,
        trigger_source: "api".to_string(),
        status: "submitted".to_string(),
        started_at: None,
        completed_at: None,
        leads_found: 0_i32,
        error_message: None,
        created_at: Utc::now(),
    };

    assert_eq!(row.id, 1);
    assert_eq!(row.keywords, "steel pipes");
    assert_eq!(row.location, "Mumbai");
    assert_eq!(row.radius_km, 25);
    assert_eq!(row.trigger_source, "api");
    assert_eq!(row.status, "submitted");
    assert!(row.started_at.is_none());
    assert!(row.completed_at.is_none());
    assert_eq!(row.leads_found, 0);
    assert!(row.error_message.is_none());
}

/// Compile-time smoke test: confirm that [`LeadRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn lead_row_has_expected_fields() {
    use chrono::Utc;

    let row = LeadRow {
        id: 42_i64,
        scrape_run_id: 7_i64,
        business_name: "Sharma Steel Traders".to_string(),
        owner_name: None,
        phone: Some("91-22-400123".to_string()),
        address: Some("Andheri East, Mumbai".to_string()),
        website: None,
        email: None,
        source_platform: "IndiaMART".to_string(),
        is_verified: false,
        created_at: Utc::now(),
    };

    assert_eq!(row.id, 42);
    assert_eq!(row.scrape_run_id, 7);
    assert_eq!(row.business_name, "Sharma Steel Traders");
    assert_eq!(row.phone.as_deref(), Some("91-22-400123"));
    assert_eq!(row.source_platform, "IndiaMART");
    assert!(!row.is_verified);
    assert!(row.owner_name.is_none());
    assert!(row.email.is_none());
}
