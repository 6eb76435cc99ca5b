//! Database operations for `scrape_runs`.
//!
//! Status transitions are guarded in SQL: each update predicates on the
//! expected current status, so a job task and a crashed predecessor can
//! never double-advance the same run.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use leadscout_core::SearchQuery;

use crate::DbError;

/// A row from the `scrape_runs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScrapeRunRow {
    pub id: i64,
    pub public_id: Uuid,
    pub keywords: String,
    pub location: String,
    pub radius_km: i32,
    pub trigger_source: String,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub leads_found: i32,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

const RUN_COLUMNS: &str = "id, public_id, keywords, location, radius_km, trigger_source, \
                           status, started_at, completed_at, leads_found, error_message, \
                           created_at";

/// Creates a new scrape run in `submitted` status.
///
/// Generates a UUID in Rust and binds it to `public_id`. Returns the full
/// newly-created row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_scrape_run(
    pool: &PgPool,
    query: &SearchQuery,
    trigger_source: &str,
) -> Result<ScrapeRunRow, DbError> {
    let public_id = Uuid::new_v4();

    let row = sqlx::query_as::<_, ScrapeRunRow>(&format!(
        "INSERT INTO scrape_runs (public_id, keywords, location, radius_km, trigger_source, status) \
         VALUES ($1, $2, $3, $4, $5, 'submitted') \
         RETURNING {RUN_COLUMNS}",
    ))
    .bind(public_id)
    .bind(query.keywords())
    .bind(query.location())
    .bind(query.radius_km())
    .bind(trigger_source)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Marks a run as `running` and sets `started_at = NOW()`.
///
/// # Errors
///
/// Returns [`DbError::InvalidRunTransition`] if the run is not in
/// `submitted` status, or [`DbError::Sqlx`] if the update fails.
pub async fn start_scrape_run(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE scrape_runs \
         SET status = 'running', started_at = NOW() \
         WHERE id = $1 AND status = 'submitted'",
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidRunTransition {
            id,
            expected_status: "submitted",
        });
    }

    Ok(())
}

/// Marks a run as `completed`, sets `completed_at = NOW()` and `leads_found`.
///
/// A run that found zero leads still completes; emptiness is not failure.
///
/// # Errors
///
/// Returns [`DbError::InvalidRunTransition`] if the run is not in `running`
/// status, or [`DbError::Sqlx`] if the update fails.
pub async fn complete_scrape_run(pool: &PgPool, id: i64, leads_found: i32) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE scrape_runs \
         SET status = 'completed', completed_at = NOW(), leads_found = $1 \
         WHERE id = $2 AND status = 'running'",
    )
    .bind(leads_found)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Marks a run as `failed`, sets `completed_at = NOW()` and `error_message`.
///
/// # Errors
///
/// Returns [`DbError::InvalidRunTransition`] if the run is not in `running`
/// status, or [`DbError::Sqlx`] if the update fails.
pub async fn fail_scrape_run(pool: &PgPool, id: i64, error_message: &str) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE scrape_runs \
         SET status = 'failed', completed_at = NOW(), error_message = $1 \
         WHERE id = $2 AND status = 'running'",
    )
    .bind(error_message)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Fetches a single run by its externally visible `public_id`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given
/// `public_id`, or [`DbError::Sqlx`] if the query fails.
pub async fn get_scrape_run_by_public_id(
    pool: &PgPool,
    public_id: Uuid,
) -> Result<ScrapeRunRow, DbError> {
    let row = sqlx::query_as::<_, ScrapeRunRow>(&format!(
        "SELECT {RUN_COLUMNS} FROM scrape_runs WHERE public_id = $1",
    ))
    .bind(public_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Returns the most recent `limit` runs, ordered by `created_at DESC`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_scrape_runs(pool: &PgPool, limit: i64) -> Result<Vec<ScrapeRunRow>, DbError> {
    let rows = sqlx::query_as::<_, ScrapeRunRow>(&format!(
        "SELECT {RUN_COLUMNS} FROM scrape_runs \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
