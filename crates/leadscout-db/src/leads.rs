//! Database operations for `leads`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use leadscout_core::Lead;

use crate::DbError;

/// A row from the `leads` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeadRow {
    pub id: i64,
    pub scrape_run_id: i64,
    pub business_name: String,
    pub owner_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub source_platform: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

const LEAD_COLUMNS: &str = "id, scrape_run_id, business_name, owner_name, phone, address, \
                            website, email, source_platform, is_verified, created_at";

/// Inserts the extracted batch for a run inside one transaction.
///
/// Returns the number of rows inserted. An empty batch commits an empty
/// transaction and returns zero.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails; no partial batch is
/// persisted.
pub async fn insert_leads(
    pool: &PgPool,
    scrape_run_id: i64,
    leads: &[Lead],
) -> Result<u64, DbError> {
    let mut tx = pool.begin().await?;

    for lead in leads {
        sqlx::query(
            "INSERT INTO leads \
                 (scrape_run_id, business_name, owner_name, phone, address, website, email, \
                  source_platform) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(scrape_run_id)
        .bind(&lead.business_name)
        .bind(&lead.owner_name)
        .bind(&lead.phone)
        .bind(&lead.address)
        .bind(&lead.website)
        .bind(&lead.email)
        .bind(lead.source_platform.as_str())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(leads.len() as u64)
}

/// Sets the verification flag on a lead and returns the updated row.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no lead exists with the given `id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn set_lead_verified(
    pool: &PgPool,
    id: i64,
    is_verified: bool,
) -> Result<LeadRow, DbError> {
    let row = sqlx::query_as::<_, LeadRow>(&format!(
        "UPDATE leads SET is_verified = $1 WHERE id = $2 RETURNING {LEAD_COLUMNS}",
    ))
    .bind(is_verified)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Returns up to `limit` leads, newest first, optionally filtered by
/// verification status.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_leads(
    pool: &PgPool,
    verified: Option<bool>,
    limit: i64,
) -> Result<Vec<LeadRow>, DbError> {
    let rows = sqlx::query_as::<_, LeadRow>(&format!(
        "SELECT {LEAD_COLUMNS} FROM leads \
         WHERE ($1::BOOLEAN IS NULL OR is_verified = $1) \
         ORDER BY created_at DESC, id DESC \
         LIMIT $2",
    ))
    .bind(verified)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns all verified leads, newest first. Used by the CSV export, which
/// is deliberately unpaginated.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_verified_leads(pool: &PgPool) -> Result<Vec<LeadRow>, DbError> {
    let rows = sqlx::query_as::<_, LeadRow>(&format!(
        "SELECT {LEAD_COLUMNS} FROM leads \
         WHERE is_verified = TRUE \
         ORDER BY created_at DESC, id DESC",
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
