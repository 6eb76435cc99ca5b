use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leadscout_db::ScrapeRunRow;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct RunsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct ScrapeRunItem {
    scrape_run_id: Uuid,
    keywords: String,
    location: String,
    radius_km: i32,
    trigger_source: String,
    status: String,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    leads_found: i32,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ScrapeRunRow> for ScrapeRunItem {
    fn from(row: ScrapeRunRow) -> Self {
        Self {
            scrape_run_id: row.public_id,
            keywords: row.keywords,
            location: row.location,
            radius_km: row.radius_km,
            trigger_source: row.trigger_source,
            status: row.status,
            started_at: row.started_at,
            completed_at: row.completed_at,
            leads_found: row.leads_found,
            error_message: row.error_message,
            created_at: row.created_at,
        }
    }
}

pub(super) async fn list_runs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RunsQuery>,
) -> Result<Json<ApiResponse<Vec<ScrapeRunItem>>>, ApiError> {
    let rows = leadscout_db::list_scrape_runs(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(ScrapeRunItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_run(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(public_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ScrapeRunItem>>, ApiError> {
    let row = leadscout_db::get_scrape_run_by_public_id(&state.pool, public_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: ScrapeRunItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}
