use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leadscout_core::SearchQuery;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

const DEFAULT_RADIUS_KM: i32 = 25;

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeRequest {
    pub keywords: String,
    pub location: String,
    #[serde(default = "default_radius_km")]
    pub radius_km: i32,
}

fn default_radius_km() -> i32 {
    DEFAULT_RADIUS_KM
}

#[derive(Debug, Serialize)]
pub(super) struct ScrapeAccepted {
    message: &'static str,
    scrape_run_id: Uuid,
}

/// Accepts a scrape job and schedules it detached from this request.
///
/// The `202` acknowledgement only means the job was recorded and scheduled;
/// its outcome is observed by polling the run endpoints.
pub(super) async fn submit_scrape(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ScrapeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ScrapeAccepted>>), ApiError> {
    let query = SearchQuery::new(&body.keywords, &body.location, body.radius_km)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let run = leadscout_db::create_scrape_run(&state.pool, &query, "api")
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    state.jobs.spawn(run.id, query);
    tracing::info!(run_id = run.id, public_id = %run.public_id, "scrape job accepted");

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse {
            data: ScrapeAccepted {
                message: "scrape job accepted",
                scrape_run_id: run.public_id,
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}
