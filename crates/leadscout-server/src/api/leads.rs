use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use leadscout_db::LeadRow;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct LeadsQuery {
    pub verified: Option<bool>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct VerifyRequest {
    pub is_verified: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct LeadItem {
    id: i64,
    business_name: String,
    owner_name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    website: Option<String>,
    email: Option<String>,
    source_platform: String,
    is_verified: bool,
    created_at: DateTime<Utc>,
}

impl From<LeadRow> for LeadItem {
    fn from(row: LeadRow) -> Self {
        Self {
            id: row.id,
            business_name: row.business_name,
            owner_name: row.owner_name,
            phone: row.phone,
            address: row.address,
            website: row.website,
            email: row.email,
            source_platform: row.source_platform,
            is_verified: row.is_verified,
            created_at: row.created_at,
        }
    }
}

pub(super) async fn list_leads(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<LeadsQuery>,
) -> Result<Json<ApiResponse<Vec<LeadItem>>>, ApiError> {
    let rows = leadscout_db::list_leads(&state.pool, query.verified, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(LeadItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn verify_lead(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<ApiResponse<LeadItem>>, ApiError> {
    let row = leadscout_db::set_lead_verified(&state.pool, id, body.is_verified)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: LeadItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Streams all verified leads as a CSV attachment.
pub(super) async fn export_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Response, ApiError> {
    let rows = leadscout_db::list_verified_leads(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let csv = leadscout_db::leads_to_csv(&rows)
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    tracing::info!(rows = rows.len(), "exported verified leads as csv");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"verified_leads.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{test_state, StubSource};
    use super::super::build_app;
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use leadscout_core::{Lead, SearchQuery, SourcePlatform};
    use tower::ServiceExt;

    #[test]
    fn lead_item_is_serializable() {
        let item = LeadItem {
            id: 7,
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

        let json = serde_json::to_string(&item).expect("serialize lead");
        assert!(json.contains("\"business_name\":\"Sharma Steel Traders\""));
        assert!(json.contains("\"is_verified\":false"));
    }

    async fn seed_lead(pool: &sqlx::PgPool, name: &str) -> i64 {
        let query = SearchQuery::new("steel", "Mumbai", 25).expect("query");
        let run = leadscout_db::create_scrape_run(pool, &query, "api")
            .await
            .expect("create run");
        leadscout_db::insert_leads(
            pool,
            run.id,
            &[Lead {
                business_name: name.to_string(),
                owner_name: None,
                phone: Some("111".to_string()),
                address: None,
                website: None,
                email: None,
                source_platform: SourcePlatform::IndiaMart,
            }],
        )
        .await
        .expect("insert lead");

        sqlx::query_scalar("SELECT id FROM leads WHERE business_name = $1")
            .bind(name)
            .fetch_one(pool)
            .await
            .expect("lead id")
    }

    fn app(pool: sqlx::PgPool) -> axum::Router {
        build_app(test_state(
            pool,
            StubSource {
                html: Ok(String::new()),
            },
        ))
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn verify_lead_toggles_the_flag(pool: sqlx::PgPool) {
        let lead_id = seed_lead(&pool, "Verify Me Traders").await;

        let response = app(pool)
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/api/v1/leads/{lead_id}/verify"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"is_verified": true}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["is_verified"].as_bool(), Some(true));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn verify_unknown_lead_returns_404(pool: sqlx::PgPool) {
        let response = app(pool)
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/leads/999999/verify")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"is_verified": true}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn leads_filter_by_verification_status(pool: sqlx::PgPool) {
        let verified_id = seed_lead(&pool, "Verified Corp").await;
        seed_lead(&pool, "Unverified Ltd").await;
        leadscout_db::set_lead_verified(&pool, verified_id, true)
            .await
            .expect("verify");

        let response = app(pool)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/leads?verified=true")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        let data = json["data"].as_array().expect("data array");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["business_name"].as_str(), Some("Verified Corp"));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn csv_export_has_fixed_header_and_attachment_headers(pool: sqlx::PgPool) {
        let lead_id = seed_lead(&pool, "Exported Traders").await;
        leadscout_db::set_lead_verified(&pool, lead_id, true)
            .await
            .expect("verify");

        let response = app(pool)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/export/csv")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("text/csv; charset=utf-8")
        );
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok()),
            Some("attachment; filename=\"verified_leads.csv\"")
        );

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let text = String::from_utf8(body.to_vec()).expect("utf8 body");
        assert!(text.starts_with(
            "Business Name,Owner Name,Phone,Address,Website,Email,Source,Date Scraped"
        ));
        assert!(text.contains("Exported Traders"));
    }
}
