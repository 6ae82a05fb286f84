//! Request handlers for the company search API.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::{info, instrument};

use super::AppState;
use crate::company::CompanyResult;
use crate::error::ServiceError;
use crate::metrics;

/// Maximum number of companies requested from the repository per search.
pub const SEARCH_LIMIT: usize = 20;

/// GET /api/companies?q=<term>
///
/// Passes the raw `q` value and [`SEARCH_LIMIT`] to the repository and returns
/// whatever it produces, unchanged. Repository failures are not handled here.
#[instrument(skip(state, params), fields(query))]
pub async fn search_companies(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<CompanyResult>>, ServiceError> {
    // First occurrence wins when `q` is repeated
    let query = params
        .into_iter()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .ok_or_else(ServiceError::missing_query)?;

    tracing::Span::current().record("query", query.as_str());

    let start = Instant::now();
    let results = state.repository.search(&query, SEARCH_LIMIT).await?;

    metrics::record_search_latency(start.elapsed().as_secs_f64() * 1000.0);
    metrics::increment_search_count();

    info!(hits = results.len(), "Company search served");

    Ok(Json(results))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let repository = &state.repository;
    let (status, label) = if repository.is_ready() {
        (StatusCode::OK, "serving")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_serving")
    };

    (
        status,
        Json(json!({
            "status": label,
            "company_count": repository.company_count(),
            "source": repository.source(),
        })),
    )
}
