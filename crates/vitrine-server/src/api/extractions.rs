use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::Deserialize;

use super::{map_scraper_error, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

/// Either a page to fetch, or markup the operator pasted. When both are
/// given, `html` wins and `url` is only logged.
#[derive(Debug, Deserialize)]
pub(super) struct ExtractionRequest {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    html: Option<String>,
}

/// Test extraction: returns what an import would store, storing nothing.
pub(super) async fn run_extraction(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ExtractionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = match (body.html, body.url) {
        (Some(html), url) => {
            tracing::debug!(request_id = %req_id.0, url = ?url, bytes = html.len(), "extracting pasted markup");
            state.importer.preview_html(&html)
        }
        (None, Some(url)) => state
            .importer
            .preview(&url)
            .await
            .map_err(|e| map_scraper_error(req_id.0.clone(), &e))?,
        (None, None) => {
            return Err(ApiError::new(
                req_id.0,
                "validation_error",
                "either url or html is required",
            ));
        }
    };

    Ok(Json(ApiResponse::new(req_id.0, result)))
}
