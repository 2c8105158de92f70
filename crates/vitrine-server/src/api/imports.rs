use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::Deserialize;

use super::{map_scraper_error, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct ImportRequest {
    urls: Vec<String>,
}

/// Batch import triggered from the admin console. Per-page failures are part
/// of the summary; only an empty batch is rejected.
pub(super) async fn create_import(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ImportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state
        .importer
        .import_from(&body.urls, state.store.as_ref())
        .await
        .map_err(|e| map_scraper_error(req_id.0.clone(), &e))?;

    tracing::info!(
        request_id = %req_id.0,
        imported = summary.imported,
        skipped = summary.skipped,
        errors = summary.errors.len(),
        "admin import finished"
    );
    Ok(Json(ApiResponse::new(req_id.0, summary)))
}
