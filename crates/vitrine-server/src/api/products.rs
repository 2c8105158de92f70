use axum::{extract::State, response::IntoResponse, Extension, Json};

use super::{ApiResponse, AppState};
use crate::middleware::RequestId;

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse::new(req_id.0, state.store.records().await))
}
