use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{services::talent_service::TalentSource, AppState};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up")
    )
)]
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let source = match state.talent_service.source() {
        TalentSource::Mock(_) => "mock",
        TalentSource::Remote(_) => "remote",
    };
    let body = json!({
        "status": "ok",
        "source": source,
    });
    (StatusCode::OK, Json(body))
}
