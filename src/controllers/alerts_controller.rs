use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, services::alerts_service};

#[derive(Deserialize)]
pub struct SetAlertRequest {
    pub symbol: String,
    pub threshold: f64,
    pub email: String,
}

// POST /set-alert
pub async fn post_set_alert(
    State(state): State<AppState>,
    Json(req): Json<SetAlertRequest>,
) -> Response {
    match alerts_service::register_alert(&state.registry, &req.symbol, req.threshold, &req.email) {
        Ok(record) => (
            StatusCode::OK,
            Json(json!({
                "id": record.id,
                "symbol": record.symbol,
                "threshold": record.threshold,
                "status": record.status,
            })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": e.code(), "message": e.to_string() })),
        )
            .into_response(),
    }
}

// GET /get-alerts
pub async fn get_alerts(State(state): State<AppState>) -> Response {
    Json(state.registry.list()).into_response()
}

// DELETE /alerts/:id
pub async fn delete_alert(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    if state.registry.remove(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found" })),
        )
            .into_response()
    }
}
