/*
 * Responsibility
 * - GET /health (疎通用、認証なし)
 * - どの store backend で動いているかを返す
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "ok", "store": state.todos.backend_name()})),
    )
}
