use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::server::AppState;

pub const NOT_FOUND_MESSAGE: &str = "Roast not found or expired";

/// Returns the stored `{roast, stats}` record. Reading does not consume it.
pub async fn get_roast(State(state): State<AppState>, Path(roast_id): Path<String>) -> Response {
    match state.store.get(&roast_id) {
        Some(record) => Json(record).into_response(),
        None => Json(json!({ "error": NOT_FOUND_MESSAGE })).into_response(),
    }
}
