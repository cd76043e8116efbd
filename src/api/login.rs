use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{server::AppState, spotify::auth, warning};

use super::found;

pub async fn home() -> Response {
    found("/login")
}

/// Starts the OAuth dance by sending the browser to Spotify.
pub async fn login(State(state): State<AppState>) -> Response {
    match auth::authorize_url(&state.config.spotify) {
        Ok(url) => found(&url),
        Err(e) => {
            warning!("Cannot build authorization URL: {}", e);
            Json(json!({ "error": "Login is not configured" })).into_response()
        }
    }
}
