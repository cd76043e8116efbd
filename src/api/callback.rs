use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::{
    info,
    server::AppState,
    spotify::{SpotifyClient, auth},
    stats::{self, RECENT_TRACKS_FETCH_LIMIT, TOP_ARTISTS_FETCH_LIMIT},
    store::new_roast_id,
    types::{RoastRecord, Stats},
    warning,
};

use super::found;

pub const MISSING_CODE_MESSAGE: &str = "No authorization code provided";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong while generating the roast";

/// Where the callback sequence broke. Callers only ever see
/// [`GENERIC_FAILURE_MESSAGE`]; the variant is for the server log.
#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("token exchange failed: {0}")]
    TokenExchange(#[source] reqwest::Error),
    #[error("fetching {endpoint} failed: {source}")]
    Fetch {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl CallbackError {
    fn fetch(endpoint: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| CallbackError::Fetch { endpoint, source }
    }
}

/// OAuth redirect target: code → token → stats → roast → store → redirect.
///
/// A repeated query key keeps its last value.
pub async fn callback(
    State(state): State<AppState>,
    Query(mut params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(error) = params.remove("error").filter(|e| !e.is_empty()) {
        return Json(json!({ "error": error })).into_response();
    }

    let Some(code) = params.remove("code").filter(|c| !c.is_empty()) else {
        return Json(json!({ "error": MISSING_CODE_MESSAGE })).into_response();
    };

    match roast_for_code(&state, &code).await {
        Ok(roast_id) => found(&state.config.result_url(&roast_id)),
        Err(e) => {
            warning!("Callback error: {}", e);
            Json(json!({ "error": GENERIC_FAILURE_MESSAGE })).into_response()
        }
    }
}

async fn roast_for_code(state: &AppState, code: &str) -> Result<String, CallbackError> {
    let token = auth::exchange_code(&state.http, &state.config.spotify, code)
        .await
        .map_err(CallbackError::TokenExchange)?;

    let spotify = SpotifyClient::new(
        state.http.clone(),
        &state.config.spotify.api_url,
        token.access_token,
    );
    let stats = fetch_stats(&spotify).await?;

    let roast = state.roaster.generate(&stats).await;

    let roast_id = new_roast_id();
    state
        .store
        .put(roast_id.clone(), RoastRecord { roast, stats });
    info!("Stored roast {}", roast_id);

    Ok(roast_id)
}

/// Runs the four data fetches in order; the first failure aborts the lot.
pub async fn fetch_stats(spotify: &SpotifyClient) -> Result<Stats, CallbackError> {
    let top = spotify
        .top_artists(TOP_ARTISTS_FETCH_LIMIT)
        .await
        .map_err(CallbackError::fetch("top artists"))?;

    let details = spotify
        .artists(&stats::artist_ids(&top))
        .await
        .map_err(CallbackError::fetch("artists"))?;

    let recent = spotify
        .recently_played(RECENT_TRACKS_FETCH_LIMIT)
        .await
        .map_err(CallbackError::fetch("recently played"))?;

    let saved = spotify
        .saved_tracks()
        .await
        .map_err(CallbackError::fetch("saved tracks"))?;

    Ok(stats::aggregate(&top, &details, &recent, &saved))
}
