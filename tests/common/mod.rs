//! Shared helpers for the integration tests.
//!
//! Spotify (accounts service + Web API) and the chat-completion endpoint are
//! replaced by in-process axum routers bound to random local ports.

#![allow(dead_code)]

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use roastify::{
    config::{Config, LlmConfig, SpotifyConfig},
    server::{AppState, make_app},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const ACCESS_TOKEN: &str = "test-access-token";
pub const VALID_CODE: &str = "valid-code";
pub const FRONTEND_URL: &str = "http://frontend.test";
pub const ROAST_TEXT: &str = "**You listen like a screensaver.**\n- Final Verdict: 3/10";

/// Serves `router` on `127.0.0.1:0` and returns its base URL.
pub async fn spawn_router(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Mock server failed");
    });

    format!("http://{}", addr)
}

pub async fn spawn_app(state: AppState) -> String {
    let app = make_app(state).expect("Failed to build app");
    spawn_router(app).await
}

/// Client that does not follow redirects, so `Location` can be inspected.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client")
}

pub fn test_config(spotify_base: &str, llm_url: &str) -> Config {
    Config {
        server_addr: "127.0.0.1:0".to_string(),
        frontend_url: FRONTEND_URL.to_string(),
        spotify: SpotifyConfig {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri: "http://127.0.0.1:8000/callback".to_string(),
            scope: "user-top-read user-read-recently-played user-library-read".to_string(),
            auth_url: format!("{}/authorize", spotify_base),
            token_url: format!("{}/api/token", spotify_base),
            api_url: format!("{}/v1", spotify_base),
        },
        llm: LlmConfig {
            api_key: "llm-key".to_string(),
            api_url: llm_url.to_string(),
            model: "test-model".to_string(),
        },
        roast_ttl: None,
    }
}

pub fn top_artists_fixture() -> Value {
    json!({
        "items": [
            {
                "id": "artist-1",
                "name": "Glass Animals",
                "genres": ["indie pop", "pop"],
                "images": [
                    { "url": "https://img.test/glass-large.jpg" },
                    { "url": "https://img.test/glass-small.jpg" }
                ]
            },
            {
                "id": "artist-2",
                "name": "Phoebe Bridgers",
                "genres": ["pop", "sad indie"]
            }
        ]
    })
}

pub fn several_artists_fixture() -> Value {
    json!({
        "artists": [
            {
                "id": "artist-1",
                "name": "Glass Animals",
                "genres": ["indie pop", "pop"],
                "images": [{ "url": "https://img.test/glass-large.jpg" }]
            },
            null
        ]
    })
}

pub fn recently_played_fixture() -> Value {
    json!({
        "items": [
            {
                "played_at": "2024-05-01T10:00:00Z",
                "track": {
                    "name": "Heat Waves",
                    "album": {
                        "name": "Dreamland",
                        "images": [{ "url": "https://img.test/dreamland.jpg" }]
                    }
                }
            }
        ]
    })
}

pub fn saved_tracks_fixture() -> Value {
    json!({ "total": 42, "items": [] })
}

/// Request counters of the mock Spotify service.
#[derive(Clone, Default)]
pub struct SpotifyHits {
    pub token: Arc<AtomicUsize>,
    pub api: Arc<AtomicUsize>,
    pub artist_lookups: Arc<AtomicUsize>,
}

impl SpotifyHits {
    pub fn token_requests(&self) -> usize {
        self.token.load(Ordering::SeqCst)
    }

    pub fn api_requests(&self) -> usize {
        self.api.load(Ordering::SeqCst)
    }

    pub fn artist_lookup_requests(&self) -> usize {
        self.artist_lookups.load(Ordering::SeqCst)
    }
}

/// Payloads served by the mock Web API.
#[derive(Clone)]
pub struct MockSpotify {
    pub top_artists: Value,
    pub recently_played: Value,
    pub saved_tracks: Value,
    pub fail_recently_played: bool,
}

impl Default for MockSpotify {
    fn default() -> Self {
        Self {
            top_artists: top_artists_fixture(),
            recently_played: recently_played_fixture(),
            saved_tracks: saved_tracks_fixture(),
            fail_recently_played: false,
        }
    }
}

#[derive(Clone)]
struct MockSpotifyState {
    hits: SpotifyHits,
    mock: Arc<MockSpotify>,
}

/// Mock accounts service and Web API with the default fixtures.
pub async fn spawn_spotify(fail_recently_played: bool) -> (String, SpotifyHits) {
    spawn_spotify_with(MockSpotify {
        fail_recently_played,
        ..MockSpotify::default()
    })
    .await
}

/// Mock accounts service and Web API. Only [`VALID_CODE`] is accepted.
pub async fn spawn_spotify_with(mock: MockSpotify) -> (String, SpotifyHits) {
    let hits = SpotifyHits::default();
    let state = MockSpotifyState {
        hits: hits.clone(),
        mock: Arc::new(mock),
    };

    let router = Router::new()
        .route("/api/token", post(token))
        .route("/v1/me/top/artists", get(top_artists))
        .route("/v1/artists", get(several_artists))
        .route("/v1/me/player/recently-played", get(recently_played))
        .route("/v1/me/tracks", get(saved_tracks))
        .with_state(state);

    (spawn_router(router).await, hits)
}

async fn token(State(state): State<MockSpotifyState>, body: String) -> Response {
    state.hits.token.fetch_add(1, Ordering::SeqCst);

    if !body.contains(&format!("code={}", VALID_CODE)) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        )
            .into_response();
    }

    Json(json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "scope": "user-top-read",
        "expires_in": 3600,
        "refresh_token": "refresh"
    }))
    .into_response()
}

async fn top_artists(State(state): State<MockSpotifyState>) -> Json<Value> {
    state.hits.api.fetch_add(1, Ordering::SeqCst);
    Json(state.mock.top_artists.clone())
}

async fn several_artists(State(state): State<MockSpotifyState>) -> Json<Value> {
    state.hits.api.fetch_add(1, Ordering::SeqCst);
    state.hits.artist_lookups.fetch_add(1, Ordering::SeqCst);
    Json(several_artists_fixture())
}

async fn recently_played(State(state): State<MockSpotifyState>) -> Response {
    state.hits.api.fetch_add(1, Ordering::SeqCst);
    if state.mock.fail_recently_played {
        return StatusCode::TOO_MANY_REQUESTS.into_response();
    }
    Json(state.mock.recently_played.clone()).into_response()
}

async fn saved_tracks(State(state): State<MockSpotifyState>) -> Json<Value> {
    state.hits.api.fetch_add(1, Ordering::SeqCst);
    Json(state.mock.saved_tracks.clone())
}

/// Chat-completion mock answering every request with `status` and `body`.
pub async fn spawn_llm(status: StatusCode, body: String) -> String {
    let router = Router::new().route(
        "/chat/completions",
        post(move || {
            let body = body.clone();
            async move { (status, body) }
        }),
    );
    format!("{}/chat/completions", spawn_router(router).await)
}

pub async fn spawn_llm_ok() -> String {
    let body = json!({
        "choices": [{ "message": { "role": "assistant", "content": ROAST_TEXT } }]
    });
    spawn_llm(StatusCode::OK, body.to_string()).await
}

/// Chat-completion mock that answers only after `delay`.
pub async fn spawn_llm_slow(delay: Duration) -> String {
    let router = Router::new().route(
        "/chat/completions",
        post(move || async move {
            tokio::time::sleep(delay).await;
            Json(json!({ "choices": [{ "message": { "content": "too late" } }] }))
        }),
    );
    format!("{}/chat/completions", spawn_router(router).await)
}
