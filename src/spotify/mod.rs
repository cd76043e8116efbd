//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API the roast flow needs.
//!
//! ```text
//! api::callback
//!      ↓
//! spotify::auth      (authorize URL, code → token exchange)
//! SpotifyClient      (authenticated "current user" reads)
//!      ↓
//! reqwest → Spotify accounts service / Web API
//! ```
//!
//! ## Endpoints
//!
//! - `POST /api/token` - authorization code exchange ([`auth::exchange_code`])
//! - `GET /me/top/artists` - [`SpotifyClient::top_artists`]
//! - `GET /artists` - batch artist lookup, [`SpotifyClient::artists`]
//! - `GET /me/player/recently-played` - [`SpotifyClient::recently_played`]
//! - `GET /me/tracks` - saved library, [`SpotifyClient::saved_tracks`]
//!
//! Every call surfaces a non-2xx status as a `reqwest::Error`. There is no
//! retry and no timeout beyond the HTTP client defaults.

pub mod artists;
pub mod auth;
pub mod library;
pub mod player;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// Authenticated client bound to one user's access token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Wraps `http` with the Web API base URL and a user's access token.
    pub fn new(http: Client, api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, reqwest::Error>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let api_url = format!("{uri}/{path}", uri = self.api_url, path = path);

        self.http
            .get(&api_url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    }
}
