//! Configuration management for the roastify backend.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files. Instead of reading the environment on every access, the server
//! builds one [`Config`] at startup and hands it to the request handlers
//! through [`crate::server::AppState`].
//!
//! Lookup order:
//! 1. Process environment variables (highest priority)
//! 2. `.env` in the local data directory (`<data_local_dir>/roastify/.env`)
//! 3. `.env` in the current working directory
//! 4. Built-in defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
pub const DEFAULT_SPOTIFY_SCOPE: &str =
    "user-top-read user-read-recently-played user-library-read";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Origins allowed by CORS on top of the configured frontend.
pub const LOCAL_DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5173"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Spotify OAuth application and endpoint settings.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

/// Chat-completion endpoint settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

/// Application configuration, loaded once at startup.
///
/// Built by [`Config::from_env`] and shared read-only with every request
/// handler. See the module docs for the variables and their defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub frontend_url: String,
    pub spotify: SpotifyConfig,
    pub llm: LlmConfig,
    /// `None` keeps stored roasts until the process exits.
    pub roast_ttl: Option<Duration>,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when a required variable
    /// (`SPOTIFY_API_AUTH_CLIENT_ID`, `SPOTIFY_API_AUTH_CLIENT_SECRET`,
    /// `SPOTIFY_API_REDIRECT_URI`, `GROQ_API_KEY`) is unset or empty, and
    /// [`ConfigError::Invalid`] when `ROAST_TTL_SECS` is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let or_default =
            |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let roast_ttl = match get("ROAST_TTL_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    name: "ROAST_TTL_SECS",
                    reason: e.to_string(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            server_addr: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            frontend_url: or_default("FRONTEND_URL", DEFAULT_FRONTEND_URL),
            spotify: SpotifyConfig {
                client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
                client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
                redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
                scope: or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE),
                auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL),
                token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
                api_url: or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            },
            llm: LlmConfig {
                api_key: required("GROQ_API_KEY")?,
                api_url: or_default("GROQ_API_URL", DEFAULT_GROQ_API_URL),
                model: or_default("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            },
            roast_ttl,
        })
    }

    /// Origins the frontend may call from: the configured frontend plus the
    /// local development servers, without duplicates.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = vec![self.frontend_url.trim_end_matches('/').to_string()];
        for origin in LOCAL_DEV_ORIGINS {
            if !origins.iter().any(|o| o == origin) {
                origins.push(origin.to_string());
            }
        }
        origins
    }

    /// Frontend page that picks up a stored roast by id.
    pub fn result_url(&self, roast_id: &str) -> String {
        format!(
            "{}/result?rid={}",
            self.frontend_url.trim_end_matches('/'),
            roast_id
        )
    }
}

/// Loads `.env` files from the local data directory and the working directory.
///
/// Both files are optional; variables already present in the process
/// environment are never overwritten.
///
/// # Errors
///
/// Returns an error string if the `roastify` data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("roastify/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    dotenv::dotenv().ok();
    Ok(())
}
