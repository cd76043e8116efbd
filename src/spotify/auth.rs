use reqwest::{Client, Url};

use crate::{
    config::{ConfigError, SpotifyConfig},
    types::Token,
};

/// Builds the Spotify authorization URL the user is redirected to on `/login`.
///
/// `show_dialog=true` makes Spotify ask for the account every time, so a
/// shared browser does not silently roast the previous user.
///
/// # Errors
///
/// Fails if the configured authorization endpoint is not a valid URL.
pub fn authorize_url(config: &SpotifyConfig) -> Result<String, ConfigError> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", config.scope.as_str()),
            ("show_dialog", "true"),
        ],
    )
    .map_err(|e| ConfigError::Invalid {
        name: "SPOTIFY_API_AUTH_URL",
        reason: e.to_string(),
    })?;

    Ok(url.into())
}

/// Exchanges an authorization code for an access token.
///
/// Client credentials travel as HTTP Basic auth. A rejected code, an
/// unreachable accounts service or a malformed token body all surface as a
/// `reqwest::Error`.
pub async fn exchange_code(
    http: &Client,
    config: &SpotifyConfig,
    code: &str,
) -> Result<Token, reqwest::Error> {
    let res = http
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    res.json::<Token>().await
}
