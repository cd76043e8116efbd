use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, header::InvalidHeaderValue},
    routing::get,
};
use reqwest::Client;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::{
    Res, api,
    config::{Config, ConfigError},
    info,
    roast::RoastGenerator,
    store::{MemoryRoastStore, RoastStore},
};

/// Everything a request handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
    pub roaster: Arc<RoastGenerator>,
    pub store: Arc<dyn RoastStore>,
}

impl AppState {
    /// Builds the state with a [`MemoryRoastStore`] honouring `config.roast_ttl`.
    pub fn new(config: Config) -> Self {
        let store = Arc::new(MemoryRoastStore::new(config.roast_ttl));
        Self::with_store(config, store)
    }

    /// Builds the state around an existing store. The Spotify calls and the
    /// roast generator share one `reqwest::Client`.
    ///
    /// # Arguments
    ///
    /// * `config` - Loaded application configuration
    /// * `store` - Where finished roasts are kept until the frontend fetches them
    pub fn with_store(config: Config, store: Arc<dyn RoastStore>) -> Self {
        let http = Client::new();
        let roaster = Arc::new(RoastGenerator::new(http.clone(), &config.llm));
        Self {
            config: Arc::new(config),
            http,
            roaster,
            store,
        }
    }

    /// Replaces the roast generator, e.g. one with a shorter timeout.
    pub fn with_roaster(mut self, roaster: RoastGenerator) -> Self {
        self.roaster = Arc::new(roaster);
        self
    }
}

/// Builds the router with CORS applied to every route.
///
/// # Errors
///
/// Fails when an allowed origin is not a valid header value.
pub fn make_app(state: AppState) -> Result<Router, ConfigError> {
    let cors = cors_layer(&state.config)?;

    Ok(Router::new()
        .route("/", get(api::home))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/api/roast/{roast_id}", get(api::get_roast))
        .route("/health", get(api::health))
        .layer(cors)
        .with_state(state))
}

/// CORS for the frontend and the local dev servers, with credentials.
///
/// Credentialed CORS forbids `*`, so methods and headers mirror the preflight.
pub fn cors_layer(config: &Config) -> Result<CorsLayer, ConfigError> {
    let origins = config
        .allowed_origins()
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, InvalidHeaderValue>>()
        .map_err(|e| ConfigError::Invalid {
            name: "FRONTEND_URL",
            reason: e.to_string(),
        })?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Binds `state.config.server_addr` and serves the API until the process stops.
///
/// # Errors
///
/// Returns an error if the address cannot be parsed or bound, if the CORS
/// origins are invalid, or if the server loop fails.
///
/// # Example
///
/// ```rust,ignore
/// let config = Config::from_env()?;
/// start_api_server(AppState::new(config)).await?;
/// ```
pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&state.config.server_addr)?;
    let app = make_app(state)?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
