//! # API Module
//!
//! HTTP endpoints of the roastify backend, built on [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! - `GET /` - [`home`], redirects to `/login`
//! - `GET /login` - [`login`], redirects to the Spotify authorization page
//! - `GET /callback` - [`callback`], OAuth redirect target. Exchanges the code,
//!   collects listening stats, generates the roast, stores it and redirects the
//!   browser to `{FRONTEND_URL}/result?rid={id}`
//! - `GET /api/roast/{id}` - [`get_roast`], returns a stored roast
//! - `GET /health` - [`health`], status and version
//!
//! ## Errors
//!
//! Failures are answered with `200 {"error": <message>}`. The callback collapses
//! every token or data-fetch failure into one message and logs the cause
//! server-side only.
//!
//! ## Related Modules
//!
//! - [`crate::server`] - router and shared [`crate::server::AppState`]
//! - [`crate::spotify`] - Spotify API integration
//! - [`crate::roast`] - roast text generation

mod callback;
mod health;
mod login;
mod roast;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

pub use callback::{
    CallbackError, GENERIC_FAILURE_MESSAGE, MISSING_CODE_MESSAGE, callback, fetch_stats,
};
pub use health::health;
pub use login::{home, login};
pub use roast::{NOT_FOUND_MESSAGE, get_roast};

/// `302 Found` to `location`.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
