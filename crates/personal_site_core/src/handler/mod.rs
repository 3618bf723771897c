//! Transport-agnostic request handlers.
//!
//! # Responsibility
//! - Decode JSON bodies, validate, call repositories, encode responses.
//! - Map repository errors onto HTTP status classes.
//!
//! # Invariants
//! - Handlers never panic; every outcome is an `ApiResponse`.
//! - Storage failure details are logged, not returned to clients.
//!
//! Routing, authentication and the network listener live outside this crate;
//! a host server writes `ApiResponse` values verbatim.

pub mod articles;
pub mod lessons;
mod response;
pub mod value_sort;

pub use response::{status, ApiResponse};

use crate::repo::error::RepoError;
use log::{error, warn};
use serde::de::DeserializeOwned;

/// Health banner served at the site root.
pub fn root() -> ApiResponse {
    ApiResponse::text(status::OK, "We're up and running, captain!")
}

/// Decodes a JSON body; a failure is a 422 carrying the decoder message.
fn decode_body<T: DeserializeOwned>(event: &'static str, body: &str) -> Result<T, ApiResponse> {
    decode_with(event, body, |err| err.to_string())
}

fn decode_with<T: DeserializeOwned>(
    event: &'static str,
    body: &str,
    message: impl FnOnce(serde_json::Error) -> String,
) -> Result<T, ApiResponse> {
    serde_json::from_str(body).map_err(|err| {
        warn!("event={event} module=handler status=error error_code=decode_failed error={err}");
        ApiResponse::error(status::UNPROCESSABLE_ENTITY, message(err))
    })
}

/// Maps a repository failure to a response.
///
/// Client errors keep their message; not-found uses `not_found_message`;
/// everything else collapses to the generic `fallback` text.
fn repo_failure(
    event: &'static str,
    err: &RepoError,
    not_found_message: &str,
    fallback: &str,
) -> ApiResponse {
    if err.is_client_error() {
        warn!("event={event} module=handler status=rejected error={err}");
        return ApiResponse::error(status::UNPROCESSABLE_ENTITY, err.to_string());
    }

    match err {
        RepoError::NotFound { .. } => ApiResponse::error(status::NOT_FOUND, not_found_message),
        _ => {
            error!("event={event} module=handler status=error error_code=storage_failed error={err}");
            ApiResponse::error(status::INTERNAL_SERVER_ERROR, fallback)
        }
    }
}
