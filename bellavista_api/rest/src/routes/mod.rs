use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ContactResponse;

pub mod contact;
pub mod health;

pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred. Please try again later or contact us directly.";

/// Converts an internal error into the generic failure response. The error
/// itself only shows up in the server log, never in the response body.
pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err}");
    Json(ContactResponse::failure(UNEXPECTED_ERROR_MESSAGE)).into_response()
}
