use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Form, Json, Router,
};
use bellavista_core_contact_contracts::{ContactService, ContactSubmitError};
use bellavista_models::contact::RawContactSubmission;

use super::internal_server_error;
use crate::models::ContactResponse;

pub const SUCCESS_MESSAGE: &str =
    "Thank you for your message! We will get back to you within 24 hours.";

#[derive(Debug, Clone)]
pub struct ContactRouterConfig {
    pub phone: String,
}

pub fn router(service: Arc<impl ContactService>, config: ContactRouterConfig) -> Router<()> {
    Router::new()
        .route(
            "/contact",
            routing::post(submit).fallback(method_not_allowed),
        )
        .with_state((service, config))
}

async fn submit(
    State((service, config)): State<(Arc<impl ContactService>, ContactRouterConfig)>,
    form: Result<Form<RawContactSubmission>, FormRejection>,
) -> Response {
    // A body the form decoder cannot handle is treated like an empty form:
    // every field fails validation and the client still gets the combined
    // message as JSON instead of a bare 4xx.
    let raw = match form {
        Ok(Form(raw)) => raw,
        Err(rejection) => {
            tracing::debug!("Failed to decode contact form body: {rejection}");
            RawContactSubmission::default()
        }
    };

    let submission = match raw.parse() {
        Ok(submission) => submission,
        // No side effects on validation failure, only the combined message.
        Err(rejected) => return Json(ContactResponse::failure(rejected.to_string())).into_response(),
    };

    match service.submit(submission).await {
        Ok(()) => Json(ContactResponse::success(SUCCESS_MESSAGE)).into_response(),
        Err(ContactSubmitError::Send) => Json(ContactResponse::failure(format!(
            "Sorry, there was an error sending your message. \
             Please try again or call us directly at {}.",
            config.phone
        )))
        .into_response(),
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ContactResponse::failure("Method not allowed")),
    )
        .into_response()
}
