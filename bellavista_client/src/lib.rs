//! Client half of the contact pipeline.
//!
//! One [`FormController`] instance owns the state of one form-fill session:
//! the current field values and the submission endpoint.
//! Validation deliberately mirrors the original client-side rules, which are
//! slightly laxer than the server's (see the phone rule); the server remains
//! authoritative.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod validate;

use validate::FieldError;

pub const TRANSPORT_ERROR_MESSAGE: &str =
    "An error occurred while sending your message. Please try again.";

/// The raw form field values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// The server's verdict on a submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Client-side validation failed; nothing was sent.
    Invalid(Vec<FieldError>),
    /// The server answered; on success the form fields have been reset.
    Response(ServerResponse),
    /// The request or the response parse failed; the user retries manually.
    TransportFailure,
}

impl SubmissionOutcome {
    /// The message to display for this outcome, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Invalid(_) => None,
            Self::Response(response) => Some(&response.message),
            Self::TransportFailure => Some(TRANSPORT_ERROR_MESSAGE),
        }
    }
}

#[derive(Debug)]
pub struct FormController {
    endpoint: String,
    client: reqwest::Client,
    fields: FormFields,
}

impl FormController {
    /// Creates a controller for one form-fill session. Dropping the
    /// controller ends the session; no global state is left behind.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
            fields: FormFields::default(),
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// Validates the current fields and, if they pass, posts them
    /// form-encoded to the endpoint.
    ///
    /// Taking `&mut self` is the submit-button-disabled analogue: one
    /// controller cannot have two submissions in flight.
    ///
    /// On a `success: true` response the retained fields are cleared; on any
    /// failure they are kept so the user can correct and resubmit.
    pub async fn submit(&mut self) -> SubmissionOutcome {
        if let Err(errors) = validate::validate(&self.fields) {
            return SubmissionOutcome::Invalid(errors);
        }

        let outcome = self.send().await;

        if let SubmissionOutcome::Response(response) = &outcome {
            if response.success {
                self.fields = FormFields::default();
            }
        }

        outcome
    }

    async fn send(&self) -> SubmissionOutcome {
        let result = async {
            self.client
                .post(&self.endpoint)
                .form(&self.fields)
                .send()
                .await?
                .json::<ServerResponse>()
                .await
        }
        .await;

        match result {
            Ok(response) => SubmissionOutcome::Response(response),
            Err(err) => {
                debug!("contact form submission failed: {err}");
                SubmissionOutcome::TransportFailure
            }
        }
    }
}

pub(crate) static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
