//! Trait abstraction for the submission endpoint to enable mocking in tests

use crate::state::application::{SubmissionRequest, SubmissionResponse};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("could not reach the submission endpoint: {0}")]
    Transport(String),
    #[error("submission endpoint answered with status {0}")]
    Status(u16),
    #[error("unexpected response from the submission endpoint: {0}")]
    Decode(String),
    /// The endpoint answered `success: false`
    #[error("application rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
}

impl SubmitError {
    /// Translator key for the banner shown to the user
    pub fn message_key(&self) -> &'static str {
        match self {
            SubmitError::Rejected(_) => "errors.submission_rejected",
            _ => "errors.submission_failed",
        }
    }

    /// Server-provided detail worth showing next to the banner
    pub fn detail(&self) -> Option<String> {
        match self {
            SubmitError::Rejected(message) => message.clone(),
            _ => None,
        }
    }
}

/// Submission endpoint operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Send one application and return the endpoint's envelope
    async fn submit(&self, request: &SubmissionRequest)
        -> Result<SubmissionResponse, SubmitError>;
}

/// Submit `request` and unwrap the envelope into the application reference.
/// An accepted envelope without a reference falls back to one derived from
/// the application id.
pub async fn submit_application(
    client: Arc<dyn SubmissionClient>,
    request: SubmissionRequest,
) -> Result<String, SubmitError> {
    let response = client.submit(&request).await?;
    if !response.success {
        tracing::warn!(application_id = %request.application_id, "application rejected");
        return Err(SubmitError::Rejected(response.message));
    }
    Ok(response
        .reference
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| fallback_reference(&request)))
}

pub(crate) fn fallback_reference(request: &SubmissionRequest) -> String {
    let id = request.application_id.simple().to_string();
    format!("KYC-{}", id[..8].to_uppercase())
}
