//! Submission endpoint clients

use super::traits::{SubmissionClient, SubmitError};
use crate::config::OnboardConfig;
use crate::state::application::{SubmissionRequest, SubmissionResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Client that POSTs the application as JSON to a configured URL
pub struct HttpSubmissionClient {
    url: String,
    client: Client,
}

impl HttpSubmissionClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionResponse, SubmitError> {
        debug!(url = %self.url, application_id = %request.application_id, "posting application");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "submission endpoint error");
            return Err(SubmitError::Status(status.as_u16()));
        }

        response
            .json::<SubmissionResponse>()
            .await
            .map_err(|e| SubmitError::Decode(e.to_string()))
    }
}

/// Stand-in endpoint: waits, then accepts every application
pub struct SimulatedSubmissionClient {
    delay: Duration,
}

impl SimulatedSubmissionClient {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SubmissionClient for SimulatedSubmissionClient {
    async fn submit(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionResponse, SubmitError> {
        tokio::time::sleep(self.delay).await;
        Ok(SubmissionResponse {
            success: true,
            reference: Some(super::traits::fallback_reference(request)),
            message: None,
        })
    }
}

/// Pick the client for the configured endpoint
pub fn from_config(config: &OnboardConfig) -> Result<Arc<dyn SubmissionClient>, SubmitError> {
    match config.endpoint_url.as_deref() {
        Some(url) => {
            let client = HttpSubmissionClient::new(url, config.request_timeout())?;
            info!(url = client.url(), "using HTTP submission endpoint");
            Ok(Arc::new(client))
        }
        None => {
            info!("no endpoint configured, using simulated submission");
            Ok(Arc::new(SimulatedSubmissionClient::new(
                config.simulated_delay(),
            )))
        }
    }
}
