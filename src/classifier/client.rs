use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{config::EndpointConfig, domain::PredictionResult};

use super::extract::parse_prediction;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("classification endpoint returned {status}")]
    Server { status: StatusCode, body: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct ClassifierClient {
    http: Client,
    config: EndpointConfig,
}

impl ClassifierClient {
    pub fn new(http: Client, config: EndpointConfig) -> Self {
        Self { http, config }
    }

    /// Submits one URL to the classification endpoint as a form-encoded POST
    /// and extracts the verdict from the HTML body it returns.
    pub async fn classify(&self, url: &str) -> Result<PredictionResult, SubmitError> {
        let response = self
            .http
            .post(self.config.predict_url.clone())
            .timeout(self.config.request_timeout)
            .form(&[("url", url)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Server { status, body });
        }

        let html = response.text().await?;
        Ok(parse_prediction(&html))
    }
}
