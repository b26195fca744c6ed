//! Hosted inference backend relaying to an HTTP classification API.
//!
//! Speaks the Hugging Face image-classification shape: POST the raw image
//! bytes to `<endpoint>/<model_id>` with a bearer token, get back a JSON
//! list of `{label, score}` objects (occasionally wrapped in one extra
//! list level).

use async_trait::async_trait;
use breedrelay_core::types::{DecodedImage, RawPrediction, RawPredictions};
use breedrelay_core::{Error, Result};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::backend::ClassificationBackend;
use crate::config::HostedConfig;

/// Remote HTTP classification backend.
pub struct HostedBackend {
    client: reqwest::Client,
    endpoint: String,
    model_id: String,
    token: Option<String>,
}

/// Error body shape used by hosted inference APIs.
///
/// `estimated_time` accompanies cold-start responses and is surfaced to the
/// caller as a retry hint.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    estimated_time: Option<f64>,
}

impl HostedBackend {
    /// Create a backend for the given model with default settings
    pub fn new(model_id: impl Into<String>) -> Result<Self> {
        Self::from_config(&HostedConfig {
            model_id: model_id.into(),
            ..HostedConfig::default()
        })
    }

    /// Create a backend from configuration.
    ///
    /// The per-request deadline from the config is installed on the HTTP
    /// client, so an unresponsive upstream surfaces as
    /// [`Error::BackendTimeout`].
    pub fn from_config(config: &HostedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model_id: config.model_id.clone(),
            token: config.token(),
        })
    }

    /// Override the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn model_url(&self) -> String {
        format!("{}/{}", self.endpoint, self.model_id)
    }
}

#[async_trait]
impl ClassificationBackend for HostedBackend {
    async fn classify(&self, image: &DecodedImage) -> Result<Vec<RawPrediction>> {
        tracing::debug!(model = %self.model_id, bytes = image.len(), "relaying image to hosted backend");

        let mut request = self
            .client
            .post(self.model_url())
            .header(reqwest::header::CONTENT_TYPE, image.mime_type())
            .body(image.bytes.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();

        if status.is_success() {
            let predictions: RawPredictions = response
                .json()
                .await
                .map_err(|e| Error::backend(format!("unexpected response body: {e}")))?;
            Ok(predictions.into_flat())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(map_error_status(status, &body))
        }
    }

    fn name(&self) -> &str {
        "hosted"
    }
}

fn map_transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::BackendTimeout
    } else {
        Error::backend(err.to_string())
    }
}

/// Map an upstream error status to the relay error taxonomy.
///
/// 503 is the cold-start signal and 404 a misconfigured model id; anything
/// else is passed through with the backend-provided detail.
fn map_error_status(status: StatusCode, body: &str) -> Error {
    let detail = error_detail(body);
    match status {
        StatusCode::SERVICE_UNAVAILABLE => Error::unavailable(detail),
        StatusCode::NOT_FOUND => Error::not_found(detail),
        _ => Error::backend(format!("{status}: {detail}")),
    }
}

fn error_detail(body: &str) -> String {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .error
        .unwrap_or_else(|| {
            if body.is_empty() {
                "backend returned an error".to_string()
            } else {
                body.to_string()
            }
        });

    match parsed.estimated_time {
        Some(seconds) => format!("{message} (retry in about {seconds:.0}s)"),
        None => message,
    }
}
