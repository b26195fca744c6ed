//! End-to-end prediction pipeline: decode, classify, rank.

use std::sync::Arc;
use std::time::Duration;

use breedrelay_core::types::{PredictRequest, PredictionSet};
use breedrelay_core::{decode, rank, Error, Result};

use crate::backend::ClassificationBackend;
use crate::config::RelayConfig;

/// Wires the relay request flow around a classification backend.
///
/// The pipeline itself holds no mutable state and can serve any number of
/// concurrent requests; the backend is the only boundary where I/O or
/// inference latency occurs.
#[derive(Clone)]
pub struct RelayPipeline {
    backend: Arc<dyn ClassificationBackend>,
    default_top_k: usize,
    classify_timeout: Duration,
}

impl RelayPipeline {
    /// Create a pipeline with default settings (top 3, 60 s deadline)
    pub fn new(backend: Arc<dyn ClassificationBackend>) -> Self {
        Self {
            backend,
            default_top_k: 3,
            classify_timeout: Duration::from_secs(60),
        }
    }

    /// Create a pipeline with settings taken from configuration
    pub fn from_config(config: &RelayConfig, backend: Arc<dyn ClassificationBackend>) -> Self {
        Self::new(backend)
            .with_top_k(config.top_k)
            .with_timeout(config.hosted.timeout())
    }

    /// Set the default number of predictions returned
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }

    /// Set the deadline for a single backend call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.classify_timeout = timeout;
        self
    }

    /// Run one request through decode, classify, and rank.
    ///
    /// A missing `image` field fails with [`Error::MissingInput`] before any
    /// backend call. The backend call runs under the configured deadline;
    /// exceeding it maps to [`Error::BackendTimeout`] and the in-flight
    /// request is dropped, which cancels it. No retries happen here: either
    /// a full [`PredictionSet`] comes back or an error, never both.
    pub async fn predict(&self, request: &PredictRequest) -> Result<PredictionSet> {
        let encoded = request.image.as_deref().ok_or(Error::MissingInput)?;
        let image = decode::decode(encoded)?;

        tracing::debug!(
            backend = self.backend.name(),
            bytes = image.len(),
            "classifying image"
        );

        let raw = tokio::time::timeout(self.classify_timeout, self.backend.classify(&image))
            .await
            .map_err(|_| Error::BackendTimeout)??;

        let top_k = request.top_k.unwrap_or(self.default_top_k);
        Ok(rank::rank(raw, top_k))
    }

    /// The backend this pipeline relays to
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}
