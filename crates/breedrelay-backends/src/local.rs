//! In-process backend over an injected inference capability.
//!
//! The trained model stays outside this crate; callers hand in an opaque
//! inference function (a loaded model's forward pass, or a stub in tests)
//! and the backend takes care of scheduling it off the async executor.

use std::sync::Arc;

use async_trait::async_trait;
use breedrelay_core::types::{DecodedImage, RawPrediction};
use breedrelay_core::{Error, Result};

use crate::backend::ClassificationBackend;

/// Opaque inference capability: decoded image bytes in, raw predictions out.
pub type InferenceFn = dyn Fn(&DecodedImage) -> Result<Vec<RawPrediction>> + Send + Sync;

/// In-process classification backend.
pub struct LocalBackend {
    name: String,
    infer: Arc<InferenceFn>,
}

impl LocalBackend {
    /// Wrap an inference function as a classification backend
    pub fn new<F>(infer: F) -> Self
    where
        F: Fn(&DecodedImage) -> Result<Vec<RawPrediction>> + Send + Sync + 'static,
    {
        Self {
            name: "local".to_string(),
            infer: Arc::new(infer),
        }
    }

    /// Set a descriptive name (e.g. the loaded model's identifier)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[async_trait]
impl ClassificationBackend for LocalBackend {
    async fn classify(&self, image: &DecodedImage) -> Result<Vec<RawPrediction>> {
        let infer = Arc::clone(&self.infer);
        let image = image.clone();

        // Forward passes are CPU-bound; keep them off the async executor.
        tokio::task::spawn_blocking(move || infer(&image))
            .await
            .map_err(|e| Error::backend(format!("inference task failed: {e}")))?
    }

    fn name(&self) -> &str {
        &self.name
    }
}
