//! Classification backend trait

use async_trait::async_trait;
use breedrelay_core::types::{DecodedImage, RawPrediction};
use breedrelay_core::Result;

/// Trait for all classification backends.
///
/// A backend accepts decoded image bytes and returns an unordered list of
/// (label, score) pairs. Implementations must not retry internally;
/// transient conditions surface as
/// [`Error::BackendUnavailable`](breedrelay_core::Error::BackendUnavailable)
/// or [`Error::BackendTimeout`](breedrelay_core::Error::BackendTimeout) and
/// the retry decision belongs to the caller.
#[async_trait]
pub trait ClassificationBackend: Send + Sync {
    /// Classify the given image
    async fn classify(&self, image: &DecodedImage) -> Result<Vec<RawPrediction>>;

    /// Get the backend name
    fn name(&self) -> &str;
}
