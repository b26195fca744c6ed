//! breedrelay Core
//!
//! Pure, synchronous core of the breedrelay image-classification relay.
//!
//! This crate provides:
//! - Common types for encoded/decoded images, raw and ranked predictions
//! - Error types and result handling
//! - Base64 image decoding with data-URI stripping and padding repair
//! - Classifier label cleanup (synset-prefix stripping, title-casing)
//! - Score ranking with top-K selection and best-match marking
//!
//! Every operation here is a pure function over its arguments with no
//! shared mutable state, so the core can be called concurrently from any
//! number of request handlers without coordination. Backend integrations
//! live in `breedrelay-backends`.

pub mod decode;
pub mod error;
pub mod label;
pub mod rank;
pub mod types;

pub use decode::decode;
pub use error::{Error, Result};
pub use label::canonicalize;
pub use rank::rank;
pub use types::{
    DecodedImage, PredictRequest, PredictResponse, PredictionSet, RankedPrediction, RawPrediction,
    RawPredictions,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::decode::decode;
    pub use crate::error::{Error, Result};
    pub use crate::label::canonicalize;
    pub use crate::rank::rank;
    pub use crate::types::{
        DecodedImage, PredictRequest, PredictResponse, PredictionSet, RankedPrediction,
        RawPrediction, RawPredictions,
    };
}
