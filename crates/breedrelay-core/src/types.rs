//! Core types for breedrelay

use serde::{Deserialize, Serialize};

pub use image::ImageFormat;

/// A single (label, score) pair as produced by a classification backend.
///
/// Immutable once returned by the backend; the label is still in its raw
/// vocabulary form (possibly synset-prefixed) and the score is in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    /// Raw classifier label
    pub label: String,

    /// Confidence score (0.0-1.0)
    pub score: f64,
}

impl RawPrediction {
    /// Create a new raw prediction
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Backend output, tolerant of the known one-level-nesting quirk.
///
/// Some backend response shapes wrap the prediction list in an extra
/// single-element list. Deserialization accepts either shape;
/// [`RawPredictions::into_flat`] normalizes to the flat form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPredictions {
    /// The expected flat shape
    Flat(Vec<RawPrediction>),

    /// One level deeper than expected
    Nested(Vec<Vec<RawPrediction>>),
}

impl RawPredictions {
    /// Unwrap at most one nesting level.
    ///
    /// A nested shape with several inner sequences is flattened in order.
    pub fn into_flat(self) -> Vec<RawPrediction> {
        match self {
            Self::Flat(predictions) => predictions,
            Self::Nested(mut groups) => {
                if groups.len() == 1 {
                    groups.remove(0)
                } else {
                    groups.into_iter().flatten().collect()
                }
            }
        }
    }
}

impl From<Vec<RawPrediction>> for RawPredictions {
    fn from(predictions: Vec<RawPrediction>) -> Self {
        Self::Flat(predictions)
    }
}

impl From<Vec<Vec<RawPrediction>>> for RawPredictions {
    fn from(groups: Vec<Vec<RawPrediction>>) -> Self {
        Self::Nested(groups)
    }
}

/// A decoded image payload, scoped to a single request.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Decoded image bytes
    pub bytes: Vec<u8>,

    /// Container format inferred from the byte signature
    pub format: ImageFormat,
}

impl DecodedImage {
    /// MIME type for the inferred container format
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Size of the decoded payload in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A cleaned, ranked prediction ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPrediction {
    /// Human-presentable label
    pub label: String,

    /// Score rounded to 4 decimal places
    pub confidence: f64,

    /// True for exactly one entry per set: the highest-scoring one
    pub is_best_match: bool,
}

/// Ordered set of ranked predictions, descending by confidence.
///
/// Index 0 is implicitly the argmax; downstream consumers must preserve
/// the ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionSet(Vec<RankedPrediction>);

impl PredictionSet {
    /// Create an empty prediction set
    pub fn new() -> Self {
        Self::default()
    }

    /// The best match, if the set is nonempty
    pub fn best(&self) -> Option<&RankedPrediction> {
        self.0.first()
    }

    /// Number of predictions in the set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over predictions in rank order
    pub fn iter(&self) -> std::slice::Iter<'_, RankedPrediction> {
        self.0.iter()
    }

    /// Consume the set, yielding the ordered predictions
    pub fn into_inner(self) -> Vec<RankedPrediction> {
        self.0
    }
}

impl From<Vec<RankedPrediction>> for PredictionSet {
    fn from(predictions: Vec<RankedPrediction>) -> Self {
        Self(predictions)
    }
}

impl FromIterator<RankedPrediction> for PredictionSet {
    fn from_iter<I: IntoIterator<Item = RankedPrediction>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PredictionSet {
    type Item = RankedPrediction;
    type IntoIter = std::vec::IntoIter<RankedPrediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PredictionSet {
    type Item = &'a RankedPrediction;
    type IntoIter = std::slice::Iter<'a, RankedPrediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Incoming prediction request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictRequest {
    /// Base64-encoded image, optionally with a data-URI prefix
    pub image: Option<String>,

    /// How many predictions to return; falls back to the configured default
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl PredictRequest {
    /// Create a request for the given encoded image
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            top_k: None,
        }
    }

    /// Override the number of predictions to return
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }
}

/// Success envelope for a prediction response.
///
/// Older consumers expect the first entry mirrored under `top1` and the
/// full list under `top5`; [`PredictResponse::with_compat_keys`] re-exposes
/// the already-ranked set under those names without recomputation.
#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    /// Always `"success"`; errors never carry a partial result
    pub status: &'static str,

    /// Ranked predictions, best match first
    pub predictions: PredictionSet,

    /// Compatibility mirror of the best match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top1: Option<RankedPrediction>,

    /// Compatibility mirror of the full list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top5: Option<PredictionSet>,
}

impl PredictResponse {
    /// Wrap a ranked prediction set in the success envelope
    pub fn new(predictions: PredictionSet) -> Self {
        Self {
            status: "success",
            predictions,
            top1: None,
            top5: None,
        }
    }

    /// Mirror the result under the legacy `top1`/`top5` keys
    pub fn with_compat_keys(mut self) -> Self {
        self.top1 = self.predictions.best().cloned();
        self.top5 = Some(self.predictions.clone());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(label: &str, confidence: f64, best: bool) -> RankedPrediction {
        RankedPrediction {
            label: label.to_string(),
            confidence,
            is_best_match: best,
        }
    }

    #[test]
    fn raw_predictions_accepts_flat_and_nested_wire_shapes() {
        let flat: RawPredictions =
            serde_json::from_str(r#"[{"label":"n0-fox","score":0.9}]"#).unwrap();
        assert_eq!(flat.into_flat(), vec![RawPrediction::new("n0-fox", 0.9)]);

        let nested: RawPredictions =
            serde_json::from_str(r#"[[{"label":"n0-fox","score":0.9}]]"#).unwrap();
        assert_eq!(nested.into_flat(), vec![RawPrediction::new("n0-fox", 0.9)]);
    }

    #[test]
    fn nested_with_single_group_unwraps_one_level() {
        let raw = RawPredictions::from(vec![vec![
            RawPrediction::new("a", 0.5),
            RawPrediction::new("b", 0.3),
        ]]);
        assert_eq!(raw.into_flat().len(), 2);
    }

    #[test]
    fn response_serializes_to_success_envelope() {
        let set = PredictionSet::from(vec![ranked("Siberian Husky", 0.81, true)]);
        let json = serde_json::to_value(PredictResponse::new(set)).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["predictions"][0]["label"], "Siberian Husky");
        assert_eq!(json["predictions"][0]["is_best_match"], true);
        assert!(json.get("top1").is_none());
    }

    #[test]
    fn compat_keys_mirror_the_ranked_set() {
        let set = PredictionSet::from(vec![
            ranked("Siberian Husky", 0.81, true),
            ranked("Malamute", 0.04, false),
        ]);
        let json = serde_json::to_value(PredictResponse::new(set).with_compat_keys()).unwrap();

        assert_eq!(json["top1"]["label"], "Siberian Husky");
        assert_eq!(json["top5"].as_array().unwrap().len(), 2);
        assert_eq!(json["top5"], json["predictions"]);
    }

    #[test]
    fn prediction_set_exposes_the_best_match() {
        let set = PredictionSet::from(vec![
            ranked("A", 0.9, true),
            ranked("B", 0.1, false),
        ]);
        assert_eq!(set.best().map(|p| p.label.as_str()), Some("A"));
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }
}
