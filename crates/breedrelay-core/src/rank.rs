//! Prediction ranking and top-K selection.

use std::cmp::Ordering;

use crate::label::canonicalize;
use crate::types::{PredictionSet, RankedPrediction, RawPredictions};

/// Rank raw backend output into a presentation-ready prediction set.
///
/// Accepts either a flat prediction list or the nested wire shape (see
/// [`RawPredictions`]); one nesting level is unwrapped before ranking.
/// Predictions are stably sorted by descending score (ties keep the
/// backend's original order), truncated to `top_k`, labels canonicalized,
/// and scores rounded to 4 decimal places half away from zero. Exactly the
/// first entry of a nonempty set carries `is_best_match`.
///
/// An empty input yields an empty set, never an error.
pub fn rank(raw: impl Into<RawPredictions>, top_k: usize) -> PredictionSet {
    let mut predictions = raw.into().into_flat();

    // Stable sort so ties resolve to the first occurrence; NaN compares
    // equal and therefore cannot reorder anything.
    predictions.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    predictions.truncate(top_k);

    predictions
        .into_iter()
        .enumerate()
        .map(|(index, prediction)| RankedPrediction {
            label: canonicalize(&prediction.label),
            confidence: round4(prediction.score),
            is_best_match: index == 0,
        })
        .collect()
}

/// Round to 4 decimal places, half away from zero (`f64::round` semantics).
fn round4(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawPrediction;

    fn raw(label: &str, score: f64) -> RawPrediction {
        RawPrediction::new(label, score)
    }

    #[test]
    fn ranks_the_husky_example() {
        let predictions = vec![
            raw("n02110185-siberian_husky", 0.81),
            raw("n02109961-eskimo_dog", 0.15),
            raw("n02110063-malamute", 0.04),
        ];

        let set = rank(predictions, 3);
        let ranked = set.into_inner();

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].label, "Siberian Husky");
        assert_eq!(ranked[0].confidence, 0.81);
        assert!(ranked[0].is_best_match);
        assert_eq!(ranked[1].label, "Eskimo Dog");
        assert!(!ranked[1].is_best_match);
        assert_eq!(ranked[2].label, "Malamute");
        assert!(!ranked[2].is_best_match);
    }

    #[test]
    fn sorts_unordered_input_by_descending_score() {
        let set = rank(
            vec![raw("low", 0.1), raw("high", 0.9), raw("mid", 0.5)],
            3,
        );
        let labels: Vec<_> = set.iter().map(|p| p.label.clone()).collect();
        assert_eq!(labels, ["High", "Mid", "Low"]);
    }

    #[test]
    fn exactly_one_best_match_with_the_maximum_score() {
        let set = rank(
            vec![raw("a", 0.2), raw("b", 0.7), raw("c", 0.1)],
            5,
        );

        let best: Vec<_> = set.iter().filter(|p| p.is_best_match).collect();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].label, "B");
        assert_eq!(
            best[0].confidence,
            set.iter().map(|p| p.confidence).fold(f64::MIN, f64::max)
        );
    }

    #[test]
    fn ties_keep_the_backend_order() {
        let set = rank(
            vec![raw("first", 0.5), raw("second", 0.5), raw("third", 0.5)],
            3,
        );
        let labels: Vec<_> = set.iter().map(|p| p.label.clone()).collect();
        assert_eq!(labels, ["First", "Second", "Third"]);
        assert!(set.best().unwrap().is_best_match);
    }

    #[test]
    fn truncates_to_top_k() {
        let predictions: Vec<_> = (0..10).map(|i| raw("dog", 0.1 * i as f64)).collect();
        assert_eq!(rank(predictions, 3).len(), 3);
    }

    #[test]
    fn empty_input_yields_an_empty_set() {
        let set = rank(Vec::<RawPrediction>::new(), 5);
        assert!(set.is_empty());
        assert!(set.best().is_none());
    }

    #[test]
    fn unwraps_a_nested_backend_response() {
        let set = rank(vec![vec![raw("n0-fox", 0.9)]], 3);
        let ranked = set.into_inner();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].label, "Fox");
        assert!(ranked[0].is_best_match);
    }

    #[test]
    fn rounds_scores_to_four_decimal_places() {
        let set = rank(vec![raw("a", 0.123_456), raw("b", 0.000_049)], 2);
        let ranked = set.into_inner();
        assert_eq!(ranked[0].confidence, 0.1235);
        assert_eq!(ranked[1].confidence, 0.0);
    }

    #[test]
    fn idempotent_on_already_ranked_input() {
        let once = rank(
            vec![raw("n02110185-siberian_husky", 0.81), raw("pug", 0.19)],
            2,
        );

        let again_input: Vec<_> = once
            .iter()
            .map(|p| raw(&p.label, p.confidence))
            .collect();
        let twice = rank(again_input, 2);

        assert_eq!(once, twice);
    }
}
