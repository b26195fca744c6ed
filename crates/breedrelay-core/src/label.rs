//! Raw classifier label cleanup.
//!
//! Classification vocabularies derived from WordNet prefix labels with a
//! synset id (`n02110185-siberian_husky`); the prefix is stripped and the
//! remainder formatted for presentation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading synset-id prefix, e.g. `n02110185-`.
static SYNSET_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^n\d+-").expect("synset prefix pattern is valid"));

/// Turn a raw classifier label into a clean, human-presentable string.
///
/// Strips one leading synset-id prefix, replaces underscores with spaces,
/// and title-cases each whitespace-delimited word. Total over any input;
/// labels without a prefix only get the underscore and case normalization.
pub fn canonicalize(raw_label: &str) -> String {
    let stripped = SYNSET_PREFIX.replace(raw_label, "");
    title_case(&stripped.replace('_', " "))
}

/// Uppercase the first letter of each word, lowercase the rest.
///
/// Whitespace is preserved as-is; only word characters change case.
fn title_case(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut at_word_start = true;

    for ch in input.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            output.push(ch);
        } else if at_word_start {
            output.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            output.extend(ch.to_lowercase());
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_synset_prefix_and_title_cases() {
        assert_eq!(canonicalize("n02110185-siberian_husky"), "Siberian Husky");
        assert_eq!(canonicalize("n02109961-eskimo_dog"), "Eskimo Dog");
        assert_eq!(canonicalize("n02110063-malamute"), "Malamute");
    }

    #[test]
    fn short_synset_ids_still_match() {
        assert_eq!(canonicalize("n0-fox"), "Fox");
    }

    #[test]
    fn only_one_leading_prefix_is_removed() {
        assert_eq!(canonicalize("n123-n456-terrier"), "N456-terrier");
    }

    #[test]
    fn labels_without_a_prefix_only_get_normalized() {
        assert_eq!(canonicalize("golden_retriever"), "Golden Retriever");
        assert_eq!(canonicalize("PUG"), "Pug");
        assert_eq!(canonicalize("basset hound"), "Basset Hound");
    }

    #[test]
    fn prefix_requires_digits_and_a_dash() {
        // no digits after the n, so nothing is stripped
        assert_eq!(canonicalize("n-dog"), "N-dog");
        // prefix not at the start is kept
        assert_eq!(canonicalize("dog-n123-x"), "Dog-n123-x");
    }

    #[test]
    fn is_total_over_edge_inputs() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("___"), "   ");
        assert_eq!(canonicalize("n42-"), "");
    }

    #[test]
    fn preserves_interior_whitespace_layout() {
        assert_eq!(canonicalize("great__dane"), "Great  Dane");
    }
}
