/*!
 * Sentence segmentation for discussion text.
 *
 * Splitting is intentionally simple: protect a fixed list of known
 * abbreviations, split on terminal punctuation followed by whitespace,
 * restore the protected periods. Abbreviations outside the static list
 * (or followed by a capitalized word) are not disambiguated further.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Abbreviations whose trailing period must not end a sentence.
const PROTECTED_ABBREVIATIONS: &[&str] = &["Mr.", "Mrs.", "Dr.", "vs.", "e.g.", "i.e.", "etc."];

// Private-use codepoint; cannot occur in wiki text.
const DOT_SENTINEL: char = '\u{e000}';

static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+").unwrap());

/// Split text into sentences.
///
/// Deterministic and stateless: the same input always yields the same
/// ordered sentences. Text without terminal punctuation comes back as a
/// single sentence; empty input yields no sentences.
pub fn segment(text: &str) -> Vec<String> {
    let mut protected = text.to_string();
    for abbreviation in PROTECTED_ABBREVIATIONS {
        let shielded = format!(
            "{}{}",
            &abbreviation[..abbreviation.len() - 1],
            DOT_SENTINEL
        );
        protected = protected.replace(abbreviation, &shielded);
    }

    SENTENCE_BOUNDARY
        .split(&protected)
        .map(|sentence| sentence.replace(DOT_SENTINEL, ".").trim().to_string())
        .filter(|sentence| !sentence.is_empty())
        .collect()
}
