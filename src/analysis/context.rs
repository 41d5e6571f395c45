/*!
 * Context windows around term mentions.
 *
 * For every sentence containing a matched term, a window of neighboring
 * sentences is assembled and the matched span highlighted. Window size is
 * a named option rather than a free integer so callers cannot request
 * unbounded context.
 */

use regex::Regex;
use serde::{Deserialize, Serialize};

/// How many sentences of padding to include around a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextDepth {
    /// Just the sentence with the mention
    Minimal,
    /// One sentence before and after
    #[default]
    Medium,
    /// Two sentences before and after
    Large,
}

impl ContextDepth {
    /// Sentences of padding on each side of the mention.
    pub fn padding(&self) -> usize {
        match self {
            Self::Minimal => 0,
            Self::Medium => 1,
            Self::Large => 2,
        }
    }
}

impl std::fmt::Display for ContextDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Minimal => "minimal",
            Self::Medium => "medium",
            Self::Large => "large",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for ContextDepth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(anyhow::anyhow!("Invalid context depth: {}", s)),
        }
    }
}

/// One context snippet around a mention.
#[derive(Debug, Clone, Serialize)]
pub struct ContextSnippet {
    /// The plain joined sentence window
    pub raw: String,

    /// The window with the first matched span wrapped in `<strong>`
    pub highlighted: String,

    /// Index of the mention sentence in the segmented input
    pub sentence_index: usize,
}

/// Collect a context snippet for every sentence containing `term`.
///
/// The search is a case-insensitive substring match; the window is clamped
/// to the document bounds. Returns snippets in sentence order.
pub fn contexts_for_term(
    sentences: &[String],
    term: &str,
    depth: ContextDepth,
) -> Vec<ContextSnippet> {
    let finder = match Regex::new(&format!("(?i){}", regex::escape(term))) {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };
    let padding = depth.padding();

    let mut snippets = Vec::new();
    for (index, sentence) in sentences.iter().enumerate() {
        if !finder.is_match(sentence) {
            continue;
        }

        let start = index.saturating_sub(padding);
        let end = (index + padding + 1).min(sentences.len());
        let raw = sentences[start..end].join(" ").trim().to_string();
        let highlighted = highlight_first(&finder, &raw);

        snippets.push(ContextSnippet {
            raw,
            highlighted,
            sentence_index: index,
        });
    }

    snippets
}

/// Drop snippets whose raw window duplicates an earlier one exactly.
///
/// A shortcut hit and a full-name hit landing in the same sentence produce
/// byte-identical windows; only the first survives.
pub fn dedup_contexts(snippets: Vec<ContextSnippet>) -> Vec<ContextSnippet> {
    let mut seen = std::collections::HashSet::new();
    snippets
        .into_iter()
        .filter(|snippet| seen.insert(snippet.raw.clone()))
        .collect()
}

/// Wrap the first occurrence of the matched span in an emphasis marker.
fn highlight_first(finder: &Regex, text: &str) -> String {
    finder
        .replacen(text, 1, |captures: &regex::Captures<'_>| {
            format!("<strong>{}</strong>", &captures[0])
        })
        .into_owned()
}
