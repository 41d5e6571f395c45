/*!
 * Render handoff shapes for analysis results.
 *
 * The core hands renderers, per category, an ordered list of summaries:
 * shortcut-or-name label, canonical name, URL, mention count, a bounded
 * number of context snippets, and an overflow count. The plain-text
 * rendering here is what the CLI prints; richer frontends consume the
 * same shape as JSON.
 */

use serde::Serialize;

use super::extractor::{AnalysisResult, Mention};
use crate::knowledge::Category;

/// Longest snippet shown before truncation.
const SNIPPET_MAX_CHARS: usize = 200;

/// One rendered entry in a category list.
#[derive(Debug, Clone, Serialize)]
pub struct MentionSummary {
    /// Display label: the shortcut when one matched, else the name
    pub label: String,

    /// Canonical page name
    pub name: String,

    /// Canonical page URL
    pub url: String,

    /// Total number of context snippets found
    pub mention_count: usize,

    /// Up to `max_snippets` raw context snippets, truncated for display
    pub snippets: Vec<String>,

    /// How many further contexts were omitted
    pub more: usize,
}

/// The full render handoff for one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Heading title of the analyzed section, when one was located
    pub section_title: Option<String>,

    pub policies: Vec<MentionSummary>,
    pub guidelines: Vec<MentionSummary>,
    pub essays: Vec<MentionSummary>,

    /// Annotated display HTML (empty when no HTML form existed)
    pub section_html: String,
}

/// Shape an analysis result for rendering.
pub fn build_report(result: &AnalysisResult, max_snippets: usize) -> AnalysisReport {
    AnalysisReport {
        section_title: result.section_title.clone(),
        policies: summarize(&result.policies, max_snippets),
        guidelines: summarize(&result.guidelines, max_snippets),
        essays: summarize(&result.essays, max_snippets),
        section_html: result.section_html.clone(),
    }
}

fn summarize(mentions: &[Mention], max_snippets: usize) -> Vec<MentionSummary> {
    mentions
        .iter()
        .map(|mention| {
            let snippets: Vec<String> = mention
                .contexts
                .iter()
                .take(max_snippets)
                .map(|snippet| truncate_snippet(&snippet.raw))
                .collect();
            MentionSummary {
                label: mention
                    .shortcut
                    .clone()
                    .unwrap_or_else(|| mention.name.clone()),
                name: mention.name.clone(),
                url: mention.url.clone(),
                mention_count: mention.contexts.len(),
                more: mention.contexts.len().saturating_sub(max_snippets),
                snippets,
            }
        })
        .collect()
}

/// Truncate a snippet on a character boundary, appending an ellipsis.
fn truncate_snippet(snippet: &str) -> String {
    if snippet.chars().count() <= SNIPPET_MAX_CHARS {
        return snippet.to_string();
    }
    let cut: String = snippet.chars().take(SNIPPET_MAX_CHARS - 3).collect();
    format!("{}...", cut)
}

/// Render the report as plain text for terminal output.
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();

    if let Some(title) = &report.section_title {
        out.push_str(&format!("Section: {}\n\n", title));
    }

    for (category, summaries) in [
        (Category::Policy, &report.policies),
        (Category::Guideline, &report.guidelines),
        (Category::Essay, &report.essays),
    ] {
        out.push_str(&format!("== {} ==\n", capitalize(category.plural())));
        if summaries.is_empty() {
            out.push_str(&format!(
                "No {} explicitly mentioned in this discussion.\n\n",
                category.plural()
            ));
            continue;
        }
        for summary in summaries {
            if summary.label == summary.name {
                out.push_str(&format!(
                    "{} - {} mention(s)\n  {}\n",
                    summary.name, summary.mention_count, summary.url
                ));
            } else {
                out.push_str(&format!(
                    "{} ({}) - {} mention(s)\n  {}\n",
                    summary.label, summary.name, summary.mention_count, summary.url
                ));
            }
            for snippet in &summary.snippets {
                out.push_str(&format!("  \"{}\"\n", snippet));
            }
            if summary.more > 0 {
                out.push_str(&format!("  ... and {} more\n", summary.more));
            }
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
