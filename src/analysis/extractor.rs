/*!
 * Reference extraction orchestrator.
 *
 * Combines section location, markup stripping, term detection, and
 * context building into one analysis pass over a fetched document. The
 * result aggregates every detected canonical name into a single Mention
 * carrying all of its deduplicated context snippets.
 */

use std::collections::HashSet;

use log::{debug, warn};
use regex::Regex;
use serde::Serialize;

use super::context::{self, ContextDepth, ContextSnippet};
use super::matcher::{self, TermHit};
use super::section;
use super::segmenter;
use crate::knowledge::{Category, KnowledgeBase};
use crate::markup;

/// A document under analysis, in whichever forms the fetcher produced.
#[derive(Debug, Clone, Default)]
pub struct SourceDocument {
    /// Raw wikitext, when fetched through the API
    pub wikitext: Option<String>,

    /// Rendered HTML for display and link harvesting
    pub html: Option<String>,
}

impl SourceDocument {
    /// Document with only a wikitext form.
    pub fn from_wikitext(wikitext: impl Into<String>) -> Self {
        Self {
            wikitext: Some(wikitext.into()),
            html: None,
        }
    }

    /// Document with only an HTML form.
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            wikitext: None,
            html: Some(html.into()),
        }
    }
}

/// The section actually analyzed, after anchor resolution and fallback.
#[derive(Debug, Clone)]
pub struct SectionView {
    /// Wikitext slice of the section, when a wikitext form exists
    pub wikitext: Option<String>,

    /// HTML slice of the section, when an HTML form exists
    pub html: Option<String>,

    /// Heading title when the anchor was located; None on whole-document
    /// fallback
    pub title: Option<String>,
}

/// Aggregated record of one canonical name found in the analyzed text.
#[derive(Debug, Clone, Serialize)]
pub struct Mention {
    /// Owning category
    pub category: Category,

    /// Canonical page name
    pub name: String,

    /// Shortcut form that matched, e.g. "WP:NPOV"; None when the name
    /// itself was matched
    pub shortcut: Option<String>,

    /// Canonical page URL
    pub url: String,

    /// All deduplicated context snippets for this name
    pub contexts: Vec<ContextSnippet>,
}

/// Result of one analysis pass. Constructed fresh per request, never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub policies: Vec<Mention>,
    pub guidelines: Vec<Mention>,
    pub essays: Vec<Mention>,

    /// Heading title of the analyzed section, when one was located
    pub section_title: Option<String>,

    /// Plain text the matcher ran over
    pub section_text: String,

    /// Display HTML with mention annotations, empty when no HTML form
    /// was available
    pub section_html: String,
}

impl AnalysisResult {
    /// Mentions across all categories, in category order.
    pub fn all_mentions(&self) -> impl Iterator<Item = &Mention> {
        self.policies
            .iter()
            .chain(self.guidelines.iter())
            .chain(self.essays.iter())
    }

    /// Whether nothing was detected in any category.
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty() && self.guidelines.is_empty() && self.essays.is_empty()
    }
}

/// Orchestrates one analysis pass against a knowledge base.
pub struct ReferenceExtractor<'a> {
    kb: &'a KnowledgeBase,
    depth: ContextDepth,
}

impl<'a> ReferenceExtractor<'a> {
    /// Extractor with the default (medium) context depth.
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self {
            kb,
            depth: ContextDepth::Medium,
        }
    }

    /// Extractor with an explicit context depth.
    pub fn with_depth(kb: &'a KnowledgeBase, depth: ContextDepth) -> Self {
        Self { kb, depth }
    }

    /// Resolve the target section in whichever document forms exist.
    ///
    /// A missing anchor, or an anchor found in neither form, yields the
    /// whole document; section misses are log-worthy, not errors.
    pub fn locate_section(&self, doc: &SourceDocument, anchor: Option<&str>) -> SectionView {
        let Some(anchor) = anchor else {
            return SectionView {
                wikitext: doc.wikitext.clone(),
                html: doc.html.clone(),
                title: None,
            };
        };

        let wikitext_slice = doc.wikitext.as_deref().and_then(|wikitext| {
            section::locate_in_wikitext(wikitext, anchor)
                .map(|s| (s.title.clone(), s.slice(wikitext).to_string()))
        });
        let html_slice = doc.html.as_deref().and_then(|html| {
            section::locate_in_html(html, anchor)
                .map(|s| (s.title.clone(), s.slice(html).to_string()))
        });

        if wikitext_slice.is_none() && html_slice.is_none() {
            warn!(
                "Section '{}' not found, falling back to the whole document",
                anchor
            );
            return SectionView {
                wikitext: doc.wikitext.clone(),
                html: doc.html.clone(),
                title: None,
            };
        }

        let title = wikitext_slice
            .as_ref()
            .map(|(t, _)| t.clone())
            .or_else(|| html_slice.as_ref().map(|(t, _)| t.clone()));

        SectionView {
            wikitext: wikitext_slice.map(|(_, s)| s).or_else(|| doc.wikitext.clone()),
            html: html_slice.map(|(_, s)| s).or_else(|| doc.html.clone()),
            title,
        }
    }

    /// Run the full analysis over a document.
    pub fn analyze(&self, doc: &SourceDocument, anchor: Option<&str>) -> AnalysisResult {
        let view = self.locate_section(doc, anchor);

        let text = match (&view.wikitext, &view.html) {
            (Some(wikitext), _) => markup::wikitext_to_plain(wikitext),
            (None, Some(html)) => markup::html_to_plain(html),
            (None, None) => String::new(),
        };
        let text = markup::clean_discussion_text(&text);
        let sentences = segmenter::segment(&text);

        // Union of link-derived and text-derived detections, first hit per
        // canonical name wins.
        let mut hits: Vec<TermHit> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        if let Some(html) = &view.html {
            for hit in matcher::find_linked_pages(html, self.kb) {
                if seen.insert(hit.name.clone()) {
                    hits.push(hit);
                }
            }
        }
        for hit in matcher::find_mentions(&text, self.kb) {
            if seen.insert(hit.name.clone()) {
                hits.push(hit);
            }
        }

        let mut policies = Vec::new();
        let mut guidelines = Vec::new();
        let mut essays = Vec::new();
        for hit in &hits {
            let mention = self.build_mention(hit, &sentences);
            match hit.category {
                Category::Policy => policies.push(mention),
                Category::Guideline => guidelines.push(mention),
                Category::Essay => essays.push(mention),
            }
        }

        debug!(
            "Analysis found {} policies, {} guidelines, {} essays",
            policies.len(),
            guidelines.len(),
            essays.len()
        );

        let section_html = match view.html.as_deref() {
            Some(html) => {
                let all: Vec<&Mention> = policies
                    .iter()
                    .chain(guidelines.iter())
                    .chain(essays.iter())
                    .collect();
                annotate_mentions(html, &all)
            }
            None => String::new(),
        };

        AnalysisResult {
            policies,
            guidelines,
            essays,
            section_title: view.title,
            section_text: text,
            section_html,
        }
    }

    /// Aggregate every context for one detected name.
    fn build_mention(&self, hit: &TermHit, sentences: &[String]) -> Mention {
        let shortcut = hit
            .is_shortcut_form()
            .then(|| hit.matched_form.clone());

        let mut snippets: Vec<ContextSnippet> = Vec::new();
        if let Some(alias) = &shortcut {
            snippets.extend(context::contexts_for_term(sentences, alias, self.depth));
        } else if hit.matched_form.to_lowercase() != hit.name.to_lowercase() {
            snippets.extend(context::contexts_for_term(
                sentences,
                &hit.matched_form,
                self.depth,
            ));
        }
        snippets.extend(context::contexts_for_term(sentences, &hit.name, self.depth));

        let url = self
            .kb
            .entry(hit.category, &hit.name)
            .map(|entry| entry.url.clone())
            .unwrap_or_else(|| KnowledgeBase::canonical_url(&hit.name));

        Mention {
            category: hit.category,
            name: hit.name.clone(),
            shortcut,
            url,
            contexts: context::dedup_contexts(snippets),
        }
    }
}

/// Wrap the first occurrence of each mention's shortcut in an
/// identifiable span so a UI can scroll to it.
///
/// Best-effort: a shortcut that cannot be placed (only occurring inside
/// tag markup, or absent from the rendered form) is skipped without
/// disturbing the other annotations.
fn annotate_mentions(html: &str, mentions: &[&Mention]) -> String {
    let mut annotated = html.to_string();
    for (index, mention) in mentions.iter().enumerate() {
        let Some(shortcut) = &mention.shortcut else {
            continue;
        };
        match annotate_first_occurrence(&annotated, shortcut, index) {
            Some(updated) => annotated = updated,
            None => debug!("Could not annotate '{}' in section markup", shortcut),
        }
    }
    annotated
}

fn annotate_first_occurrence(html: &str, shortcut: &str, index: usize) -> Option<String> {
    let finder = Regex::new(&format!("(?i){}", regex::escape(shortcut))).ok()?;
    for found in finder.find_iter(html) {
        if inside_tag(html, found.start()) {
            continue;
        }
        let mut out = String::with_capacity(html.len() + 64);
        out.push_str(&html[..found.start()]);
        out.push_str(&format!(
            r#"<span id="ref-mention-{}" class="ref-mention">{}</span>"#,
            index,
            found.as_str()
        ));
        out.push_str(&html[found.end()..]);
        return Some(out);
    }
    None
}

/// Whether a byte position falls inside tag markup rather than text.
fn inside_tag(html: &str, position: usize) -> bool {
    let before = &html[..position];
    match (before.rfind('<'), before.rfind('>')) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        _ => false,
    }
}
