/*!
 * Term detection against the knowledge base.
 *
 * Three detection paths, in precedence order:
 * 1. wiki-link targets pulled out of rendered HTML,
 * 2. `WP:`-prefixed shortcut tokens in plain text,
 * 3. canonical names in plain text: exact whole-word for every category,
 *    plus a looser first-three-words match for essays, whose titles are
 *    routinely paraphrased rather than quoted. The loose rule trades
 *    precision for recall on purpose.
 *
 * Each canonical name is detected at most once; later rules never
 * re-report a name an earlier rule already found. Unknown shortcuts are
 * ignored silently and malformed input never fails; no matches is an
 * empty result, not an error.
 */

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::knowledge::{Category, KnowledgeBase};

static SHORTCUT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bWP:([A-Za-z0-9]+)\b").unwrap());
static PAGE_NAME_SHORTCUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)WP[:/]?([A-Z0-9]+)").unwrap());
static WIKI_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));

/// One detected knowledge-base reference.
#[derive(Debug, Clone)]
pub struct TermHit {
    /// Owning category
    pub category: Category,

    /// Canonical name from the knowledge base
    pub name: String,

    /// The exact form that matched ("WP:NPOV", or a name as spelled in text)
    pub matched_form: String,

    /// Char offset of the match in the scanned text; 0 for link-derived hits
    pub offset: usize,
}

impl TermHit {
    /// Whether the matched form was a shortcut rather than the page name.
    pub fn is_shortcut_form(&self) -> bool {
        self.matched_form.to_uppercase().starts_with("WP:")
    }
}

/// Find knowledge-base references in plain text.
///
/// Returns at most one hit per canonical name, ordered by rule precedence
/// and then by position. Idempotent: the same text always yields the same
/// hits in the same order.
pub fn find_mentions(text: &str, kb: &KnowledgeBase) -> Vec<TermHit> {
    let mut hits = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    collect_shortcut_hits(text, kb, &mut hits, &mut seen);
    collect_name_hits(text, kb, &mut hits, &mut seen);
    collect_loose_essay_hits(text, kb, &mut hits, &mut seen);

    hits
}

/// Find knowledge-base references among the wiki links of rendered HTML.
///
/// Only links into the project namespace (`/wiki/Wikipedia:...`) are
/// considered. Link hits carry no text offset.
pub fn find_linked_pages(html: &str, kb: &KnowledgeBase) -> Vec<TermHit> {
    let document = Html::parse_document(html);
    let mut hits = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for element in document.select(&WIKI_LINK) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !href.contains("wikipedia.org/wiki/Wikipedia:")
            && !href.starts_with("/wiki/Wikipedia:")
        {
            continue;
        }
        if let Some(hit) = resolve_link_target(href, kb) {
            if seen.insert(hit.name.clone()) {
                hits.push(hit);
            }
        }
    }

    hits
}

/// Resolve one project-namespace link target against the catalog.
fn resolve_link_target(href: &str, kb: &KnowledgeBase) -> Option<TermHit> {
    let raw = href
        .rsplit("/wiki/Wikipedia:")
        .next()
        .unwrap_or(href)
        .split('#')
        .next()
        .unwrap_or("");
    let decoded = urlencoding::decode(raw).map(|s| s.into_owned()).ok()?;
    let page_name = decoded.replace('_', " ");

    if let Some((category, entry)) = kb.resolve_page_name(&page_name) {
        return Some(TermHit {
            category,
            name: entry.name.clone(),
            matched_form: entry.name.clone(),
            offset: 0,
        });
    }

    // The target may itself be a shortcut page, e.g. /wiki/Wikipedia:NPOV
    let alias = match PAGE_NAME_SHORTCUT.captures(&page_name) {
        Some(caps) => caps[1].to_uppercase(),
        None if !page_name.is_empty()
            && page_name.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            page_name.to_uppercase()
        }
        None => return None,
    };
    let (category, entry) = kb.resolve_shortcut(&alias)?;
    Some(TermHit {
        category,
        name: entry.name.clone(),
        matched_form: format!("WP:{}", alias),
        offset: 0,
    })
}

fn collect_shortcut_hits(
    text: &str,
    kb: &KnowledgeBase,
    hits: &mut Vec<TermHit>,
    seen: &mut HashSet<String>,
) {
    for caps in SHORTCUT_TOKEN.captures_iter(text) {
        let alias = caps[1].to_uppercase();
        let Some((category, entry)) = kb.resolve_shortcut(&alias) else {
            continue;
        };
        if !seen.insert(entry.name.clone()) {
            continue;
        }
        hits.push(TermHit {
            category,
            name: entry.name.clone(),
            matched_form: format!("WP:{}", alias),
            offset: caps.get(0).map(|m| m.start()).unwrap_or(0),
        });
    }
}

fn collect_name_hits(
    text: &str,
    kb: &KnowledgeBase,
    hits: &mut Vec<TermHit>,
    seen: &mut HashSet<String>,
) {
    for category in Category::ALL {
        for entry in kb.entries(category) {
            if seen.contains(&entry.name) {
                continue;
            }
            let pattern = format!(r"(?i)\b{}\b", flexible_whitespace(&entry.name));
            let Ok(finder) = Regex::new(&pattern) else {
                continue;
            };
            if let Some(found) = finder.find(text) {
                seen.insert(entry.name.clone());
                hits.push(TermHit {
                    category,
                    name: entry.name.clone(),
                    matched_form: found.as_str().to_string(),
                    offset: found.start(),
                });
            }
        }
    }
}

fn collect_loose_essay_hits(
    text: &str,
    kb: &KnowledgeBase,
    hits: &mut Vec<TermHit>,
    seen: &mut HashSet<String>,
) {
    for entry in kb.entries(Category::Essay) {
        if seen.contains(&entry.name) {
            continue;
        }
        let words: Vec<&str> = entry.name.split_whitespace().collect();
        if words.len() < 3 {
            continue;
        }
        let key_phrase = words[..3].join(" ");
        let pattern = format!("(?i){}", flexible_whitespace(&key_phrase));
        let Ok(finder) = Regex::new(&pattern) else {
            continue;
        };
        if let Some(found) = finder.find(text) {
            seen.insert(entry.name.clone());
            hits.push(TermHit {
                category: Category::Essay,
                name: entry.name.clone(),
                matched_form: found.as_str().to_string(),
                offset: found.start(),
            });
        }
    }
}

/// Escape a name for regex use, letting each internal space match any run
/// of whitespace.
fn flexible_whitespace(name: &str) -> String {
    regex::escape(name).replace(' ', r"\s+")
}
