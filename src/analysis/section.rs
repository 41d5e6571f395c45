/*!
 * Section location in wiki documents.
 *
 * A discussion section is identified by an anchor (from a URL fragment or
 * heading id). Both document forms are supported with the same boundary
 * semantics: the section runs from its heading to the next heading of
 * equal or higher rank, or to the end of the document.
 *
 * Callers treat a miss as "analyze the whole document", never as a hard
 * failure.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h([1-6])([^>]*)>(.*?)</h[1-6]\s*>").unwrap());
static ATTR_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)\bid\s*=\s*"([^"]*)""#).unwrap());
static HEADLINE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<span[^>]*mw-headline[^>]*>").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WIKITEXT_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(={1,6})\s*(.+?)\s*=+\s*$").unwrap());

/// A located section: heading title, rank, and byte offsets into the
/// source document.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSlice {
    /// Heading text with markup stripped
    pub title: String,

    /// Heading rank; 1 is the highest, talk-page sections are usually 2
    pub rank: u8,

    /// Byte offset of the heading start
    pub start: usize,

    /// Byte offset one past the section end
    pub end: usize,
}

impl SectionSlice {
    /// Borrow the section span out of the document it was located in.
    pub fn slice<'a>(&self, document: &'a str) -> &'a str {
        &document[self.start..self.end]
    }
}

struct Heading {
    start: usize,
    rank: u8,
    title: String,
    matches_anchor: bool,
}

/// Locate a section in rendered HTML by heading id.
///
/// A heading matches when its own `id` equals the anchor or when a
/// `mw-headline` span inside it carries that id.
pub fn locate_in_html(html: &str, anchor: &str) -> Option<SectionSlice> {
    let headings: Vec<Heading> = HTML_HEADING
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let rank: u8 = caps.get(1)?.as_str().parse().ok()?;
            let attrs = caps.get(2)?.as_str();
            let inner = caps.get(3)?.as_str();

            let own_id = ATTR_ID
                .captures(attrs)
                .map(|id| id[1].to_string());
            let headline_id = HEADLINE_SPAN
                .find(inner)
                .and_then(|span| ATTR_ID.captures(span.as_str()))
                .map(|id| id[1].to_string());

            let matches_anchor = own_id.as_deref() == Some(anchor)
                || headline_id.as_deref() == Some(anchor);

            Some(Heading {
                start: whole.start(),
                rank,
                title: HTML_TAG.replace_all(inner, "").trim().to_string(),
                matches_anchor,
            })
        })
        .collect();

    bound_section(&headings, html.len())
}

/// Locate a section in raw wikitext by heading title or anchor.
///
/// The target matches a heading whose title, after underscore/space
/// normalization, equals the target. Rank is the number of `=` markers.
pub fn locate_in_wikitext(wikitext: &str, target: &str) -> Option<SectionSlice> {
    let wanted = normalize(target);
    let headings: Vec<Heading> = WIKITEXT_HEADING
        .captures_iter(wikitext)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let rank = caps.get(1)?.as_str().len() as u8;
            let title = caps.get(2)?.as_str().trim().to_string();
            let matches_anchor = normalize(&title) == wanted;
            Some(Heading {
                start: whole.start(),
                rank,
                title,
                matches_anchor,
            })
        })
        .collect();

    bound_section(&headings, wikitext.len())
}

/// Slice from the matched heading to the next heading of equal or higher
/// rank, or to the end of the document.
fn bound_section(headings: &[Heading], document_len: usize) -> Option<SectionSlice> {
    let index = headings.iter().position(|h| h.matches_anchor)?;
    let target = &headings[index];

    let end = headings[index + 1..]
        .iter()
        .find(|h| h.rank <= target.rank)
        .map(|h| h.start)
        .unwrap_or(document_len);

    Some(SectionSlice {
        title: target.title.clone(),
        rank: target.rank,
        start: target.start,
        end,
    })
}

fn normalize(text: &str) -> String {
    text.replace('_', " ").trim().to_string()
}
