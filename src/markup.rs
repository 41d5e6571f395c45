/*!
 * Markup stripping utilities.
 *
 * Converts raw wikitext and rendered HTML into plain text suitable for
 * sentence segmentation and term matching. The conversion aims for
 * "close enough for analysis", not rendering parity with the wiki's own
 * parser.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static TEMPLATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{[^}]+\}\}").unwrap());
static PIPED_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[([^|\]]+)\|([^\]]+)\]\]").unwrap());
static PLAIN_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());
static EXTERNAL_LINK_WITH_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[https?://[^\s\]]+\s+([^\]]+)\]").unwrap());
static EXTERNAL_LINK_BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[https?://[^\]]+\]").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"'''([^']+)'''").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"''([^']+)''").unwrap());
static HEADING_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^=+\s*(.+?)\s*=+\s*$").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static BLOCK_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?(?:p|div|li|ul|ol|dl|dd|dt|table|tr|h[1-6])\b[^>]*>|<br\s*/?>").unwrap());
static EXCESS_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Convert raw wikitext into plain text for analysis.
pub fn wikitext_to_plain(wikitext: &str) -> String {
    let text = TEMPLATE.replace_all(wikitext, "");
    let text = PIPED_LINK.replace_all(&text, "${2}");
    let text = PLAIN_LINK.replace_all(&text, "${1}");
    let text = EXTERNAL_LINK_WITH_TEXT.replace_all(&text, "${1}");
    let text = EXTERNAL_LINK_BARE.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "${1}");
    let text = ITALIC.replace_all(&text, "${1}");
    let text = HEADING_MARKERS.replace_all(&text, "${1}");
    let text = HTML_TAG.replace_all(&text, "");
    let text = EXCESS_BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Convert rendered HTML into plain text for analysis.
///
/// Block-level tags become line breaks so sentences in adjacent blocks do
/// not run together; every remaining tag is dropped and common entities
/// are decoded.
pub fn html_to_plain(html: &str) -> String {
    let text = BLOCK_TAG.replace_all(html, "\n");
    let text = HTML_TAG.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = EXCESS_BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Decode the handful of entities that actually show up in wiki output.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

static BOILERPLATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)Retrieved from.*",
        r"(?i)Categories:.*",
        r"(?i)Hidden categories:.*",
        r"(?i)This page was last edited on.*",
        r"(?i)Text is available under.*",
        r"(?i)Privacy policy.*",
        r"(?i)About Wikipedia.*",
        r"(?i)Disclaimers.*",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Strip navigation and footer boilerplate that leaks into talk-page text.
pub fn clean_discussion_text(text: &str) -> String {
    let mut cleaned = text.to_string();
    for pattern in BOILERPLATE_PATTERNS.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }
    let cleaned = EXCESS_BLANK_LINES.replace_all(&cleaned, "\n\n");
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wikitextToPlain_shouldStripLinkSyntax() {
        let wikitext = "See [[Wikipedia:Reliable sources|WP:RS]] and [[Verifiability]].";
        let plain = wikitext_to_plain(wikitext);
        assert_eq!(plain, "See WP:RS and Verifiability.");
    }

    #[test]
    fn test_wikitextToPlain_shouldStripTemplatesAndFormatting() {
        let wikitext = "{{ping|Alice}} This is '''important''' and ''disputed''.";
        let plain = wikitext_to_plain(wikitext);
        assert_eq!(plain, "This is important and disputed.");
    }

    #[test]
    fn test_wikitextToPlain_shouldUnwrapHeadings() {
        let wikitext = "== Requested move ==\nDiscussion body here.";
        let plain = wikitext_to_plain(wikitext);
        assert!(plain.starts_with("Requested move"));
        assert!(plain.contains("Discussion body here."));
    }

    #[test]
    fn test_wikitextToPlain_shouldDropExternalLinks() {
        let wikitext = "Per [https://example.org this source] and [https://example.org/raw].";
        let plain = wikitext_to_plain(wikitext);
        assert_eq!(plain, "Per this source and .");
    }

    #[test]
    fn test_htmlToPlain_shouldSeparateBlocks() {
        let html = "<p>First paragraph.</p><p>Second one.</p>";
        let plain = html_to_plain(html);
        assert!(plain.contains("First paragraph."));
        assert!(plain.contains("Second one."));
        assert!(!plain.contains("First paragraph.Second"));
    }

    #[test]
    fn test_htmlToPlain_shouldDecodeEntities() {
        let html = "<p>Sources &amp; citations are &quot;required&quot;.</p>";
        let plain = html_to_plain(html);
        assert_eq!(plain, "Sources & citations are \"required\".");
    }

    #[test]
    fn test_cleanDiscussionText_shouldRemoveFooterBoilerplate() {
        let text = "Real discussion content.\nRetrieved from https://en.wikipedia.org/w/index.php\nMore content.";
        let cleaned = clean_discussion_text(text);
        assert!(cleaned.contains("Real discussion content."));
        assert!(cleaned.contains("More content."));
        assert!(!cleaned.contains("Retrieved from"));
    }
}
