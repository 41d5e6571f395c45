/*!
 * Common test utilities and fixtures shared across the test suite.
 */

/// A small talk page with three sections, exercising shortcuts, full
/// names, wiki links, and an essay paraphrase.
pub const TALK_PAGE_WIKITEXT: &str = "\
Banner templates live above the first heading.

== Requested move ==
The proposed title fails [[WP:NPOV]] in my view. The neutral point of view policy is not negotiable.
Also see WP:RS for what counts as sourcing. Dr. Smith disagrees with the premise entirely.

=== Survey ===
Support per nom. You should always keep context in mind when weighing these arguments.

== Infobox image ==
The current image violates WP:CIVIL somehow, or so it was claimed.
";

/// Rendered-HTML counterpart of a single discussion section.
pub const SECTION_HTML: &str = concat!(
    "<div class=\"mw-parser-output\">",
    "<h2><span class=\"mw-headline\" id=\"Requested_move\">Requested move</span></h2>",
    "<p>The proposed title fails <a href=\"/wiki/Wikipedia:Neutral_point_of_view\">WP:NPOV</a> in my view. ",
    "The neutral point of view policy is not negotiable.</p>",
    "<p>Also see WP:RS for what counts as sourcing.</p>",
    "</div>"
);
