/*!
 * Tests for report shaping over real pipeline output
 */

use talkref::analysis::report::{build_report, render_text};
use talkref::analysis::{ReferenceExtractor, SourceDocument};
use talkref::knowledge::KnowledgeBase;

use crate::common::TALK_PAGE_WIKITEXT;

fn analyzed() -> talkref::analysis::AnalysisResult {
    let extractor = ReferenceExtractor::new(KnowledgeBase::builtin());
    extractor.analyze(
        &SourceDocument::from_wikitext(TALK_PAGE_WIKITEXT),
        Some("Requested_move"),
    )
}

#[test]
fn test_buildReport_pipelineOutput_shouldCarryLabelsAndUrls() {
    let report = build_report(&analyzed(), 2);

    assert_eq!(report.section_title.as_deref(), Some("Requested move"));

    let npov = report
        .policies
        .iter()
        .find(|s| s.name == "Neutral point of view")
        .expect("NPOV mention missing from report");
    assert_eq!(npov.label, "WP:NPOV");
    assert_eq!(
        npov.url,
        "https://en.wikipedia.org/wiki/Wikipedia:Neutral_point_of_view"
    );
    assert!(npov.mention_count >= 2);
    assert!(!npov.snippets.is_empty());
}

#[test]
fn test_buildReport_snippetBound_shouldLimitAndCountOverflow() {
    let report = build_report(&analyzed(), 1);

    for summary in report
        .policies
        .iter()
        .chain(report.guidelines.iter())
        .chain(report.essays.iter())
    {
        assert!(summary.snippets.len() <= 1);
        assert_eq!(
            summary.more,
            summary.mention_count.saturating_sub(1)
        );
    }
}

#[test]
fn test_renderText_pipelineOutput_shouldListEveryCategory() {
    let text = render_text(&build_report(&analyzed(), 2));

    assert!(text.contains("== Policies =="));
    assert!(text.contains("== Guidelines =="));
    assert!(text.contains("== Essays =="));
    assert!(text.contains("WP:NPOV (Neutral point of view)"));
    assert!(text.contains("WP:RS (Reliable sources)"));
}

#[test]
fn test_renderText_emptyResult_shouldPrintNothingFoundMessages() {
    let extractor = ReferenceExtractor::new(KnowledgeBase::builtin());
    let result = extractor.analyze(
        &SourceDocument::from_wikitext("Nothing relevant is discussed here at all."),
        None,
    );
    let text = render_text(&build_report(&result, 2));

    assert!(text.contains("No policies explicitly mentioned in this discussion."));
    assert!(text.contains("No guidelines explicitly mentioned in this discussion."));
    assert!(text.contains("No essays explicitly mentioned in this discussion."));
}
