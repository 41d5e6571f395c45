/*!
 * End-to-end tests for the analysis pipeline over fixture documents
 */

use talkref::analysis::{ContextDepth, ReferenceExtractor, SourceDocument};
use talkref::analysis::llm::LlmAnalyst;
use talkref::knowledge::{Category, KnowledgeBase};
use talkref::providers::mock::MockProvider;

use crate::common::{SECTION_HTML, TALK_PAGE_WIKITEXT};

fn extractor() -> ReferenceExtractor<'static> {
    ReferenceExtractor::new(KnowledgeBase::builtin())
}

#[test]
fn test_analysis_shortcutPair_shouldCategorizeBothShortcuts() {
    let doc = SourceDocument::from_wikitext(
        "Please review this per WP:NPOV and also check WP:RS before reverting.",
    );
    let result = extractor().analyze(&doc, None);

    assert_eq!(result.policies.len(), 1);
    assert_eq!(result.policies[0].name, "Neutral point of view");
    assert_eq!(result.policies[0].shortcut.as_deref(), Some("WP:NPOV"));

    assert_eq!(result.guidelines.len(), 1);
    assert_eq!(result.guidelines[0].name, "Reliable sources");
    assert_eq!(result.guidelines[0].shortcut.as_deref(), Some("WP:RS"));

    assert!(result.essays.is_empty());
}

#[test]
fn test_analysis_shortcutAndFullName_shouldAggregateIntoOneMention() {
    let doc = SourceDocument::from_wikitext(TALK_PAGE_WIKITEXT);
    let result = extractor().analyze(&doc, Some("Requested_move"));

    let npov: Vec<_> = result
        .policies
        .iter()
        .filter(|m| m.name == "Neutral point of view")
        .collect();
    assert_eq!(npov.len(), 1, "exactly one Mention per canonical name");
    assert_eq!(npov[0].contexts.len(), 2, "shortcut and full-name contexts");
}

#[test]
fn test_analysis_sectionScoping_shouldExcludeOtherSections() {
    let doc = SourceDocument::from_wikitext(TALK_PAGE_WIKITEXT);
    let result = extractor().analyze(&doc, Some("Requested_move"));

    let names: Vec<&str> = result.policies.iter().map(|m| m.name.as_str()).collect();
    assert!(names.contains(&"Neutral point of view"));
    // WP:CIVIL only appears in the "Infobox image" section
    assert!(!names.contains(&"Civility"));
}

#[test]
fn test_analysis_essayParaphrase_shouldBeDetectedLoosely() {
    let doc = SourceDocument::from_wikitext(TALK_PAGE_WIKITEXT);
    let result = extractor().analyze(&doc, Some("Requested_move"));

    assert_eq!(result.essays.len(), 1);
    assert_eq!(
        result.essays[0].name,
        "Always keep context in mind when arguing claims"
    );
}

#[test]
fn test_analysis_missingAnchor_shouldFallBackToWholePage() {
    let doc = SourceDocument::from_wikitext(TALK_PAGE_WIKITEXT);
    let result = extractor().analyze(&doc, Some("Nonexistent_section"));

    let names: Vec<&str> = result.policies.iter().map(|m| m.name.as_str()).collect();
    assert!(names.contains(&"Civility"), "whole-page fallback sees every section");
}

#[test]
fn test_analysis_isIdempotent() {
    let doc = SourceDocument::from_wikitext(TALK_PAGE_WIKITEXT);

    let first = extractor().analyze(&doc, Some("Requested_move"));
    let second = extractor().analyze(&doc, Some("Requested_move"));

    let names = |r: &talkref::analysis::AnalysisResult| -> Vec<(Category, String)> {
        r.all_mentions()
            .map(|m| (m.category, m.name.clone()))
            .collect()
    };
    assert_eq!(names(&first), names(&second));
}

#[test]
fn test_analysis_emptyInput_shouldYieldEmptyCategories() {
    let result = extractor().analyze(&SourceDocument::from_wikitext(""), None);

    assert!(result.policies.is_empty());
    assert!(result.guidelines.is_empty());
    assert!(result.essays.is_empty());
}

#[test]
fn test_analysis_htmlDocument_shouldHarvestLinksAndAnnotate() {
    let result = extractor().analyze(&SourceDocument::from_html(SECTION_HTML), None);

    let names: Vec<&str> = result.policies.iter().map(|m| m.name.as_str()).collect();
    assert!(names.contains(&"Neutral point of view"));

    let guideline_names: Vec<&str> =
        result.guidelines.iter().map(|m| m.name.as_str()).collect();
    assert!(guideline_names.contains(&"Reliable sources"));

    // The displayed markup gains scroll targets for shortcut mentions
    assert!(result.section_html.contains("class=\"ref-mention\""));
}

#[test]
fn test_analysis_largeDepth_shouldWidenContexts() {
    let doc = SourceDocument::from_wikitext(
        "One filler sentence. Two filler sentence. WP:VANDAL strikes again. \
         Four filler sentence. Five filler sentence.",
    );
    let kb = KnowledgeBase::builtin();

    let minimal = ReferenceExtractor::with_depth(kb, ContextDepth::Minimal).analyze(&doc, None);
    let large = ReferenceExtractor::with_depth(kb, ContextDepth::Large).analyze(&doc, None);

    let minimal_ctx = &minimal.policies[0].contexts[0].raw;
    let large_ctx = &large.policies[0].contexts[0].raw;

    assert!(minimal_ctx.len() < large_ctx.len());
    assert!(large_ctx.contains("One filler sentence"));
    assert!(large_ctx.contains("Five filler sentence."));
}

#[tokio::test]
async fn test_modelAnalysis_mockProvider_shouldAnswerPerCategory() {
    let analyst = LlmAnalyst::with_mock(MockProvider::working(), 2000);

    let doc = SourceDocument::from_wikitext(TALK_PAGE_WIKITEXT);
    let result = extractor().analyze(&doc, Some("Requested_move"));
    let analyses = analyst.analyze_discussion(&result.section_text).await;

    assert!(analyses.policies.contains("ANALYSIS"));
    assert!(analyses.guidelines.contains("ANALYSIS"));
    assert!(analyses.essays.contains("ANALYSIS"));
}
