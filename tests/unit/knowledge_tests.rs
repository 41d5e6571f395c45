/*!
 * Tests for the built-in knowledge base catalog
 */

use talkref::knowledge::{Category, KnowledgeBase};

/// Test that the built-in catalog carries all three categories
#[test]
fn test_builtin_catalog_shouldPopulateAllCategories() {
    let kb = KnowledgeBase::builtin();

    assert!(!kb.entries(Category::Policy).is_empty());
    assert!(!kb.entries(Category::Guideline).is_empty());
    assert!(!kb.entries(Category::Essay).is_empty());
    assert!(kb.len() > 50);
}

/// Test the canonical entries the rest of the pipeline leans on
#[test]
fn test_builtin_coreEntries_shouldBePresent() {
    let kb = KnowledgeBase::builtin();

    assert_eq!(kb.category_of("Neutral point of view"), Some(Category::Policy));
    assert_eq!(kb.category_of("Reliable sources"), Some(Category::Guideline));
    assert_eq!(
        kb.category_of("Always keep context in mind when arguing claims"),
        Some(Category::Essay)
    );
}

/// Test that every entry derives a project-namespace URL
#[test]
fn test_builtin_entries_shouldDeriveCanonicalUrls() {
    let kb = KnowledgeBase::builtin();

    for category in Category::ALL {
        for entry in kb.entries(category) {
            assert!(
                entry.url.starts_with("https://en.wikipedia.org/wiki/Wikipedia:"),
                "bad URL for {}: {}",
                entry.name,
                entry.url
            );
            assert!(!entry.url.contains(' '), "unescaped URL for {}", entry.name);
        }
    }
}

/// Test shortcut resolution for the most common aliases
#[test]
fn test_builtin_shortcuts_shouldResolveCommonAliases() {
    let kb = KnowledgeBase::builtin();

    let (category, entry) = kb.resolve_shortcut("NPOV").unwrap();
    assert_eq!(category, Category::Policy);
    assert_eq!(entry.name, "Neutral point of view");

    let (category, entry) = kb.resolve_shortcut("RS").unwrap();
    assert_eq!(category, Category::Guideline);
    assert_eq!(entry.name, "Reliable sources");
}

/// Test that an unknown alias resolves to nothing rather than erroring
#[test]
fn test_builtin_unknownAlias_shouldReturnNone() {
    let kb = KnowledgeBase::builtin();
    assert!(kb.resolve_shortcut("DEFINITELYNOTREAL").is_none());
}
