/*!
 * Discussion analysis pipeline.
 *
 * This module contains the core functionality for extracting policy,
 * guideline, and essay references from a talk-page discussion. It is
 * split into several submodules:
 *
 * - `segmenter`: sentence segmentation with abbreviation protection
 * - `matcher`: term detection against the knowledge base
 * - `context`: context windows and highlighting around mentions
 * - `section`: section location in HTML and wikitext documents
 * - `extractor`: the orchestrator producing an `AnalysisResult`
 * - `report`: render handoff shapes and plain-text output
 * - `prompts`: prompt templates for the generative-model path
 * - `llm`: the optional generative-model analyst
 */

// Re-export main types for easier usage
pub use self::context::{ContextDepth, ContextSnippet};
pub use self::extractor::{AnalysisResult, Mention, ReferenceExtractor, SourceDocument};
pub use self::llm::{CategoryAnalyses, LlmAnalyst};
pub use self::matcher::TermHit;
pub use self::report::{AnalysisReport, MentionSummary};
pub use self::section::SectionSlice;

// Submodules
pub mod context;
pub mod extractor;
pub mod llm;
pub mod matcher;
pub mod prompts;
pub mod report;
pub mod section;
pub mod segmenter;
