/*!
 * Application controller wiring fetch, analysis, and output together.
 *
 * One invocation handles one discussion URL end-to-end: parse the URL,
 * fetch the page, slice out the target section, render it for display,
 * run the reference extraction pipeline, and shape the result for the
 * terminal or as JSON. Only a failed fetch is a user-visible error;
 * everything downstream degrades to a fallback.
 */

use anyhow::{Context, Result};
use log::{info, warn};

use crate::analysis::{LlmAnalyst, ReferenceExtractor, SourceDocument, report};
use crate::app_config::Config;
use crate::fetcher::{WikiClient, parse_talk_url};
use crate::knowledge::KnowledgeBase;

/// Main application controller for discussion analysis
pub struct Controller {
    config: Config,
    client: WikiClient,
    analyst: Option<LlmAnalyst>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let client = WikiClient::from_config(&config.wiki);
        let analyst = config
            .llm
            .enabled
            .then(|| LlmAnalyst::from_config(&config.llm));

        Ok(Self {
            config,
            client,
            analyst,
        })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        self.config.validate().is_ok()
    }

    /// Analyze one discussion URL and return the rendered output.
    pub async fn run(&self, url: &str, json_output: bool) -> Result<String> {
        let page_ref = parse_talk_url(url)?;
        info!("Starting analysis for: {}", url);

        let page = self
            .client
            .fetch_page(&page_ref)
            .await
            .context("Failed to fetch the discussion page")?;

        let extractor = ReferenceExtractor::with_depth(
            KnowledgeBase::builtin(),
            self.config.analysis.context_depth,
        );

        // Anchors encode headings with underscores; the API metadata maps
        // them back to the exact heading line when it knows the section.
        let target = page.anchor.as_deref().map(|anchor| {
            page.heading_for_anchor(anchor)
                .map(str::to_string)
                .unwrap_or_else(|| anchor.to_string())
        });

        let full = SourceDocument::from_wikitext(page.wikitext.clone());
        let view = extractor.locate_section(&full, target.as_deref());
        let section_wikitext = view
            .wikitext
            .clone()
            .unwrap_or_else(|| page.wikitext.clone());

        let html = match self.client.render_html(&section_wikitext, &page.title).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Could not render section HTML, using raw wikitext: {}", e);
                format!("<pre>{}</pre>", escape_html(&section_wikitext))
            }
        };

        let doc = SourceDocument {
            wikitext: Some(section_wikitext),
            html: Some(html),
        };
        let mut result = extractor.analyze(&doc, None);
        if result.section_title.is_none() {
            result.section_title = view.title;
        }

        info!(
            "Found {} policies, {} guidelines, {} essays",
            result.policies.len(),
            result.guidelines.len(),
            result.essays.len()
        );

        let report = report::build_report(&result, self.config.analysis.max_snippets);

        let model_analyses = match &self.analyst {
            Some(analyst) => Some(analyst.analyze_discussion(&result.section_text).await),
            None => None,
        };

        if json_output {
            let output = match &model_analyses {
                Some(analyses) => serde_json::to_string_pretty(&serde_json::json!({
                    "report": report,
                    "model_analysis": {
                        "policies": analyses.policies,
                        "guidelines": analyses.guidelines,
                        "essays": analyses.essays,
                    },
                })),
                None => serde_json::to_string_pretty(&report),
            };
            return output.context("Failed to serialize report to JSON");
        }

        let mut output = report::render_text(&report);
        if let Some(analyses) = &model_analyses {
            output.push_str("\n\n== Model analysis ==\n");
            output.push_str(&format!("Policies:\n{}\n\n", analyses.policies));
            output.push_str(&format!("Guidelines:\n{}\n\n", analyses.guidelines));
            output.push_str(&format!("Essays:\n{}", analyses.essays));
        }
        Ok(output)
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_withDefaultConfig_shouldInitialize() {
        let controller = Controller::new_for_test().unwrap();
        assert!(controller.is_initialized());
    }

    #[test]
    fn test_controller_withLlmEnabledButNoKey_shouldReportUninitialized() {
        let mut config = Config::default();
        config.llm.enabled = true;

        let controller = Controller::with_config(config).unwrap();
        assert!(!controller.is_initialized());
    }

    #[test]
    fn test_escapeHtml_shouldEscapeMarkupCharacters() {
        assert_eq!(
            escape_html("a < b && c > d"),
            "a &lt; b &amp;&amp; c &gt; d"
        );
    }
}
