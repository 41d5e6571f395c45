/*!
 * Generative-model analysis path.
 *
 * An optional, non-deterministic second opinion: the section text is
 * truncated and sent to a chat model once per category, and the model's
 * free-text answer is returned as-is. The client is constructed
 * explicitly and injected; a failure in one category degrades to an
 * error string for that category only and never aborts the
 * deterministic pipeline.
 */

use log::{error, info};

use super::prompts;
use crate::app_config::LlmConfig;
use crate::errors::ProviderError;
use crate::knowledge::Category;
use crate::providers::Provider;
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::openai::{OpenAI, OpenAIRequest};

/// Free-text model answers, one per category.
#[derive(Debug, Clone)]
pub struct CategoryAnalyses {
    pub policies: String,
    pub guidelines: String,
    pub essays: String,
}

#[derive(Debug)]
enum AnalystClient {
    OpenAI(OpenAI),
    Mock(MockProvider),
}

/// Injected generative-model analyst.
#[derive(Debug)]
pub struct LlmAnalyst {
    client: AnalystClient,
    model: String,
    temperature: f32,
    max_tokens: u32,
    max_chars: usize,
}

impl LlmAnalyst {
    /// Build an analyst over the OpenAI API from configuration.
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            client: AnalystClient::OpenAI(OpenAI::new(
                &config.api_key,
                &config.endpoint,
                config.timeout_secs,
            )),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_chars: config.max_chars,
        }
    }

    /// Build an analyst over a mock provider (tests).
    pub fn with_mock(provider: MockProvider, max_chars: usize) -> Self {
        Self {
            client: AnalystClient::Mock(provider),
            model: String::new(),
            temperature: 0.0,
            max_tokens: 0,
            max_chars,
        }
    }

    /// Ask the model about all three categories.
    pub async fn analyze_discussion(&self, text: &str) -> CategoryAnalyses {
        info!(
            "Requesting model analysis over {} chars of discussion text",
            text.len()
        );
        CategoryAnalyses {
            policies: self.category_answer(Category::Policy, text).await,
            guidelines: self.category_answer(Category::Guideline, text).await,
            essays: self.category_answer(Category::Essay, text).await,
        }
    }

    async fn category_answer(&self, category: Category, text: &str) -> String {
        let prompt = prompts::analysis_prompt(category, text, self.max_chars);
        match self.complete_prompt(prompt).await {
            Ok(answer) => answer.trim().to_string(),
            Err(e) => {
                error!("Model analysis failed for {}: {}", category.plural(), e);
                format!("Error: {}", e)
            }
        }
    }

    async fn complete_prompt(&self, prompt: String) -> Result<String, ProviderError> {
        match &self.client {
            AnalystClient::OpenAI(client) => {
                let request = OpenAIRequest::new(&self.model)
                    .add_message("system", prompts::SYSTEM_PROMPT)
                    .add_message("user", prompt)
                    .temperature(self.temperature)
                    .max_tokens(self.max_tokens);
                let response = client.complete(request).await?;
                Ok(OpenAI::extract_text(&response))
            }
            AnalystClient::Mock(provider) => {
                let response = provider.complete(MockRequest { prompt }).await?;
                Ok(MockProvider::extract_text(&response))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_analyzeDiscussion_workingProvider_shouldAnswerAllCategories() {
        let analyst = LlmAnalyst::with_mock(MockProvider::working(), 1000);

        let analyses = analyst.analyze_discussion("Some discussion text.").await;

        assert!(analyses.policies.contains("ANALYSIS"));
        assert!(analyses.guidelines.contains("ANALYSIS"));
        assert!(analyses.essays.contains("ANALYSIS"));
    }

    #[tokio::test]
    async fn test_analyzeDiscussion_failingProvider_shouldDegradeToErrorStrings() {
        let analyst = LlmAnalyst::with_mock(MockProvider::failing(), 1000);

        let analyses = analyst.analyze_discussion("Some discussion text.").await;

        assert!(analyses.policies.starts_with("Error:"));
        assert!(analyses.guidelines.starts_with("Error:"));
        assert!(analyses.essays.starts_with("Error:"));
    }

    #[tokio::test]
    async fn test_analyzeDiscussion_intermittentProvider_shouldIsolateFailures() {
        // Fails on every second request: guidelines errors, the others succeed
        let analyst = LlmAnalyst::with_mock(MockProvider::intermittent(2), 1000);

        let analyses = analyst.analyze_discussion("Some discussion text.").await;

        assert!(analyses.policies.contains("ANALYSIS"));
        assert!(analyses.guidelines.starts_with("Error:"));
        assert!(analyses.essays.contains("ANALYSIS"));
    }
}
