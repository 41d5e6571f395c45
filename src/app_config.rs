use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::analysis::ContextDepth;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Wiki API settings
    #[serde(default)]
    pub wiki: WikiConfig,

    /// Analysis pipeline settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Generative-model analysis settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Wiki API client configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WikiConfig {
    /// MediaWiki API endpoint
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
}

/// Analysis pipeline configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Context window depth around each mention
    #[serde(default)]
    pub context_depth: ContextDepth,

    /// Context snippets shown per mention before the overflow indicator
    #[serde(default = "default_max_snippets")]
    pub max_snippets: usize,
}

/// Generative-model analysis configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    /// Whether the model analysis path runs at all
    #[serde(default)]
    pub enabled: bool,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Service URL; empty means the public API
    #[serde(default)]
    pub endpoint: String,

    /// Temperature for generation
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate per category
    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: u32,

    /// Maximum discussion chars forwarded to the model
    #[serde(default = "default_llm_max_chars")]
    pub max_chars: usize,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_api_endpoint() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_user_agent() -> String {
    "talkref/1.0 (Wikipedia talk page reference analyzer)".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_max_snippets() -> usize {
    2
}

fn default_llm_model() -> String {
    "gpt-4".to_string()
}

fn default_llm_temperature() -> f32 {
    0.3
}

fn default_llm_max_tokens() -> u32 {
    1500
}

fn default_llm_max_chars() -> usize {
    10000
}

fn default_llm_timeout_secs() -> u64 {
    120
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_endpoint: default_api_endpoint(),
            user_agent: default_user_agent(),
            timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            context_depth: ContextDepth::default(),
            max_snippets: default_max_snippets(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: default_llm_model(),
            api_key: String::new(),
            endpoint: String::new(),
            temperature: default_llm_temperature(),
            max_tokens: default_llm_max_tokens(),
            max_chars: default_llm_max_chars(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wiki: WikiConfig::default(),
            analysis: AnalysisConfig::default(),
            llm: LlmConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write this configuration to a JSON file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, content)
            .context(format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.wiki.api_endpoint.is_empty() {
            return Err(anyhow!("Wiki API endpoint cannot be empty"));
        }
        if !self.wiki.api_endpoint.starts_with("http://")
            && !self.wiki.api_endpoint.starts_with("https://")
        {
            return Err(anyhow!(
                "Wiki API endpoint must be an http(s) URL: {}",
                self.wiki.api_endpoint
            ));
        }
        if self.wiki.timeout_secs == 0 {
            return Err(anyhow!("Wiki request timeout must be greater than zero"));
        }
        if self.analysis.max_snippets == 0 {
            return Err(anyhow!("At least one context snippet must be shown"));
        }
        if self.llm.enabled && self.llm.api_key.is_empty() {
            return Err(anyhow!(
                "Model analysis is enabled but no API key is configured"
            ));
        }
        if self.llm.enabled && self.llm.model.is_empty() {
            return Err(anyhow!("Model analysis is enabled but no model is configured"));
        }
        Ok(())
    }
}
