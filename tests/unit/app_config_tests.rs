/*!
 * Tests for application configuration functionality
 */

use talkref::analysis::ContextDepth;
use talkref::app_config::{Config, LogLevel};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.wiki.api_endpoint, "https://en.wikipedia.org/w/api.php");
    assert_eq!(config.wiki.timeout_secs, 10);
    assert!(config.wiki.user_agent.starts_with("talkref/"));

    assert_eq!(config.analysis.context_depth, ContextDepth::Medium);
    assert_eq!(config.analysis.max_snippets, 2);

    assert!(!config.llm.enabled);
    assert_eq!(config.llm.model, "gpt-4");
    assert_eq!(config.llm.max_chars, 10000);
    assert_eq!(config.llm.timeout_secs, 120);

    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    // Start with a valid config
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Empty API endpoint
    config.wiki.api_endpoint = String::new();
    assert!(config.validate().is_err());
    config.wiki.api_endpoint = "https://en.wikipedia.org/w/api.php".to_string();

    // Non-http endpoint
    config.wiki.api_endpoint = "ftp://example.org/api".to_string();
    assert!(config.validate().is_err());
    config.wiki.api_endpoint = "https://en.wikipedia.org/w/api.php".to_string();

    // Zero timeout
    config.wiki.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.wiki.timeout_secs = 10;

    // Zero snippets
    config.analysis.max_snippets = 0;
    assert!(config.validate().is_err());
    config.analysis.max_snippets = 2;

    // Model path enabled without an API key
    config.llm.enabled = true;
    assert!(config.validate().is_err());

    config.llm.api_key = "sk-1234567890".to_string();
    assert!(config.validate().is_ok());

    // Enabled with a key but no model
    config.llm.model = String::new();
    assert!(config.validate().is_err());
}

/// Test round-tripping a configuration through a file
#[test]
fn test_config_fileRoundTrip_shouldPreserveValues() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.analysis.context_depth = ContextDepth::Large;
    config.log_level = LogLevel::Debug;
    config.write_to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.analysis.context_depth, ContextDepth::Large);
    assert_eq!(loaded.log_level, LogLevel::Debug);
    assert_eq!(loaded.wiki.api_endpoint, config.wiki.api_endpoint);
}

/// Test that partial config files pick up field defaults
#[test]
fn test_config_partialJson_shouldFillDefaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, r#"{"log_level": "warn"}"#).unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.wiki.timeout_secs, 10);
    assert_eq!(config.analysis.context_depth, ContextDepth::Medium);
}

/// Test loading a missing file
#[test]
fn test_config_missingFile_shouldError() {
    assert!(Config::from_file("/nonexistent/path/conf.json").is_err());
}
