/*!
 * Error types for the talkref application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when fetching a page from the wiki API
#[derive(Error, Debug)]
pub enum FetchError {
    /// The input URL could not be parsed into a page reference
    #[error("Invalid wiki URL: {0}")]
    InvalidUrl(String),

    /// Error when making the API request fails (network, timeout)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API responded with a non-success HTTP status
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The API returned a structured error payload
    #[error("Wiki API error: {code} - {info}")]
    WikiError {
        /// Machine-readable error code
        code: String,
        /// Human-readable error description
        info: String,
    },

    /// The API response was missing the expected content
    #[error("Missing content in API response: {0}")]
    MissingContent(String),
}

/// Errors that can occur when working with generative-model provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error fetching the source page
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error from a generative-model provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error in the application configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
