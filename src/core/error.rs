//! Custom error types for Cartwright
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Cartwright operations
#[derive(Error, Debug)]
pub enum CartwrightError {
    /// Required configuration fields absent from the environment
    #[error("Missing required environment variables: {0:?}")]
    MissingConfig(Vec<String>),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Browser session errors (launch, navigation, element interaction)
    #[error("Browser error: {0}")]
    Browser(String),

    /// Errors from the WebDriver client
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    /// A required element never appeared or never became clickable
    #[error("Element not found within timeout: {0}")]
    ElementTimeout(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for Cartwright operations
pub type Result<T> = std::result::Result<T, CartwrightError>;

impl CartwrightError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a browser error
    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    /// Create an element timeout error naming the locator that failed
    pub fn timeout(locator: impl Into<String>) -> Self {
        Self::ElementTimeout(locator.into())
    }
}
