use std::time::Duration;

use thiserror::Error;

use crate::scrape::Stage;

/// Errors produced while driving the browser or building a menu
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The browser process could not be started or its first tab could not be opened
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// The page did not load or its anchor element never appeared
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// No visible element matched the requested value for a selection stage
    #[error(
        "Could not select {stage} '{value}' (tried: {}; available: {})",
        join_or_none(.tried),
        join_or_none(.available)
    )]
    SelectionFailed {
        stage: Stage,
        value: String,
        tried: Vec<String>,
        available: Vec<String>,
    },

    /// Page text was unavailable or held no menu section
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// A bounded wait ran out
    #[error("Timed out after {timeout:?} waiting for {what}")]
    Timeout { what: String, timeout: Duration },

    /// A previously found element could not be acted on
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A script evaluated in the page failed or returned something unexpected
    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() { "none found".to_string() } else { values.join(", ") }
}

impl ScrapeError {
    /// True for errors that came out of a bounded wait
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
