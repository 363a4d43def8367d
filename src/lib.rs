//! Quotes-Harvest: a polite quotes listing scraper
//!
//! This crate follows the "next page" chain of a quotes listing site, extracts
//! quote records, deduplicates them, and writes a CSV file plus an optional
//! spreadsheet report with per-author and per-tag counts.

pub mod aggregate;
pub mod config;
pub mod crawler;
pub mod output;
pub mod pipeline;
pub mod quote;

use thiserror::Error;

/// Main error type for Quotes-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid selector: {0}")]
    Selector(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Quotes-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use aggregate::{author_counts, tag_counts, CountRow};
pub use config::Config;
pub use crawler::{Paginator, ScrapeOutcome, StopReason};
pub use quote::{dedupe, QuoteRecord};
