//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("dispatch.prefix must not be empty")]
    EmptyPrefix,
    #[error("dispatch.prefix must not contain whitespace, got '{0}'")]
    PrefixWhitespace(String),
    #[error("syntax.string_min_length ({min}) exceeds syntax.string_max_length ({max})")]
    StringBounds { min: usize, max: usize },
    #[error("log.filter is not a valid filter directive: {0}")]
    InvalidLogFilter(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let prefix = &config.dispatch.prefix;
    if prefix.is_empty() {
        errors.push(ValidationError::EmptyPrefix);
    } else if prefix.chars().any(char::is_whitespace) {
        errors.push(ValidationError::PrefixWhitespace(prefix.clone()));
    }

    let syntax = &config.syntax;
    if syntax.string_min_length > syntax.string_max_length {
        errors.push(ValidationError::StringBounds {
            min: syntax.string_min_length,
            max: syntax.string_max_length,
        });
    }

    if EnvFilter::try_new(&config.log.filter).is_err() {
        errors.push(ValidationError::InvalidLogFilter(config.log.filter.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
