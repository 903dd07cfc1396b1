//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use botcmd_syntax::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};

// =============================================================================
// Dispatch Defaults
// =============================================================================

pub fn default_prefix() -> String {
    "!".to_string()
}

// =============================================================================
// Syntax Defaults
// =============================================================================

pub fn default_string_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

pub fn default_string_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

// =============================================================================
// Log Defaults
// =============================================================================

pub fn default_log_filter() -> String {
    "info".to_string()
}
