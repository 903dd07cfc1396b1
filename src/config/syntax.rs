//! Argument type configuration.

use super::defaults::{default_string_max_length, default_string_min_length};
use botcmd_syntax::{StringOptions, TypeOptions};
use serde::Deserialize;

/// Options applied to every `string` argument.
#[derive(Debug, Clone, Deserialize)]
pub struct SyntaxConfig {
    /// Minimum string length in characters (default: 0).
    #[serde(default = "default_string_min_length")]
    pub string_min_length: usize,
    /// Maximum string length in characters (default: 2000).
    #[serde(default = "default_string_max_length")]
    pub string_max_length: usize,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            string_min_length: default_string_min_length(),
            string_max_length: default_string_max_length(),
        }
    }
}

impl SyntaxConfig {
    /// Options to compile command grammars with.
    pub fn type_options(&self) -> TypeOptions {
        TypeOptions {
            string: StringOptions {
                min_length: self.string_min_length,
                max_length: self.string_max_length,
            },
        }
    }
}
