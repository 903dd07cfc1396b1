//! Message dispatch configuration.

use super::defaults::default_prefix;
use serde::Deserialize;

/// How chat text is recognized as a command.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Text a message must start with to be treated as a command (default: "!").
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}
