//! Unified error handling for botcmd.
//!
//! Registry and setup errors are raised while building the command tree at
//! startup.
//! Dispatch errors are raised per message and are rendered back to the user.

use crate::commands::GroupId;
use botcmd_syntax::{ErrorKind, SyntaxError};
use thiserror::Error;

// ============================================================================
// Registry Errors (tree construction)
// ============================================================================

/// Errors that can occur while mutating the command tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown group handle {0:?}")]
    UnknownGroup(GroupId),

    /// Attaching would make a group its own descendant.
    #[error("group `{child}` cannot be attached under `{parent}`: it would become its own descendant")]
    Cycle { parent: String, child: String },

    #[error("group `{0}` already has a parent")]
    AlreadyAttached(String),
}

impl RegistryError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownGroup(_) => "unknown_group",
            Self::Cycle { .. } => "cycle",
            Self::AlreadyAttached(_) => "already_attached",
        }
    }
}

/// Errors that can occur while building the command set at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("command `{command}` has an invalid grammar: {source}")]
    Syntax {
        command: String,
        #[source]
        source: SyntaxError,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

// ============================================================================
// Dispatch Errors (message handling)
// ============================================================================

/// Errors that can occur while turning a message into an invocation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// The message held the prefix and nothing else.
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    NotFound(String),

    /// The command matched but its arguments did not.
    #[error("{command}: {source}")]
    Syntax {
        command: String,
        usage: String,
        #[source]
        source: SyntaxError,
    },
}

impl DispatchError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::NotFound(_) => "not_found",
            Self::Syntax { source, .. } => source.error_code(),
        }
    }

    /// Text to show the user who sent the message.
    ///
    /// Returns `None` for failures the user cannot fix (a command whose
    /// signature does not compile).
    pub fn usage_hint(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::NotFound(name) => Some(format!("Unknown command: {name}")),
            Self::Syntax { source, .. } if source.kind() == ErrorKind::Internal => None,
            Self::Syntax {
                command,
                usage,
                source,
            } => Some(format!("{source}. Usage: {command} {usage}").trim_end().to_owned()),
        }
    }
}
