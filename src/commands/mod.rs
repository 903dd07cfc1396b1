//! Command tree and dispatch.
//!
//! This module contains the registry side of the bot:
//! - [`tree`]: arena of command groups, alias maps and lookups
//! - [`spec`]: value-level builder for a group subtree
//! - [`snapshot`]: serializable read-only projection of the tree
//! - [`dispatch`]: message → command → typed arguments
//!
//! ## Command Traits
//!
//! - [`Command`]: what the tree needs to know about a command (name, aliases)
//! - [`TypedCommand`]: a command that also owns its argument grammar

pub mod def;
pub mod dispatch;
pub mod snapshot;
pub mod spec;
pub mod tree;

pub use def::CommandDef;
pub use dispatch::{Dispatcher, Invocation};
pub use snapshot::{CommandSummary, TreeProjection};
pub use spec::{with_group, Entry, GroupSpec};
pub use tree::{CommandTree, GroupId, Resolution};

use botcmd_syntax::SyntaxParser;

/// A command as seen by the tree.
///
/// The tree only reads the canonical name and the aliases; everything
/// else about a command belongs to the caller.
pub trait Command {
    /// Canonical name (e.g., "ban").
    fn name(&self) -> &str;

    /// Alternate names (e.g., "b").
    fn aliases(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// A command with a typed argument grammar.
pub trait TypedCommand: Command {
    fn syntax(&self) -> &SyntaxParser;
}
