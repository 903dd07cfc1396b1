//! botcmd - hierarchical chat-bot command framework.
//!
//! Commands are registered into a tree of named groups. Incoming text is
//! resolved through that tree (group names and aliases first, then the
//! command), and the remaining tokens are parsed by the command's typed
//! grammar from [`botcmd_syntax`].
//!
//! ```
//! use botcmd::commands::{CommandDef, CommandTree, Dispatcher, GroupSpec};
//!
//! let tree = CommandTree::from_spec(
//!     GroupSpec::new("root").group(
//!         GroupSpec::new("moderation")
//!             .alias("mod")
//!             .command(CommandDef::new("ban", "target:member reason:string?...").unwrap()),
//!     ),
//! )
//! .unwrap();
//! let dispatcher = Dispatcher::new(tree, "!");
//!
//! let invocation = dispatcher.dispatch(&(), &(), "!mod ban <@42> spam").unwrap().unwrap();
//! assert_eq!(invocation.depth, 2);
//! assert_eq!(invocation.arguments.str(1), Some("spam"));
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod telemetry;

pub use botcmd_syntax as syntax;
