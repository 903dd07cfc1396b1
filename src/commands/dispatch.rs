//! Message dispatch: text → command → typed arguments.
//!
//! The dispatcher strips the configured prefix, splits on whitespace,
//! resolves the leading tokens through the [`CommandTree`], and parses the
//! remaining tokens with the grammar the matched command owns.

use super::snapshot::TreeProjection;
use super::tree::{CommandTree, Resolution};
use super::TypedCommand;
use crate::config::DispatchConfig;
use crate::error::DispatchError;
use botcmd_syntax::{Arguments, SyntaxError, SyntaxParser};
use tracing::debug;

/// A fully resolved and parsed command.
#[derive(Debug)]
pub struct Invocation<'a, C> {
    pub command: &'a C,
    /// Tokens consumed by the group path and command name.
    pub depth: usize,
    pub arguments: Arguments,
}

/// Couples a command tree with a message prefix.
#[derive(Debug)]
pub struct Dispatcher<C> {
    tree: CommandTree<C>,
    prefix: String,
}

impl<C: TypedCommand> Dispatcher<C> {
    pub fn new(tree: CommandTree<C>, prefix: impl Into<String>) -> Self {
        Self {
            tree,
            prefix: prefix.into(),
        }
    }

    pub fn from_config(tree: CommandTree<C>, config: &DispatchConfig) -> Self {
        Self::new(tree, config.prefix.clone())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn tree(&self) -> &CommandTree<C> {
        &self.tree
    }

    /// Mutable access for registration; callers must not interleave this
    /// with lookups from other threads.
    pub fn tree_mut(&mut self) -> &mut CommandTree<C> {
        &mut self.tree
    }

    /// Resolve tokens from the root group.
    pub fn resolve<T: AsRef<str>>(&self, tokens: &[T]) -> Result<Resolution<'_, C>, DispatchError> {
        match tokens.first() {
            None => Err(DispatchError::Empty),
            Some(first) => self
                .tree
                .resolve(tokens)
                .ok_or_else(|| DispatchError::NotFound(first.as_ref().to_owned())),
        }
    }

    /// Parse argument tokens against a command grammar.
    pub fn parse_arguments<S: ?Sized, M: ?Sized, T: AsRef<str>>(
        &self,
        parser: &SyntaxParser,
        session: &S,
        message: &M,
        tokens: &[T],
    ) -> Result<Arguments, SyntaxError> {
        parser.parse(session, message, tokens)
    }

    /// Turn message text into an invocation.
    ///
    /// Returns `Ok(None)` when the text does not start with the prefix.
    pub fn dispatch<'a, S: ?Sized, M: ?Sized>(
        &'a self,
        session: &S,
        message: &M,
        text: &str,
    ) -> Result<Option<Invocation<'a, C>>, DispatchError> {
        let Some(body) = text.trim_start().strip_prefix(self.prefix.as_str()) else {
            return Ok(None);
        };
        let tokens: Vec<&str> = body.split_whitespace().collect();
        let resolution = self.resolve(&tokens)?;
        let command = resolution.command;
        debug!(command = %command.name(), depth = resolution.depth, "Command resolved");

        let syntax = command.syntax();
        let arguments = self
            .parse_arguments(syntax, session, message, resolution.arguments(&tokens))
            .map_err(|source| DispatchError::Syntax {
                command: tokens[..resolution.depth].join(" "),
                usage: usage_line(syntax),
                source,
            })?;

        Ok(Some(Invocation {
            command,
            depth: resolution.depth,
            arguments,
        }))
    }

    /// Read-only projection of the whole tree.
    pub fn snapshot(&self) -> TreeProjection {
        self.tree.snapshot()
    }
}

/// Usage line for a grammar: required as `<sig>`, optional as `[sig]`.
pub fn usage_line(parser: &SyntaxParser) -> String {
    parser
        .descriptors()
        .map(|d| {
            if d.optional {
                format!("[{d}]")
            } else {
                format!("<{d}>")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Command, CommandDef, GroupSpec};
    use botcmd_syntax::{EntityRef, ParseError, Value};

    fn dispatcher() -> Dispatcher<CommandDef> {
        let tree = CommandTree::from_spec(
            GroupSpec::new("root")
                .command(CommandDef::new("ping", "").unwrap())
                .command(CommandDef::new("echo", "text:string...").unwrap().alias("say"))
                .group(
                    GroupSpec::new("moderation").alias("mod").command(
                        CommandDef::new("ban", "target:member days:number? reason:string?...")
                            .unwrap()
                            .alias("b"),
                    ),
                ),
        )
        .unwrap();
        Dispatcher::new(tree, "!")
    }

    #[test]
    fn dispatch_parses_tail_after_depth() {
        let d = dispatcher();
        let inv = d
            .dispatch(&(), &(), "!mod ban <@42> 7 spamming links")
            .unwrap()
            .unwrap();
        assert_eq!(inv.command.name(), "ban");
        assert_eq!(inv.depth, 2);
        assert_eq!(inv.arguments.len(), 4);
        assert_eq!(inv.arguments[0], Value::Member(EntityRef::new("<@42>")));
        assert_eq!(inv.arguments.number(1), Some(7.0));
        assert_eq!(inv.arguments.str(3), Some("links"));
    }

    #[test]
    fn dispatch_without_prefix_is_ignored() {
        let d = dispatcher();
        assert!(d.dispatch(&(), &(), "ping").unwrap().is_none());
        assert!(d.dispatch(&(), &(), "").unwrap().is_none());
    }

    #[test]
    fn dispatch_errors() {
        let d = dispatcher();
        assert_eq!(d.dispatch(&(), &(), "!").unwrap_err(), DispatchError::Empty);
        assert_eq!(d.dispatch(&(), &(), "!   ").unwrap_err(), DispatchError::Empty);
        assert_eq!(
            d.dispatch(&(), &(), "!nope").unwrap_err(),
            DispatchError::NotFound("nope".into())
        );

        let err = d.dispatch(&(), &(), "!mod b").unwrap_err();
        match &err {
            DispatchError::Syntax { command, source, .. } => {
                assert_eq!(command, "mod b");
                assert!(matches!(
                    source,
                    SyntaxError::Parse(ParseError::MissingArgument { index: 0, .. })
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.usage_hint().as_deref(),
            Some(
                "missing required argument target:member at position 0. Usage: mod b <target:member> [days:number?] [reason:string?...]"
            )
        );
    }

    #[test]
    fn no_argument_command_rejects_extra_tokens() {
        let d = dispatcher();
        assert!(d.dispatch(&(), &(), "!ping").unwrap().unwrap().arguments.is_empty());
        let err = d.dispatch(&(), &(), "!ping pong").unwrap_err();
        assert_eq!(err.error_code(), "unexpected_argument");
    }

    #[test]
    fn resolve_reports_not_found() {
        let d = dispatcher();
        assert_eq!(d.resolve(&["say", "hi"]).unwrap().command.name(), "echo");
        assert!(matches!(d.resolve(&["mod"]), Err(DispatchError::NotFound(name)) if name == "mod"));
    }

    #[test]
    fn usage_line_marks_optional() {
        let parser = SyntaxParser::new("target:user reason:string?...").unwrap();
        assert_eq!(usage_line(&parser), "<target:user> [reason:string?...]");
        assert_eq!(usage_line(&SyntaxParser::new("").unwrap()), "");
    }
}
