//! Plain command definition.

use super::{Command, TypedCommand};
use botcmd_syntax::{SyntaxError, SyntaxParser};

/// A command made of a name, aliases, a description and a grammar.
#[derive(Debug, Clone)]
pub struct CommandDef {
    name: String,
    aliases: Vec<String>,
    description: String,
    syntax: SyntaxParser,
}

impl CommandDef {
    /// Create a command whose grammar is the space-separated `syntax`.
    ///
    /// Fails if any signature does not compile; registration should stop
    /// there rather than install a broken command.
    pub fn new(name: impl Into<String>, syntax: &str) -> Result<Self, SyntaxError> {
        Ok(Self::with_parser(name, SyntaxParser::new(syntax)?))
    }

    pub fn with_parser(name: impl Into<String>, syntax: SyntaxParser) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: String::new(),
            syntax,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn syntax_mut(&mut self) -> &mut SyntaxParser {
        &mut self.syntax
    }
}

impl Command for CommandDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn aliases(&self) -> Vec<&str> {
        self.aliases.iter().map(String::as_str).collect()
    }
}

impl TypedCommand for CommandDef {
    fn syntax(&self) -> &SyntaxParser {
        &self.syntax
    }
}
