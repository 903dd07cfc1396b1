//! Serializable projection of a command tree.

use super::Command;
use serde::Serialize;

/// A command as it appears in a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSummary {
    pub name: String,
    pub aliases: Vec<String>,
}

impl CommandSummary {
    pub fn of<C: Command>(command: &C) -> Self {
        Self {
            name: command.name().to_owned(),
            aliases: command.aliases().into_iter().map(str::to_owned).collect(),
        }
    }
}

/// One group: its name, its direct commands, and its subgroups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeProjection {
    pub name: String,
    pub commands: Vec<CommandSummary>,
    pub groups: Vec<TreeProjection>,
}

impl TreeProjection {
    /// Total commands in this group and below.
    pub fn command_count(&self) -> usize {
        self.commands.len()
            + self
                .groups
                .iter()
                .map(TreeProjection::command_count)
                .sum::<usize>()
    }

    /// Render as an indented outline, one line per group and command.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        use std::fmt::Write;
        let pad = "  ".repeat(depth);
        let _ = writeln!(out, "{pad}[{}]", self.name);
        for command in &self.commands {
            if command.aliases.is_empty() {
                let _ = writeln!(out, "{pad}  {}", command.name);
            } else {
                let _ = writeln!(out, "{pad}  {} ({})", command.name, command.aliases.join(", "));
            }
        }
        for group in &self.groups {
            group.write_outline(out, depth + 1);
        }
    }
}
