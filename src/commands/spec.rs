//! Value-level description of a group subtree.
//!
//! A [`GroupSpec`] is built up front and handed to
//! [`CommandTree::insert_spec`](super::CommandTree::insert_spec), which
//! materializes it (children first) and attaches it in one step.

/// One item inside a group: a command or a nested group.
#[derive(Debug)]
pub enum Entry<C> {
    Command(C),
    Group(GroupSpec<C>),
}

impl<C> From<GroupSpec<C>> for Entry<C> {
    fn from(spec: GroupSpec<C>) -> Self {
        Entry::Group(spec)
    }
}

/// A named group with aliases and entries, not yet placed in a tree.
#[derive(Debug)]
pub struct GroupSpec<C> {
    pub name: String,
    pub aliases: Vec<String>,
    pub entries: Vec<Entry<C>>,
}

impl<C> GroupSpec<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn command(mut self, command: C) -> Self {
        self.entries.push(Entry::Command(command));
        self
    }

    pub fn group(mut self, group: GroupSpec<C>) -> Self {
        self.entries.push(Entry::Group(group));
        self
    }
}

/// Shorthand for a group spec with no aliases.
pub fn with_group<C, I>(name: impl Into<String>, entries: I) -> GroupSpec<C>
where
    I: IntoIterator<Item = Entry<C>>,
{
    GroupSpec {
        name: name.into(),
        aliases: Vec::new(),
        entries: entries.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Command, CommandTree};

    struct Named(&'static str);

    impl Command for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn spec_materializes_nested_groups() {
        let spec = GroupSpec::new("admin")
            .alias("a")
            .command(Named("reload"))
            .group(with_group("users", [Entry::Command(Named("list"))]));

        let mut tree = CommandTree::new("root");
        let root = tree.root();
        let admin = tree.insert_spec(root, spec).unwrap();

        assert!(tree.has_alias(admin, "a"));
        assert_eq!(tree.resolve(&["a", "reload"]).unwrap().depth, 2);
        assert_eq!(tree.resolve(&["admin", "users", "list"]).unwrap().depth, 3);
    }

    #[test]
    fn from_spec_uses_spec_as_root() {
        let tree = CommandTree::from_spec(
            GroupSpec::new("bot")
                .command(Named("ping"))
                .group(GroupSpec::new("fun").command(Named("roll"))),
        )
        .unwrap();
        assert_eq!(tree.name(tree.root()), Some("bot"));
        assert_eq!(tree.snapshot().groups[0].name, "fun");
    }
}
