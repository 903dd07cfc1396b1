//! Command tree registry.
//!
//! Groups live in an arena and are addressed by [`GroupId`]. Each group owns
//! its commands and records its subgroups by handle, together with alias
//! maps for both. A group has at most one parent, and
//! [`CommandTree::add_group`] refuses to attach a group under itself or one
//! of its descendants, so every lookup walks a finite tree.
//!
//! Two lookups with different rules coexist:
//! - [`CommandTree::find`] matches canonical command names only, searching
//!   the group and then every subgroup depth-first.
//! - [`CommandTree::find_from_args`] follows a token stream and honours both
//!   group and command aliases.

use super::snapshot::{CommandSummary, TreeProjection};
use super::spec::{Entry, GroupSpec};
use super::Command;
use crate::error::RegistryError;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Handle to a group inside a [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

/// A command matched from a token stream.
#[derive(Debug)]
pub struct Resolution<'a, C> {
    pub command: &'a C,
    /// Tokens consumed up to and including the command name.
    pub depth: usize,
}

impl<C> Clone for Resolution<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Resolution<'_, C> {}

impl<C> Resolution<'_, C> {
    /// The argument tokens that follow the command name.
    pub fn arguments<'t, T>(&self, tokens: &'t [T]) -> &'t [T] {
        tokens.get(self.depth..).unwrap_or_default()
    }
}

#[derive(Debug)]
struct GroupNode<C> {
    name: String,
    aliases: Vec<String>,
    parent: Option<GroupId>,
    /// Declaration order is kept for `find` and snapshots.
    commands: Vec<C>,
    command_aliases: HashMap<String, String>,
    subgroups: Vec<(String, GroupId)>,
    group_aliases: HashMap<String, String>,
}

impl<C: Command> GroupNode<C> {
    fn new(name: String, aliases: Vec<String>) -> Self {
        Self {
            name,
            aliases,
            parent: None,
            commands: Vec::new(),
            command_aliases: HashMap::new(),
            subgroups: Vec::new(),
            group_aliases: HashMap::new(),
        }
    }

    fn command(&self, name: &str) -> Option<&C> {
        self.commands.iter().find(|c| c.name() == name)
    }

    fn command_or_alias(&self, token: &str) -> Option<&C> {
        self.command(token).or_else(|| {
            self.command_aliases
                .get(token)
                .and_then(|canonical| self.command(canonical))
        })
    }

    fn subgroup(&self, name: &str) -> Option<GroupId> {
        self.subgroups
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
    }

    fn subgroup_or_alias(&self, token: &str) -> Option<GroupId> {
        self.subgroup(token).or_else(|| {
            self.group_aliases
                .get(token)
                .and_then(|canonical| self.subgroup(canonical))
        })
    }
}

/// Bind `alias` to `canonical`, last write wins.
fn bind_alias(map: &mut HashMap<String, String>, group: &str, alias: &str, canonical: &str) {
    if let Some(previous) = map.insert(alias.to_owned(), canonical.to_owned())
        && previous != canonical
    {
        warn!(
            group = %group,
            alias = %alias,
            previous = %previous,
            canonical = %canonical,
            "Alias rebound"
        );
    }
}

/// Arena-backed tree of command groups.
///
/// Slots are never freed. A removed or replaced group keeps its [`GroupId`]
/// and its subtree, so it can be attached again; handles never go stale.
#[derive(Debug)]
pub struct CommandTree<C> {
    nodes: Vec<GroupNode<C>>,
    root: GroupId,
}

impl<C: Command> CommandTree<C> {
    /// Create a tree holding only an empty root group.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![GroupNode::new(root_name.into(), Vec::new())],
            root: GroupId(0),
        }
    }

    /// Build a whole tree from a spec; the spec becomes the root.
    pub fn from_spec(spec: GroupSpec<C>) -> Result<Self, RegistryError> {
        let GroupSpec {
            name,
            aliases,
            entries,
        } = spec;
        let mut tree = Self::new(name);
        tree.nodes[0].aliases = aliases;
        let root = tree.root;
        tree.add(root, entries)?;
        Ok(tree)
    }

    pub fn root(&self) -> GroupId {
        self.root
    }

    /// Groups ever created in this tree, attached or not.
    pub fn group_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: GroupId) -> Result<&GroupNode<C>, RegistryError> {
        self.nodes.get(id.0).ok_or(RegistryError::UnknownGroup(id))
    }

    fn node_mut(&mut self, id: GroupId) -> Result<&mut GroupNode<C>, RegistryError> {
        self.nodes.get_mut(id.0).ok_or(RegistryError::UnknownGroup(id))
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Create a detached group. Attach it with [`add_group`](Self::add_group).
    pub fn create_group<I, S>(&mut self, name: impl Into<String>, aliases: I) -> GroupId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = GroupId(self.nodes.len());
        self.nodes.push(GroupNode::new(
            name.into(),
            aliases.into_iter().map(Into::into).collect(),
        ));
        id
    }

    /// Attach `child` under `parent`, keyed by the child's name and aliases.
    ///
    /// A subgroup already registered under the same name is detached and
    /// replaced in its declaration slot.
    pub fn add_group(&mut self, parent: GroupId, child: GroupId) -> Result<(), RegistryError> {
        let child_node = self.node(child)?;
        let parent_node = self.node(parent)?;
        if child_node.parent.is_some() {
            return Err(RegistryError::AlreadyAttached(child_node.name.clone()));
        }
        if self.is_ancestor_or_self(child, parent) {
            warn!(parent = %parent_node.name, child = %child_node.name, "Rejected cyclic group attachment");
            return Err(RegistryError::Cycle {
                parent: parent_node.name.clone(),
                child: child_node.name.clone(),
            });
        }

        let name = child_node.name.clone();
        let aliases = child_node.aliases.clone();

        let parent_node = self.node_mut(parent)?;
        let replaced = match parent_node.subgroups.iter_mut().find(|slot| slot.0 == name) {
            Some(slot) => Some(std::mem::replace(&mut slot.1, child)),
            None => {
                parent_node.subgroups.push((name.clone(), child));
                None
            }
        };
        for alias in &aliases {
            bind_alias(&mut parent_node.group_aliases, &parent_node.name, alias, &name);
        }
        debug!(parent = %parent_node.name, group = %name, aliases = aliases.len(), "Group registered");

        if let Some(old) = replaced {
            self.node_mut(old)?.parent = None;
        }
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Whether `candidate` is `node` or one of its ancestors.
    fn is_ancestor_or_self(&self, candidate: GroupId, node: GroupId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes.get(id.0).and_then(|n| n.parent);
        }
        false
    }

    /// Detach the subgroup `name` from `parent`, returning its handle.
    ///
    /// Group aliases pointing at it are dropped; the subtree itself is kept
    /// and can be attached again.
    pub fn remove_group(
        &mut self,
        parent: GroupId,
        name: &str,
    ) -> Result<Option<GroupId>, RegistryError> {
        let parent_node = self.node_mut(parent)?;
        let Some(pos) = parent_node.subgroups.iter().position(|(n, _)| n == name) else {
            return Ok(None);
        };
        let (_, id) = parent_node.subgroups.remove(pos);
        parent_node.group_aliases.retain(|_, canonical| canonical.as_str() != name);
        self.node_mut(id)?.parent = None;
        Ok(Some(id))
    }

    /// Register a command by its canonical name and back-fill its aliases.
    ///
    /// A command with the same canonical name is replaced in place.
    pub fn add_command(&mut self, group: GroupId, command: C) -> Result<(), RegistryError> {
        let node = self.node_mut(group)?;
        let name = command.name().to_owned();
        let aliases: Vec<String> = command.aliases().into_iter().map(str::to_owned).collect();

        match node.commands.iter_mut().find(|c| c.name() == name) {
            Some(existing) => *existing = command,
            None => node.commands.push(command),
        }
        for alias in &aliases {
            bind_alias(&mut node.command_aliases, &node.name, alias, &name);
        }
        debug!(group = %node.name, command = %name, aliases = aliases.len(), "Command registered");
        Ok(())
    }

    /// Remove a command by canonical name, with the aliases bound to it.
    pub fn remove_command(&mut self, group: GroupId, name: &str) -> Result<Option<C>, RegistryError> {
        let node = self.node_mut(group)?;
        let Some(pos) = node.commands.iter().position(|c| c.name() == name) else {
            return Ok(None);
        };
        node.command_aliases.retain(|_, canonical| canonical.as_str() != name);
        Ok(Some(node.commands.remove(pos)))
    }

    /// Add a mix of commands and group specs to `group`.
    pub fn add<I>(&mut self, group: GroupId, entries: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Entry<C>>,
    {
        for entry in entries {
            match entry {
                Entry::Command(command) => self.add_command(group, command)?,
                Entry::Group(spec) => {
                    self.insert_spec(group, spec)?;
                }
            }
        }
        Ok(())
    }

    /// Materialize a group spec and attach it under `parent`.
    pub fn insert_spec(&mut self, parent: GroupId, spec: GroupSpec<C>) -> Result<GroupId, RegistryError> {
        self.node(parent)?;
        let GroupSpec {
            name,
            aliases,
            entries,
        } = spec;
        let id = self.create_group(name, aliases);
        self.add(id, entries)?;
        self.add_group(parent, id)?;
        Ok(id)
    }

    /// Append an alias to `group`, binding it in the parent when attached.
    pub fn define_alias(&mut self, group: GroupId, alias: impl Into<String>) -> Result<(), RegistryError> {
        let alias = alias.into();
        let node = self.node_mut(group)?;
        if !node.aliases.contains(&alias) {
            node.aliases.push(alias.clone());
        }
        let name = node.name.clone();
        if let Some(parent) = node.parent {
            let parent_node = self.node_mut(parent)?;
            bind_alias(&mut parent_node.group_aliases, &parent_node.name, &alias, &name);
        }
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn name(&self, group: GroupId) -> Option<&str> {
        self.nodes.get(group.0).map(|n| n.name.as_str())
    }

    pub fn parent(&self, group: GroupId) -> Option<GroupId> {
        self.nodes.get(group.0).and_then(|n| n.parent)
    }

    /// Whether `name` is one of the group's own aliases.
    pub fn has_alias(&self, group: GroupId, name: &str) -> bool {
        self.nodes
            .get(group.0)
            .is_some_and(|n| n.aliases.iter().any(|a| a == name))
    }

    /// Direct commands of `group`, in declaration order.
    pub fn commands(&self, group: GroupId) -> impl Iterator<Item = &C> + '_ {
        self.nodes.get(group.0).into_iter().flat_map(|n| n.commands.iter())
    }

    /// Direct subgroups of `group`, in declaration order.
    pub fn subgroups(&self, group: GroupId) -> impl Iterator<Item = GroupId> + '_ {
        self.nodes
            .get(group.0)
            .into_iter()
            .flat_map(|n| n.subgroups.iter().map(|(_, id)| *id))
    }

    /// Find a command by exact canonical name, depth-first.
    ///
    /// Alias maps are not consulted at any level.
    pub fn find(&self, group: GroupId, name: &str) -> Option<&C> {
        let node = self.nodes.get(group.0)?;
        node.command(name).or_else(|| {
            node.subgroups
                .iter()
                .find_map(|(_, sub)| self.find(*sub, name))
        })
    }

    /// Follow the canonical group names in `path` from `group`.
    pub fn walk<S: AsRef<str>>(&self, group: GroupId, path: &[S]) -> Option<GroupId> {
        path.iter().try_fold(group, |current, segment| {
            self.nodes.get(current.0)?.subgroup(segment.as_ref())
        })
    }

    /// Follow the canonical group names in `path`, then look up `name` there.
    pub fn find_in_group<S: AsRef<str>>(&self, group: GroupId, path: &[S], name: &str) -> Option<&C> {
        let target = self.walk(group, path)?;
        self.nodes.get(target.0)?.command(name)
    }

    /// Resolve a token stream into a command and the number of tokens used.
    ///
    /// Leading tokens naming a subgroup (by name or alias) descend into it;
    /// the first token that does not is looked up as a command (by name,
    /// then alias) in the group reached. A command in `group` itself
    /// reports depth 1.
    pub fn find_from_args<T: AsRef<str>>(&self, group: GroupId, tokens: &[T]) -> Option<Resolution<'_, C>> {
        self.find_from_args_at(group, tokens, 1)
    }

    fn find_from_args_at<T: AsRef<str>>(
        &self,
        group: GroupId,
        tokens: &[T],
        depth: usize,
    ) -> Option<Resolution<'_, C>> {
        let node = self.nodes.get(group.0)?;
        let (first, remaining) = tokens.split_first()?;
        let first = first.as_ref();

        if let Some(sub) = node.subgroup_or_alias(first) {
            return self.find_from_args_at(sub, remaining, depth + 1);
        }
        node.command_or_alias(first)
            .map(|command| Resolution { command, depth })
    }

    /// Count how many leading `names` resolve along the subgroup chain.
    pub fn get_deepest_group<S: AsRef<str>>(&self, group: GroupId, names: &[S]) -> usize {
        let mut current = group;
        let mut depth = 0;
        for name in names {
            match self.nodes.get(current.0).and_then(|n| n.subgroup(name.as_ref())) {
                Some(next) => {
                    current = next;
                    depth += 1;
                }
                None => break,
            }
        }
        depth
    }

    /// Read-only projection of `group` and everything below it.
    pub fn fetch_command_tree(&self, group: GroupId) -> Option<TreeProjection> {
        let node = self.nodes.get(group.0)?;
        Some(TreeProjection {
            name: node.name.clone(),
            commands: node.commands.iter().map(CommandSummary::of).collect(),
            groups: node
                .subgroups
                .iter()
                .filter_map(|(_, sub)| self.fetch_command_tree(*sub))
                .collect(),
        })
    }

    /// [`find_from_args`](Self::find_from_args) from the root.
    pub fn resolve<T: AsRef<str>>(&self, tokens: &[T]) -> Option<Resolution<'_, C>> {
        self.find_from_args(self.root, tokens)
    }

    /// [`fetch_command_tree`](Self::fetch_command_tree) of the root.
    pub fn snapshot(&self) -> TreeProjection {
        let root = &self.nodes[self.root.0];
        self.fetch_command_tree(self.root).unwrap_or_else(|| TreeProjection {
            name: root.name.clone(),
            commands: Vec::new(),
            groups: Vec::new(),
        })
    }
}
