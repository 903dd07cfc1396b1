//! Integration tests for command tree lookups and projections.

mod common;

use botcmd::commands::{Command, CommandDef, CommandTree, GroupSpec, TreeProjection};
use botcmd::error::RegistryError;
use common::sample_tree;

fn def(name: &str) -> CommandDef {
    CommandDef::new(name, "").unwrap()
}

#[test]
fn test_find_from_args_through_subgroup() {
    let tree = sample_tree();
    let hit = tree.resolve(&["modgroup", "ban"]).unwrap();
    assert_eq!(hit.command.name(), "ban");
    assert_eq!(hit.depth, 2);
}

#[test]
fn test_find_from_args_on_root() {
    let mut tree = CommandTree::new("root");
    let root = tree.root();
    tree.add_command(root, def("ban")).unwrap();

    let hit = tree.find_from_args(root, &["ban"]).unwrap();
    assert_eq!(hit.command.name(), "ban");
    assert_eq!(hit.depth, 1);
    assert!(tree.find_from_args(root, &["unknown"]).is_none());
}

#[test]
fn test_find_from_args_uses_aliases_at_every_level() {
    let tree = sample_tree();
    let tokens = ["mod", "b", "<@1>", "7"];
    let hit = tree.resolve(&tokens).unwrap();
    assert_eq!(hit.command.name(), "ban");
    assert_eq!(hit.arguments(&tokens), ["<@1>", "7"]);
    assert_eq!(tree.resolve(&["cfg", "prefix"]).unwrap().command.name(), "config");
}

#[test]
fn test_find_ignores_aliases() {
    let tree = sample_tree();
    let root = tree.root();
    assert_eq!(tree.find(root, "ban").map(|c| c.name()), Some("ban"));
    assert_eq!(tree.find(root, "log").map(|c| c.name()), Some("log"));
    assert!(tree.find(root, "b").is_none());
    assert!(tree.find(root, "cfg").is_none());
}

#[test]
fn test_fetch_command_tree_empty_group() {
    let tree: CommandTree<CommandDef> = CommandTree::new("empty");
    let projection = tree.fetch_command_tree(tree.root()).unwrap();
    assert_eq!(
        projection,
        TreeProjection {
            name: "empty".to_string(),
            commands: vec![],
            groups: vec![],
        }
    );
}

#[test]
fn test_fetch_command_tree_two_levels() {
    let tree = CommandTree::from_spec(
        GroupSpec::new("root")
            .command(def("ping"))
            .group(GroupSpec::new("fun").command(def("roll"))),
    )
    .unwrap();

    let projection = tree.fetch_command_tree(tree.root()).unwrap();
    assert_eq!(projection.commands.len(), 1);
    assert_eq!(projection.commands[0].name, "ping");
    assert_eq!(projection.groups.len(), 1);
    assert_eq!(projection.groups[0].name, "fun");
    assert_eq!(projection.groups[0].commands[0].name, "roll");
    assert!(projection.groups[0].groups.is_empty());

    let json = serde_json::to_value(&projection).unwrap();
    assert_eq!(json["groups"][0]["commands"][0]["name"], "roll");
}

#[test]
fn test_get_deepest_group() {
    let tree: CommandTree<CommandDef> = CommandTree::from_spec(
        GroupSpec::new("root").group(GroupSpec::new("a").group(GroupSpec::new("b"))),
    )
    .unwrap();
    assert_eq!(tree.get_deepest_group(tree.root(), &["a", "b", "c"]), 2);
}

#[test]
fn test_find_in_group_follows_path() {
    let tree = sample_tree();
    let root = tree.root();
    let hit = tree.find_in_group(root, &["modgroup", "audit"], "log");
    assert_eq!(hit.map(|c| c.name()), Some("log"));
    assert!(tree.find_in_group(root, &["modgroup"], "log").is_none());
}

#[test]
fn test_group_cannot_nest_under_itself() {
    let mut tree: CommandTree<CommandDef> = CommandTree::new("root");
    let root = tree.root();
    let group = tree.create_group("loop", ["l"]);
    assert!(matches!(
        tree.add_group(group, group),
        Err(RegistryError::Cycle { .. })
    ));
    tree.add_group(root, group).unwrap();
    assert!(matches!(
        tree.add_group(group, root),
        Err(RegistryError::Cycle { .. })
    ));
}

#[test]
fn test_alias_rebinding_is_last_write_wins() {
    let mut tree = CommandTree::new("root");
    let root = tree.root();
    tree.add_command(root, def("kick").alias("x")).unwrap();
    tree.add_command(root, def("kill").alias("x")).unwrap();
    assert_eq!(tree.resolve(&["x"]).unwrap().command.name(), "kill");
}

#[test]
fn test_removed_group_stops_resolving() {
    let mut tree = sample_tree();
    let root = tree.root();
    let removed = tree.remove_group(root, "modgroup").unwrap();
    assert!(removed.is_some());
    assert!(tree.resolve(&["mod", "ban", "<@1>"]).is_none());
    assert!(tree.find(root, "ban").is_none());

    // detached subtrees can be attached again
    tree.add_group(root, removed.unwrap()).unwrap();
    assert!(tree.resolve(&["modgroup", "ban"]).is_some());
}
