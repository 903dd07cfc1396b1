//! Integration test common infrastructure.
//!
//! Provides a console client driving a spawned [`botcmd::console::Console`]
//! over in-memory pipes, plus a small command tree fixture.

pub mod client;

#[allow(unused_imports)]
pub use client::TestClient;

use botcmd::commands::{CommandDef, CommandTree, GroupSpec};

/// `root { ping, config } -> modgroup(mod) { ban(b) } -> audit { log }`
#[allow(dead_code)]
pub fn sample_tree() -> CommandTree<CommandDef> {
    CommandTree::from_spec(
        GroupSpec::new("root")
            .command(CommandDef::new("ping", "").unwrap())
            .command(CommandDef::new("config", "key:string value:string?").unwrap().alias("cfg"))
            .group(
                GroupSpec::new("modgroup")
                    .alias("mod")
                    .command(
                        CommandDef::new("ban", "target:member days:number? reason:string?...")
                            .unwrap()
                            .alias("b"),
                    )
                    .group(GroupSpec::new("audit").command(CommandDef::new("log", "count:number?").unwrap())),
            ),
    )
    .unwrap()
}
