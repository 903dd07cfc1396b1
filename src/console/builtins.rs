//! Builtin console commands.
//!
//! ```text
//! [root]
//!   ping
//!   echo (say)
//!   sum
//!   help (commands)
//!   alias
//!   [moderation] (mod)
//!     ban (b)
//!     kick (k)
//! ```

use super::{BotCommand, Context, Handler};
use crate::commands::{CommandTree, GroupSpec};
use crate::error::SetupError;
use async_trait::async_trait;
use botcmd_syntax::{Arguments, TypeOptions, Value};
use tracing::info;

/// Build the builtin command tree with the given string options.
pub fn tree(options: TypeOptions) -> Result<CommandTree<BotCommand>, SetupError> {
    let spec = GroupSpec::new("root")
        .command(BotCommand::new("ping", "", options, Ping)?.describe("Check that the bot is alive"))
        .command(
            BotCommand::new("echo", "text:string...", options, Echo)?
                .alias("say")
                .describe("Repeat the given text"),
        )
        .command(
            BotCommand::new("sum", "values:number...", options, Sum)?.describe("Add numbers together"),
        )
        .command(
            BotCommand::new("help", "format:string?", options, Help)?
                .alias("commands")
                .describe("List commands; `help json` for machine output"),
        )
        .command(
            BotCommand::new("alias", "group:string alias:string", options, DefineAlias)?
                .describe("Add an alias to a group, e.g. `alias moderation mods`"),
        )
        .group(
            GroupSpec::new("moderation")
                .alias("mod")
                .command(
                    BotCommand::new(
                        "ban",
                        "target:member days:number? reason:string?...",
                        options,
                        Ban,
                    )?
                    .alias("b")
                    .describe("Ban a member"),
                )
                .command(
                    BotCommand::new("kick", "target:member reason:string?...", options, Kick)?
                        .alias("k")
                        .describe("Kick a member"),
                ),
        );

    Ok(CommandTree::from_spec(spec)?)
}

fn join(values: &[Value]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

struct Ping;

#[async_trait]
impl Handler for Ping {
    async fn handle(&self, _ctx: &Context, _args: &Arguments) -> Vec<String> {
        vec!["pong".to_owned()]
    }
}

struct Echo;

#[async_trait]
impl Handler for Echo {
    async fn handle(&self, _ctx: &Context, args: &Arguments) -> Vec<String> {
        vec![join(args.as_slice())]
    }
}

struct Sum;

#[async_trait]
impl Handler for Sum {
    async fn handle(&self, _ctx: &Context, args: &Arguments) -> Vec<String> {
        let total: f64 = args.iter().filter_map(Value::as_number).sum();
        vec![total.to_string()]
    }
}

struct Help;

#[async_trait]
impl Handler for Help {
    async fn handle(&self, ctx: &Context, args: &Arguments) -> Vec<String> {
        let snapshot = ctx.dispatcher.read().snapshot();
        match args.str(0) {
            Some("json") => match serde_json::to_string(&snapshot) {
                Ok(json) => vec![json],
                Err(e) => vec![format!("failed to render command tree: {e}")],
            },
            _ => snapshot.outline().lines().map(str::to_owned).collect(),
        }
    }
}

struct DefineAlias;

#[async_trait]
impl Handler for DefineAlias {
    async fn handle(&self, ctx: &Context, args: &Arguments) -> Vec<String> {
        let (Some(path), Some(alias)) = (args.str(0), args.str(1)) else {
            return Vec::new();
        };
        let segments: Vec<&str> = path.split('.').collect();

        let mut dispatcher = ctx.dispatcher.write();
        let tree = dispatcher.tree_mut();
        let Some(group) = tree.walk(tree.root(), &segments) else {
            return vec![format!("no such group: {path}")];
        };
        match tree.define_alias(group, alias) {
            Ok(()) => {
                info!(user = %ctx.session.user, group = %path, alias = %alias, "Group alias defined");
                vec![format!("{alias} now refers to {path}")]
            }
            Err(e) => vec![e.to_string()],
        }
    }
}

struct Ban;

#[async_trait]
impl Handler for Ban {
    async fn handle(&self, ctx: &Context, args: &Arguments) -> Vec<String> {
        let Some(target) = args.entity(0) else {
            return Vec::new();
        };
        info!(user = %ctx.session.user, member = %target, "Ban requested");

        let mut reply = format!("banned {target}");
        if let Some(days) = args.number(1) {
            reply.push_str(&format!(" for {days} days"));
        }
        let reason = join(args.tail(2));
        if !reason.is_empty() {
            reply.push_str(&format!(" ({reason})"));
        }
        vec![reply]
    }
}

struct Kick;

#[async_trait]
impl Handler for Kick {
    async fn handle(&self, ctx: &Context, args: &Arguments) -> Vec<String> {
        let Some(target) = args.entity(0) else {
            return Vec::new();
        };
        info!(user = %ctx.session.user, member = %target, "Kick requested");

        let reason = join(args.tail(1));
        if reason.is_empty() {
            vec![format!("kicked {target}")]
        } else {
            vec![format!("kicked {target} ({reason})")]
        }
    }
}
