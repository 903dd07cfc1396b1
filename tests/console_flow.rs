//! Integration tests for the console host: input line → reply line.

mod common;

use botcmd::config::Config;
use common::TestClient;

#[tokio::test]
async fn test_ping_and_echo() {
    let mut client = TestClient::spawn(&Config::default()).expect("Failed to spawn console");

    assert_eq!(client.command("!ping").await.unwrap(), "pong");
    assert_eq!(client.command("!say hello   world").await.unwrap(), "hello world");
    assert_eq!(client.command("!sum 2 2.5").await.unwrap(), "4.5");

    assert!(client.finish().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_command_text_is_ignored() {
    let mut client = TestClient::spawn(&Config::default()).expect("Failed to spawn console");

    client.send("just chatting").await.unwrap();
    client.send("!").await.unwrap();
    assert_eq!(client.command("!ping").await.unwrap(), "pong");
}

#[tokio::test]
async fn test_usage_hint_on_invalid_arguments() {
    let mut client = TestClient::spawn(&Config::default()).expect("Failed to spawn console");

    let reply = client.command("!sum 1 two").await.unwrap();
    assert!(reply.starts_with("argument 1 (`two`) is not a valid number"), "{reply}");
    assert!(reply.ends_with("Usage: sum <values:number...>"), "{reply}");

    let reply = client.command("!ping now").await.unwrap();
    assert!(reply.starts_with("unexpected argument `now` at position 0"), "{reply}");

    assert_eq!(
        client.command("!nothing").await.unwrap(),
        "Unknown command: nothing"
    );
}

#[tokio::test]
async fn test_group_commands_and_aliases() {
    let mut client = TestClient::spawn(&Config::default()).expect("Failed to spawn console");

    assert_eq!(
        client.command("!moderation ban <@9> 1 raid").await.unwrap(),
        "banned <@9> for 1 days (raid)"
    );
    assert_eq!(client.command("!mod k <@9>").await.unwrap(), "kicked <@9>");
}

#[tokio::test]
async fn test_runtime_group_alias() {
    let mut client = TestClient::spawn(&Config::default()).expect("Failed to spawn console");

    assert_eq!(
        client.command("!mods kick <@3>").await.unwrap(),
        "Unknown command: mods"
    );
    assert_eq!(
        client.command("!alias moderation mods").await.unwrap(),
        "mods now refers to moderation"
    );
    assert_eq!(client.command("!mods kick <@3>").await.unwrap(), "kicked <@3>");
    assert_eq!(
        client.command("!alias nowhere x").await.unwrap(),
        "no such group: nowhere"
    );
}

#[tokio::test]
async fn test_help_json_snapshot() {
    let mut client = TestClient::spawn(&Config::default()).expect("Failed to spawn console");

    let reply = client.command("!help json").await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(json["name"], "root");
    assert_eq!(json["groups"][0]["name"], "moderation");
    assert_eq!(json["groups"][0]["commands"][0]["aliases"][0], "b");
}

#[tokio::test]
async fn test_config_prefix_and_string_bounds() {
    let mut config = Config::default();
    config.dispatch.prefix = "?".to_string();
    config.syntax.string_max_length = 4;
    let mut client = TestClient::spawn(&config).expect("Failed to spawn console");

    client.send("!ping").await.unwrap();
    assert_eq!(client.command("?ping").await.unwrap(), "pong");
    assert_eq!(client.command("?echo abcd").await.unwrap(), "abcd");

    let reply = client.command("?echo abcde").await.unwrap();
    assert!(reply.starts_with("argument 0 is too long (maximum 4 characters)"), "{reply}");
}
