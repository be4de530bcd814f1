//! Unit tests for command parsing and dispatch validation

use clap::Parser;

use super::*;
use crate::Cli;

fn context() -> CommandContext {
    CommandContext::new(None, false, Duration::from_secs(5)).unwrap()
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn search_arguments_parse_with_defaults() {
    let cli = Cli::parse_from(["pacrat", "search", "crates", "serde"]);
    match cli.command {
        Commands::Search { index, query, limit } => {
            assert_eq!(index, "crates");
            assert_eq!(query, "serde");
            assert_eq!(limit, 5);
        }
        _ => panic!("expected search command"),
    }
    assert!(!cli.no_cache);
    assert_eq!(cli.timeout, 30);
}

#[test]
fn global_flags_apply_after_the_subcommand() {
    let cli = Cli::parse_from([
        "pacrat",
        "info",
        "npm",
        "express",
        "--version",
        "4.18.2",
        "--no-cache",
        "--user-agent",
        "pacrat-test/1.0",
    ]);
    match cli.command {
        Commands::Info { index, name, version } => {
            assert_eq!(index, "npm");
            assert_eq!(name, "express");
            assert_eq!(version.as_deref(), Some("4.18.2"));
        }
        _ => panic!("expected info command"),
    }
    assert!(cli.no_cache);
    assert_eq!(cli.user_agent.as_deref(), Some("pacrat-test/1.0"));
}

#[tokio::test]
async fn unknown_index_is_rejected_before_any_network_call() {
    let command = Commands::Search {
        index: "maven".to_string(),
        query: "junit".to_string(),
        limit: 5,
    };
    let error = dispatch_command(command, &context()).await.unwrap_err();
    let pacrat_error = error.downcast_ref::<PacratError>().unwrap();
    assert!(pacrat_error.is_user_error());
}

#[tokio::test]
async fn docker_info_points_at_the_tag_commands() {
    let command = Commands::Info {
        index: "docker".to_string(),
        name: "nginx".to_string(),
        version: None,
    };
    let error = dispatch_command(command, &context()).await.unwrap_err();
    let pacrat_error = error.downcast_ref::<PacratError>().unwrap();
    assert!(pacrat_error.is_user_error());
    assert!(pacrat_error.to_string().contains("tags"));
}
