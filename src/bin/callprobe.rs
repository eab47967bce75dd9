// src/bin/callprobe.rs

//! `callprobe` command-line entry point.

use anyhow::Result;
use callprobe::{
    InterceptorConfig,
    cli::{Cli, handlers},
    load_config,
};
use clap::Parser;
use colored::*;

// --- Command Definition and Registry ---

/// Defines an action, its aliases, and its handler function.
#[derive(Debug)]
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>, &InterceptorConfig) -> Result<()>,
}

static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "config",
        aliases: &[],
        handler: handlers::config::handle,
    },
    CommandDefinition {
        name: "format",
        aliases: &["fmt"],
        handler: handlers::format::handle,
    },
    CommandDefinition {
        name: "profile",
        aliases: &["prof"],
        handler: handlers::profile::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("callprobe=debug"))
        .init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => InterceptorConfig::default(),
    };

    let Some(action) = cli.action else {
        let names: Vec<&str> = COMMAND_REGISTRY.iter().map(|cmd| cmd.name).collect();
        println!("Available actions: {}", names.join(", "));
        return Ok(());
    };

    match find_command(&action) {
        Some(command) => (command.handler)(cli.args, &config),
        None => anyhow::bail!("Unknown action '{}'.", action),
    }
}
