// src/cli/mod.rs

//! Command-line surface of the `callprobe` binary.

use clap::Parser;
use std::path::PathBuf;

pub mod handlers;

/// callprobe: render call signatures and profile slow calls.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Interceptor configuration file (TOML). Defaults apply when omitted.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// The action to run: `format`, `profile` or `config`.
    pub action: Option<String>,

    /// All remaining arguments, passed to the action as-is.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
