// src/cli/handlers/config.rs

//! `config` action.

use anyhow::Result;
use clap::Parser;

use crate::core::config_loader::InterceptorConfig;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Prints the effective configuration as TOML.")]
struct ConfigArgs {}

/// Prints the configuration in effect.
pub fn handle(args: Vec<String>, config: &InterceptorConfig) -> Result<()> {
    ConfigArgs::try_parse_from(&args)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
