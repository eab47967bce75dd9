// src/cli/handlers/format.rs

//! `format` action.

use anyhow::Result;
use clap::Parser;

use crate::core::config_loader::InterceptorConfig;
use crate::models::{ArgValue, CallDescriptor};

// --- Command Argument Parsing ---
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Prints the rendered signature of a call.")]
struct FormatArgs {
    /// Receiver type name, e.g. `Inventory`.
    receiver: String,

    /// Method name, e.g. `reserve`.
    method: String,

    /// Call arguments. `null`, booleans, numbers and single characters are
    /// recognised; everything else is text.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

// --- Main Handler ---
/// Renders the signature of the call described by `args`.
pub fn handle(args: Vec<String>, config: &InterceptorConfig) -> Result<()> {
    let parsed = FormatArgs::try_parse_from(&args)?;
    let call = CallDescriptor::new(parsed.receiver, parsed.method)
        .with_args(parsed.args.iter().map(|word| classify_word(word)));

    println!("{}", config.formatter().format(&call));
    Ok(())
}

/// Picks the argument kind a command-line word most likely stands for.
fn classify_word(word: &str) -> ArgValue {
    if word == "null" {
        return ArgValue::Null;
    }
    if let Ok(b) = word.parse::<bool>() {
        return ArgValue::Bool(b);
    }
    if word.parse::<i128>().is_ok() || word.parse::<f64>().is_ok_and(f64::is_finite) {
        return ArgValue::Number(word.to_string());
    }
    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return ArgValue::Char(c);
    }
    ArgValue::text(word)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_word() {
        assert_eq!(classify_word("null"), ArgValue::Null);
        assert_eq!(classify_word("true"), ArgValue::Bool(true));
        assert_eq!(classify_word("-33"), ArgValue::Number("-33".to_string()));
        assert_eq!(classify_word("2.5"), ArgValue::Number("2.5".to_string()));
        assert_eq!(classify_word("p"), ArgValue::Char('p'));
        assert_eq!(classify_word("inf"), ArgValue::text("inf"));
        assert_eq!(classify_word("p1"), ArgValue::text("p1"));
    }

    #[test]
    fn test_handle_rejects_missing_method() {
        let result = handle(vec!["Inventory".to_string()], &InterceptorConfig::default());
        assert!(result.is_err());
    }
}
