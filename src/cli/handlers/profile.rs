// src/cli/handlers/profile.rs

//! `profile` action.

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::*;
use std::thread;
use std::time::Duration;

use crate::core::config_loader::InterceptorConfig;
use crate::core::interceptor::TimingInterceptor;
use crate::models::CallDescriptor;

/// Stand-in receiver for the demonstration call.
struct SleepingService;

// --- Command Argument Parsing ---
#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Runs a sleeping call through the timing interceptor."
)]
struct ProfileArgs {
    /// How long the call sleeps, in milliseconds.
    #[arg(long, default_value_t = 0)]
    sleep_ms: u64,

    /// Make the call fail after sleeping.
    #[arg(long)]
    fail: bool,
}

// --- Main Handler ---
/// Runs one sleeping call through the interceptor; fails when `--fail` is given.
pub fn handle(args: Vec<String>, config: &InterceptorConfig) -> Result<()> {
    let profile_args = ProfileArgs::try_parse_from(&args)?;
    let interceptor = TimingInterceptor::from_config(config.clone());
    let call = sleep_call(&profile_args);

    log::debug!(
        "Profiling '{}' with a threshold of {} ms",
        call.declared_signature(),
        config.threshold.as_millis()
    );

    let slept = interceptor.intercept(&call, || {
        thread::sleep(Duration::from_millis(profile_args.sleep_ms));
        if profile_args.fail {
            Err(anyhow!("sleep interrupted on request"))
        } else {
            Ok(profile_args.sleep_ms)
        }
    })?;

    println!("{} slept {} ms", "✔".green(), slept);
    Ok(())
}

/// Describes the call as the service sees it: the sleep duration is its only argument.
fn sleep_call(profile_args: &ProfileArgs) -> CallDescriptor {
    CallDescriptor::of::<SleepingService>("sleep").arg(&profile_args.sleep_ms)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::core::interceptor::InterceptionError;

    #[test]
    fn test_failing_call_surfaces_wrapped_error() {
        let err = handle(vec!["--fail".to_string()], &InterceptorConfig::default()).unwrap_err();
        let wrapped = err.downcast_ref::<InterceptionError>().unwrap();
        assert_eq!(wrapped.signature(), "SleepingService.sleep");
        assert_eq!(wrapped.original_cause().to_string(), "sleep interrupted on request");
    }

    #[test]
    fn test_call_records_only_the_sleep_duration() {
        let profile_args = ProfileArgs::try_parse_from(["--sleep-ms", "40", "--fail"]).unwrap();
        let call = sleep_call(&profile_args);
        assert_eq!(
            InterceptorConfig::default().formatter().format(&call),
            "SleepingService.sleep(40)"
        );
    }

    #[test]
    fn test_successful_call() {
        let args = vec!["--sleep-ms".to_string(), "1".to_string()];
        assert!(handle(args, &InterceptorConfig::default()).is_ok());
    }
}
