// src/core/interceptor.rs

//! Timing interceptor and the error it wraps failures in.

use crate::core::config_loader::InterceptorConfig;
use crate::core::formatter::SignatureFormatter;
use crate::core::sink::LogHandle;
use crate::core::stopwatch::StopWatch;
use crate::models::CallDescriptor;
use scopeguard::ScopeGuard;
use std::any::Any;
use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// Cause attached to an [`InterceptionError`] when the wrapped call panicked.
#[derive(Error, Debug)]
#[error("Call panicked: {message}")]
pub struct CallPanicked {
    /// The panic payload, when it was a string.
    pub message: String,
}

/// The wrapped call failed. The original failure is kept as the source.
#[derive(Error, Debug)]
#[error("Error occurred during profiling {signature}")]
pub struct InterceptionError {
    signature: String,
    #[source]
    source: Box<dyn StdError + Send + Sync + 'static>,
}

impl InterceptionError {
    /// Wraps `source` as the failure of `call`.
    pub fn new(call: &CallDescriptor, source: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self {
            signature: call.declared_signature(),
            source,
        }
    }

    /// `Receiver.method` of the failed call.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The error or panic that made the call fail.
    pub fn original_cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }

    /// Unwraps the original cause.
    pub fn into_cause(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.source
    }

    /// The original cause, if it is an `E`.
    pub fn downcast_cause<E: StdError + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }
}

type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// Runs `call`, turning both errors and panics into a boxed cause.
fn run_guarded<T, E, F>(call: F) -> Result<T, Cause>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<Cause>,
{
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(err.into()),
        Err(payload) => Err(Box::new(CallPanicked {
            message: panic_message(payload.as_ref()),
        })),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// "Around" hook: runs a call, reports it when it is slow and wraps any failure.
///
/// Slow calls are only reported after they return; nothing is cancelled.
#[derive(Debug, Clone)]
pub struct TimingInterceptor {
    logger: LogHandle,
    formatter: SignatureFormatter,
    config: InterceptorConfig,
}

impl Default for TimingInterceptor {
    fn default() -> Self {
        Self::from_config(InterceptorConfig::default())
    }
}

impl TimingInterceptor {
    /// Interceptor writing through the global `log` facade under `config.target`.
    pub fn from_config(config: InterceptorConfig) -> Self {
        let logger = LogHandle::global(config.target.clone());
        Self::new(logger, config)
    }

    /// Interceptor writing through `logger`, with the threshold, element cap
    /// and slow-call level of `config`.
    pub fn new(logger: LogHandle, config: InterceptorConfig) -> Self {
        Self {
            logger,
            formatter: config.formatter(),
            config,
        }
    }

    /// The handle reports are written to.
    pub fn logger(&self) -> &LogHandle {
        &self.logger
    }

    /// Configuration in effect.
    pub fn config(&self) -> &InterceptorConfig {
        &self.config
    }

    /// Runs `call` on the current thread and returns its value unchanged.
    ///
    /// With debug output enabled the call is timed, and a successful call
    /// exceeding the threshold produces one `<signature>, running time: <ms> ms`
    /// line. A failing call never produces that line.
    ///
    /// # Errors
    /// Returns an [`InterceptionError`] carrying the original error, or a
    /// [`CallPanicked`] cause, whenever `call` fails or panics.
    pub fn intercept<T, E, F>(&self, call: &CallDescriptor, proceed: F) -> Result<T, InterceptionError>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Cause>,
    {
        if !self.logger.is_verbose() {
            return run_guarded(proceed).map_err(|cause| InterceptionError::new(call, cause));
        }

        // The guard stops the clock on every exit path; only the success path
        // takes the clock back to check the threshold.
        let clock = scopeguard::guard(
            StopWatch::start(
                format!("Profiling for '{}'", call.receiver_type()),
                call.declared_signature(),
            ),
            |mut clock| {
                let elapsed = clock.stop();
                log::trace!(
                    "{}: '{}' failed after {} ms",
                    clock.label(),
                    clock.task(),
                    elapsed.as_millis()
                );
            },
        );

        match run_guarded(proceed) {
            Ok(value) => {
                let mut clock = ScopeGuard::into_inner(clock);
                let elapsed = clock.stop();
                if elapsed > self.config.threshold {
                    let line = format!(
                        "{}, running time: {} ms",
                        self.formatter.format(call),
                        elapsed.as_millis()
                    );
                    self.logger.emit(self.config.slow_call_level, &line);
                }
                Ok(value)
            }
            Err(cause) => Err(InterceptionError::new(call, cause)),
        }
    }
}
