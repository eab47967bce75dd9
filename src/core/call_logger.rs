// src/core/call_logger.rs

//! Debug-level logging of each call's signature.

use crate::core::formatter::SignatureFormatter;
use crate::core::sink::LogHandle;
use crate::models::CallDescriptor;
use log::Level;

/// "Before" hook: writes the signature of each call it is handed at debug level.
#[derive(Debug, Clone, Default)]
pub struct CallLogger {
    logger: LogHandle,
    formatter: SignatureFormatter,
}

impl CallLogger {
    /// Logger writing through `logger`, rendering with `formatter`.
    pub fn new(logger: LogHandle, formatter: SignatureFormatter) -> Self {
        Self { logger, formatter }
    }

    /// The handle lines are written to.
    pub fn logger(&self) -> &LogHandle {
        &self.logger
    }

    /// Emits exactly one line, the bare signature. Does nothing, not even
    /// formatting, when debug output is disabled.
    pub fn log_call(&self, call: &CallDescriptor) {
        if self.logger.is_verbose() {
            self.logger.emit(Level::Debug, &self.formatter.format(call));
        }
    }
}
