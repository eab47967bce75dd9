// src/core/sink.rs

//! The logging handle every hook writes through.

use crate::constants::DEFAULT_LOG_TARGET;
use log::{Level, Log, Metadata, Record};
use std::fmt;
use std::sync::Arc;

/// Forwards to whichever logger the process installed through the `log` facade.
#[derive(Debug)]
struct GlobalLogger;

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level() && log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        log::logger().log(record);
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

/// An explicit logging sink plus the target its records are written under.
///
/// Loggers and interceptors hold one of these from construction on; nothing
/// in this crate reaches for a process-wide registry on its own.
#[derive(Clone)]
pub struct LogHandle {
    sink: Arc<dyn Log>,
    target: String,
}

impl fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHandle")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Default for LogHandle {
    fn default() -> Self {
        Self::global(DEFAULT_LOG_TARGET)
    }
}

impl LogHandle {
    /// A handle writing through the global `log` facade.
    pub fn global(target: impl Into<String>) -> Self {
        Self::new(Arc::new(GlobalLogger), target)
    }

    /// A handle writing to `sink` under `target`.
    pub fn new(sink: Arc<dyn Log>, target: impl Into<String>) -> Self {
        Self {
            sink,
            target: target.into(),
        }
    }

    /// Target every record is written under.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether the sink accepts records at `level` for this target.
    pub fn is_enabled(&self, level: Level) -> bool {
        self.sink
            .enabled(&Metadata::builder().level(level).target(&self.target).build())
    }

    /// Whether debug output is wanted; gates every formatting cost.
    pub fn is_verbose(&self) -> bool {
        self.is_enabled(Level::Debug)
    }

    /// Writes one line at `level`. Lines for disabled levels are dropped.
    pub fn emit(&self, level: Level, message: &str) {
        if !self.is_enabled(level) {
            return;
        }
        self.sink.log(
            &Record::builder()
                .args(format_args!("{}", message))
                .level(level)
                .target(&self.target)
                .module_path_static(Some(module_path!()))
                .file_static(Some(file!()))
                .line(Some(line!()))
                .build(),
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod testing {
    use log::{Level, Log, Metadata, Record};
    use std::sync::Mutex;

    /// Records every line it receives, for assertions in tests.
    #[derive(Debug)]
    pub(crate) struct CaptureLogger {
        level: Level,
        lines: Mutex<Vec<(Level, String)>>,
    }

    impl CaptureLogger {
        pub(crate) fn new(level: Level) -> Self {
            Self {
                level,
                lines: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn lines(&self) -> Vec<(Level, String)> {
            self.lines.lock().unwrap().clone()
        }

        pub(crate) fn messages(&self) -> Vec<String> {
            self.lines().into_iter().map(|(_, line)| line).collect()
        }
    }

    impl Log for CaptureLogger {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.level() <= self.level
        }

        fn log(&self, record: &Record<'_>) {
            if self.enabled(record.metadata()) {
                self.lines
                    .lock()
                    .unwrap()
                    .push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }
}
