// src/constants.rs

//! Fixed defaults of the formatter and interceptor.

use std::time::Duration;

/// Calls running longer than this are reported with their running time.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum number of elements rendered per array, collection, iterator or map.
pub const MAX_MULTIPLES_LOG: usize = 10;

/// Appended in place of the trailing separator when a container is truncated.
pub const ELLIPSIS: char = '…';

/// Separator between arguments and between container elements.
pub const SEPARATOR: &str = ", ";

/// Rendering of an absent value.
pub const NULL_LITERAL: &str = "null";

/// Pattern for instants carrying a time-of-day component.
pub const DATE_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.3f";

/// Pattern for instants sitting exactly at midnight.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Upper bound on elements captured from an array, collection, map or
/// cursor-style iterator. Anything past it only sets the `has_more` flag.
pub const CURSOR_SNAPSHOT_LIMIT: usize = 256;

/// Log target used when none is configured.
pub const DEFAULT_LOG_TARGET: &str = "callprobe";
