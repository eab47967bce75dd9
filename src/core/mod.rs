//! # Call Instrumentation Core
//!
//! Everything that runs at an intercepted call site. The interception itself
//! (deciding which calls are wrapped) belongs to the caller; these modules only
//! describe, format and time the calls they are handed.
//!
//! ## Modules
//!
//! - **`type_names`**: Reduces `std::any::type_name` output to simple names.
//! - **`loggable`**: Classifies Rust values into the renderable argument kinds.
//! - **`formatter`**: Renders a call descriptor as a bounded one-line signature.
//! - **`stopwatch`**: Monotonic timer used around timed calls.
//! - **`sink`**: Explicit logging handle over the `log` facade.
//! - **`call_logger`**: "Before" hook logging each call signature at debug level.
//! - **`interceptor`**: "Around" hook timing calls and wrapping their failures.
//! - **`config_loader`**: TOML configuration for the interceptor.

pub mod call_logger;
pub mod config_loader;
pub mod formatter;
pub mod interceptor;
pub mod loggable;
pub mod sink;
pub mod stopwatch;
pub mod type_names;
