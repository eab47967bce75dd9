//! Call-signature formatting and slow-call profiling for intercepted calls.
//!
//! ```
//! use callprobe::{call, SignatureFormatter};
//!
//! struct Inventory;
//! let signature = SignatureFormatter::default().format(&call!(Inventory, "reserve", "sku-1", 3));
//! assert_eq!(signature, "Inventory.reserve(\"sku-1\", 3)");
//! ```

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;

pub use crate::core::call_logger::CallLogger;
pub use crate::core::config_loader::{ConfigError, InterceptorConfig, load_config};
pub use crate::core::formatter::{SignatureFormatter, format_signature};
pub use crate::core::interceptor::{CallPanicked, InterceptionError, TimingInterceptor};
pub use crate::core::loggable::Loggable;
pub use crate::core::sink::LogHandle;
pub use crate::core::stopwatch::StopWatch;
pub use crate::models::{ArgValue, CallDescriptor};
