//! # Leveled Logger
//!
//! A structured logging facade that routes each record to the sinks
//! registered for its exact level.
//!
//! ## Features
//!
//! - **Structured records**: typed key/value attributes and nested groups
//! - **Per-level routing**: console and file sinks registered per level
//! - **Rotating files**: size-based rotation with backup count, age limit
//!   and gzip compression
//! - **Derived loggers**: `with` and `with_group` share sinks and never
//!   affect their parent
//! - **One-time setup**: a process-wide logger with a stderr fallback until
//!   it is initialized
//!
//! ## Quick Start
//!
//! ```no_run
//! use leveled_logger::{facade, info, warn, Config};
//!
//! let cfg = Config::from_json_str(
//!     r#"{
//!         "level": "debug",
//!         "file": { "error": { "enabled": true, "path": "logs/error.log" } }
//!     }"#,
//! )?;
//! facade::initialize(&cfg);
//!
//! info!("Server started", port = 8080);
//! warn!("Cache miss", key = "user:42");
//! # Ok::<(), leveled_logger::LoggerError>(())
//! ```

pub mod core;
pub mod facade;
pub mod macros;
pub mod setup;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Attr, Config, Handler, Level, LevelRouter, Logger, LoggerError, Record, Result,
        RotationPolicy, Value,
    };
    pub use crate::facade;
    pub use crate::sinks::{console, TextHandler};
    pub use crate::{attrs, debug, error, info, log, warn};
}

pub use core::{
    load_config, load_config_file, resolve, Attr, Config, ConsoleConfig, DispatchPolicy,
    FileConfig, FileOutputConfig, Handler, Level, LevelRouter, LevelRouterBuilder, LineFormatter,
    Logger, LoggerError, Record, Result, RotationPolicy, Source, TimestampFormat, Value,
};
pub use facade::{initialize, initialize_from, is_initialized, try_initialize_from};
pub use sinks::{console, open_file_sink, RotatingWriter, TextHandler};
