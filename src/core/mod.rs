//! Core logging types and traits

pub mod config;
pub mod error;
pub mod format;
pub mod handler;
pub mod level;
pub mod logger;
pub mod record;
pub mod rotation;
pub mod router;
pub mod timestamp;
pub mod value;

pub use config::{
    load_config, load_config_file, Config, ConsoleConfig, FileConfig, FileOutputConfig,
};
pub use error::{LoggerError, Result};
pub use format::LineFormatter;
pub use handler::Handler;
pub use level::Level;
pub use logger::Logger;
pub use record::{Record, Source};
pub use rotation::{resolve, RotationPolicy};
pub use router::{DispatchPolicy, LevelRouter, LevelRouterBuilder};
pub use timestamp::TimestampFormat;
pub use value::{Attr, Value};
