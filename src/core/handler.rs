//! Handler trait for record destinations
//!
//! Concrete sinks and the level router implement the same four operations,
//! so a router can be used anywhere a single sink is expected.

use super::{error::Result, level::Level, record::Record, value::Attr};
use std::sync::Arc;

pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be handled
    fn enabled(&self, level: Level) -> bool;

    /// Render and write one record
    fn handle(&self, record: &Record) -> Result<()>;

    /// A new handler that also renders `attrs` on every record.
    /// The receiver is left untouched.
    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler>;

    /// A new handler whose group prefix is extended by `name`.
    /// The receiver is left untouched.
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
