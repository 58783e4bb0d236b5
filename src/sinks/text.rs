//! Plain-text sink over any byte stream
//!
//! Console and file sinks are both a [`TextHandler`]; they differ only in
//! the stream they write to. Each record is written with a single
//! `write_all` while the stream's lock is held, so lines from concurrent
//! threads never interleave. Handlers derived with `with_attrs` or
//! `with_group` share the parent's stream and therefore its lock.

use crate::core::{
    Attr, Handler, Level, LineFormatter, LoggerError, Record, Result, TimestampFormat,
};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

#[derive(Clone)]
pub struct TextHandler {
    level: Level,
    formatter: LineFormatter,
    writer: SharedWriter,
    prefix: String,
    attrs: Vec<Attr>,
}

impl TextHandler {
    /// Wrap `writer`; records below `level` are not handled
    pub fn new<W>(writer: W, level: Level) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            level,
            formatter: LineFormatter::new(),
            writer: Arc::new(Mutex::new(Box::new(writer))),
            prefix: String::new(),
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: LineFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Render the `file:line` column
    #[must_use]
    pub fn with_source(mut self, add_source: bool) -> Self {
        self.formatter.add_source = add_source;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.formatter.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.formatter.colors = colors;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Dot-joined group label
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn bound_attrs(&self) -> &[Attr] {
        &self.attrs
    }
}

impl Handler for TextHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let line = self.formatter.format(record, &self.prefix, &self.attrs);

        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::io_operation("writing log record", "sink stream rejected the line", e)
        })
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        let mut next = self.clone();
        next.attrs.extend_from_slice(attrs);
        Arc::new(next)
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let mut next = self.clone();
        if !name.is_empty() {
            if !next.prefix.is_empty() {
                next.prefix.push('.');
            }
            next.prefix.push_str(name);
        }
        Arc::new(next)
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }
}
