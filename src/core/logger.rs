//! Logger front end over a handler
//!
//! A `Logger` is a cheap clonable wrapper around an `Arc<dyn Handler>`.
//! `with` and `with_group` derive new loggers; the parent keeps working
//! unchanged and can be shared by any number of children across threads.

use super::{
    error::Result,
    handler::Handler,
    level::Level,
    record::{Record, Source},
    value::Attr,
};
use std::panic::Location;
use std::sync::Arc;

#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    #[must_use]
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Logger whose records also carry `attrs`
    ///
    /// # Example
    ///
    /// ```
    /// use leveled_logger::{attrs, console, Level, Logger};
    /// use std::sync::Arc;
    ///
    /// let root = Logger::new(Arc::new(console::stderr(Level::INFO)));
    /// let requests = root.with(attrs![service = "api"]).with_group("http");
    /// requests.info("accepted", attrs![port = 8080]);
    /// ```
    #[must_use]
    pub fn with<I>(&self, attrs: I) -> Logger
    where
        I: IntoIterator<Item = Attr>,
    {
        let attrs: Vec<Attr> = attrs.into_iter().collect();
        if attrs.is_empty() {
            return self.clone();
        }
        Logger::new(self.handler.with_attrs(&attrs))
    }

    /// Logger whose records are labelled with `name` after any existing group
    #[must_use]
    pub fn with_group(&self, name: &str) -> Logger {
        if name.is_empty() {
            return self.clone();
        }
        Logger::new(self.handler.with_group(name))
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// Emit a record, discarding any sink error
    #[track_caller]
    pub fn log<I>(&self, level: Level, message: &str, attrs: I)
    where
        I: IntoIterator<Item = Attr>,
    {
        let _ = self.emit(level, message, attrs, Location::caller());
    }

    /// Emit a record and return the first sink error
    #[track_caller]
    pub fn try_log<I>(&self, level: Level, message: &str, attrs: I) -> Result<()>
    where
        I: IntoIterator<Item = Attr>,
    {
        self.emit(level, message, attrs, Location::caller())
    }

    #[inline]
    #[track_caller]
    pub fn debug<I: IntoIterator<Item = Attr>>(&self, message: &str, attrs: I) {
        self.log(Level::DEBUG, message, attrs);
    }

    #[inline]
    #[track_caller]
    pub fn info<I: IntoIterator<Item = Attr>>(&self, message: &str, attrs: I) {
        self.log(Level::INFO, message, attrs);
    }

    #[inline]
    #[track_caller]
    pub fn warn<I: IntoIterator<Item = Attr>>(&self, message: &str, attrs: I) {
        self.log(Level::WARN, message, attrs);
    }

    #[inline]
    #[track_caller]
    pub fn error<I: IntoIterator<Item = Attr>>(&self, message: &str, attrs: I) {
        self.log(Level::ERROR, message, attrs);
    }

    /// Build and dispatch a record attributed to `location`.
    ///
    /// Nothing is allocated when the handler rejects `level`.
    pub(crate) fn emit<I>(
        &self,
        level: Level,
        message: &str,
        attrs: I,
        location: &'static Location<'static>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = Attr>,
    {
        if !self.handler.enabled(level) {
            return Ok(());
        }

        let record = Record::new(level, message)
            .with_source(Source::from(location))
            .with_attrs(attrs);
        self.handler.handle(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use parking_lot::Mutex;

    #[derive(Clone)]
    struct Capture {
        min: Level,
        fail: bool,
        bound: Vec<Attr>,
        group: String,
        records: Arc<Mutex<Vec<(Record, Vec<Attr>, String)>>>,
    }

    impl Capture {
        fn new(min: Level) -> Self {
            Self {
                min,
                fail: false,
                bound: Vec::new(),
                group: String::new(),
                records: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl Handler for Capture {
        fn enabled(&self, level: Level) -> bool {
            level >= self.min
        }

        fn handle(&self, record: &Record) -> Result<()> {
            if self.fail {
                return Err(LoggerError::from(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "capture refused",
                )));
            }
            self.records
                .lock()
                .push((record.clone(), self.bound.clone(), self.group.clone()));
            Ok(())
        }

        fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
            let mut next = self.clone();
            next.bound.extend_from_slice(attrs);
            Arc::new(next)
        }

        fn with_group(&self, name: &str) -> Arc<dyn Handler> {
            let mut next = self.clone();
            next.group = name.to_string();
            Arc::new(next)
        }
    }

    #[test]
    fn test_disabled_level_is_skipped() {
        let capture = Capture::new(Level::WARN);
        let logger = Logger::new(Arc::new(capture.clone()));
        logger.info("quiet", vec![Attr::new("k", 1)]);
        assert!(capture.records.lock().is_empty());
    }

    #[test]
    fn test_record_carries_call_site() {
        let capture = Capture::new(Level::DEBUG);
        let logger = Logger::new(Arc::new(capture.clone()));
        let line = line!() + 1;
        logger.warn("here", vec![Attr::new("k", 1)]);

        let records = capture.records.lock();
        let (record, _, _) = &records[0];
        let source = record.source.as_ref().unwrap();
        assert!(source.file.ends_with("logger.rs"));
        assert_eq!(source.line, line);
        assert_eq!(record.level, Level::WARN);
        assert_eq!(record.attrs().len(), 1);
    }

    #[test]
    fn test_derived_loggers_are_independent() {
        let capture = Capture::new(Level::DEBUG);
        let root = Logger::new(Arc::new(capture.clone()));
        let a = root.with(vec![Attr::new("a", 1)]);
        let b = root.with(vec![Attr::new("b", 2)]).with_group("jobs");

        a.info("from a", Vec::new());
        b.info("from b", Vec::new());
        root.info("from root", Vec::new());

        let records = capture.records.lock();
        let keys = |i: usize| -> Vec<String> {
            records[i].1.iter().map(|a| a.key.clone()).collect()
        };
        assert_eq!(keys(0), vec!["a"]);
        assert_eq!(keys(1), vec!["b"]);
        assert_eq!(records[1].2, "jobs");
        assert!(keys(2).is_empty());
        assert_eq!(records[2].2, "");
    }

    #[test]
    fn test_try_log_reports_failure() {
        let mut capture = Capture::new(Level::DEBUG);
        capture.fail = true;
        let logger = Logger::new(Arc::new(capture));
        assert!(logger.try_log(Level::ERROR, "lost", Vec::new()).is_err());
        // fire-and-forget form swallows it
        logger.error("lost again", Vec::new());
    }
}
