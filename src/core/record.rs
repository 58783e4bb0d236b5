//! Log record structure

use super::level::Level;
use super::value::Attr;
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::panic::Location;

/// Call site that emitted a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub file: Cow<'static, str>,
    pub line: u32,
}

impl Source {
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl From<&'static Location<'static>> for Source {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: Cow::Borrowed(location.file()),
            line: location.line(),
        }
    }
}

/// One log event
///
/// Built once per emit call and handed to the handler chain by reference.
#[derive(Debug, Clone)]
pub struct Record {
    /// `None` stands for the zero timestamp and suppresses the time column
    pub timestamp: Option<DateTime<Local>>,
    pub level: Level,
    pub message: String,
    pub source: Option<Source>,
    attrs: Vec<Attr>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: Some(Local::now()),
            level,
            message: message.into(),
            source: None,
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: Option<DateTime<Local>>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Append attributes, dropping empty groups
    #[must_use]
    pub fn with_attrs<I>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = Attr>,
    {
        self.attrs
            .extend(attrs.into_iter().filter(|a| !a.value.is_empty_group()));
        self
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }
}
