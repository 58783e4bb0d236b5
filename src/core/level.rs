//! Log level definitions
//!
//! Levels are totally ordered integers. The four named levels are spaced so
//! that custom levels can sit between them; a custom level renders relative
//! to the nearest named level below it (`INFO+2`).

use super::error::LoggerError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(i8);

impl Level {
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    /// The four named levels in ascending order
    pub const ALL: [Level; 4] = [Level::DEBUG, Level::INFO, Level::WARN, Level::ERROR];

    #[must_use]
    pub const fn new(value: i8) -> Self {
        Level(value)
    }

    #[must_use]
    pub const fn value(self) -> i8 {
        self.0
    }

    /// Three-letter code used in plain-text lines, `None` for custom levels
    #[must_use]
    pub fn code(self) -> Option<&'static str> {
        match self {
            Level::DEBUG => Some("DBG"),
            Level::INFO => Some("INF"),
            Level::WARN => Some("WRN"),
            Level::ERROR => Some("ERR"),
            _ => None,
        }
    }

    pub fn color_code(self) -> colored::Color {
        use colored::Color::*;
        if self >= Level::ERROR {
            Red
        } else if self >= Level::WARN {
            Yellow
        } else if self >= Level::INFO {
            Green
        } else {
            Blue
        }
    }

    /// Parse a level name, falling back to `default` for anything unrecognized
    #[must_use]
    pub fn parse_or(name: &str, default: Level) -> Level {
        name.parse().unwrap_or(default)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (base, offset) = if *self < Level::INFO {
            ("DEBUG", self.0 as i16 - Level::DEBUG.0 as i16)
        } else if *self < Level::WARN {
            ("INFO", self.0 as i16 - Level::INFO.0 as i16)
        } else if *self < Level::ERROR {
            ("WARN", self.0 as i16 - Level::WARN.0 as i16)
        } else {
            ("ERROR", self.0 as i16 - Level::ERROR.0 as i16)
        };
        if offset == 0 {
            f.write_str(base)
        } else {
            write!(f, "{}{:+}", base, offset)
        }
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}
