//! Console sinks

use super::text::TextHandler;
use crate::core::Level;

/// Sink writing to standard error
///
/// # Example
///
/// ```
/// use leveled_logger::{console, Handler, Level};
///
/// let sink = console::stderr(Level::DEBUG).with_source(true);
/// assert!(sink.enabled(Level::DEBUG));
/// ```
pub fn stderr(level: Level) -> TextHandler {
    TextHandler::new(std::io::stderr(), level)
}

/// Sink writing to standard output
pub fn stdout(level: Level) -> TextHandler {
    TextHandler::new(std::io::stdout(), level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Handler;

    #[test]
    fn test_console_level_is_independent() {
        let sink = stderr(Level::WARN);
        assert_eq!(sink.level(), Level::WARN);
        assert!(!sink.enabled(Level::INFO));
        assert!(stdout(Level::DEBUG).enabled(Level::DEBUG));
    }
}
