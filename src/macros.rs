//! Logging macros over the process-wide logger
//!
//! Attributes are written as `key = value` pairs after the message. The
//! pairs are only evaluated when the level is enabled.
//!
//! # Examples
//!
//! ```
//! use leveled_logger::{info, warn};
//!
//! info!("Server started");
//!
//! let port = 8080;
//! info!("Server listening", port = port, tls = false);
//! warn!("Slow request", path = "/health", elapsed_ms = 1250_u64);
//! ```

/// Build a `Vec<Attr>` from `key = value` pairs
///
/// ```
/// use leveled_logger::attrs;
///
/// let attrs = attrs![user = "alice", id = 42];
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs[0].key, "user");
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::vec::Vec::<$crate::Attr>::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Attr::new(::std::stringify!($key), $value)),+]
    };
}

/// Log at an explicit level through the process-wide logger
///
/// ```
/// use leveled_logger::{log, Level};
///
/// log!(Level::new(2), "between info and warn", attempt = 3);
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {{
        let level = $level;
        if $crate::facade::enabled(level) {
            $crate::facade::log(level, $msg, $crate::attrs![$($key = $value),*]);
        }
    }};
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::log!($crate::Level::DEBUG, $msg $(, $key = $value)*)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::log!($crate::Level::INFO, $msg $(, $key = $value)*)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::log!($crate::Level::WARN, $msg $(, $key = $value)*)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::log!($crate::Level::ERROR, $msg $(, $key = $value)*)
    };
}
