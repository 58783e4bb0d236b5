//! Process-wide logger
//!
//! Until [`initialize`] runs, every entry point writes through a bootstrap
//! handler: a plain stderr sink at `INFO`. Initialization installs the
//! configured router exactly once; later calls are no-ops. Installation is
//! published atomically, so an emitting thread sees either the bootstrap
//! handler or the complete router, never a partial one.
//!
//! # Example
//!
//! ```no_run
//! use leveled_logger::{facade, info, Config};
//!
//! let cfg = Config::from_json_str(r#"{"level": "debug"}"#)?;
//! facade::initialize(&cfg);
//! info!("ready", workers = 4);
//! # Ok::<(), leveled_logger::LoggerError>(())
//! ```

use crate::core::{load_config, Attr, Config, Handler, Level, Logger, Result};
use crate::sinks::console;
use crate::{attrs, setup};
use parking_lot::{Mutex, RwLock};
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

struct GlobalState {
    initialized: AtomicBool,
    /// Serializes initializers; emitters never take it
    init_lock: Mutex<()>,
    handler: RwLock<Option<Arc<dyn Handler>>>,
}

static STATE: GlobalState = GlobalState {
    initialized: AtomicBool::new(false),
    init_lock: parking_lot::const_mutex(()),
    handler: parking_lot::const_rwlock(None),
};

static BOOTSTRAP: OnceLock<Arc<dyn Handler>> = OnceLock::new();

fn bootstrap() -> Arc<dyn Handler> {
    Arc::clone(BOOTSTRAP.get_or_init(|| Arc::new(console::stderr(Level::INFO))))
}

fn current() -> Arc<dyn Handler> {
    if STATE.initialized.load(Ordering::Acquire) {
        if let Some(handler) = STATE.handler.read().as_ref() {
            return Arc::clone(handler);
        }
    }
    bootstrap()
}

/// Install `handler` unless one is installed already; true when installed
fn install_once<F>(build: F) -> bool
where
    F: FnOnce() -> Arc<dyn Handler>,
{
    let _guard = STATE.init_lock.lock();
    if STATE.initialized.load(Ordering::Acquire) {
        return false;
    }

    let handler = build();
    *STATE.handler.write() = Some(handler);
    STATE.initialized.store(true, Ordering::Release);
    true
}

/// Build the router described by `cfg` and install it as the process-wide
/// handler. Only the first call has any effect.
pub fn initialize(cfg: &Config) {
    let installed = install_once(|| Arc::new(setup::build_router(cfg)));
    if installed {
        info(
            "Logger initialized successfully",
            attrs![level = cfg.global_level().to_string()],
        );
    }
}

/// Install a caller-built handler; only the first initialization of any
/// kind has an effect
pub fn initialize_with(handler: Arc<dyn Handler>) -> bool {
    install_once(|| handler)
}

/// Look up `key` in `tree`, decode it and [`initialize`]
///
/// # Errors
///
/// Returns the lookup or decode error; nothing is installed in that case.
pub fn try_initialize_from(tree: &serde_json::Value, key: &str) -> Result<()> {
    let cfg = load_config(tree, key)?;
    initialize(&cfg);
    Ok(())
}

/// Like [`try_initialize_from`], but a configuration error is logged and
/// the process exits with status 1
pub fn initialize_from(tree: &serde_json::Value, key: &str) {
    if let Err(e) = try_initialize_from(tree, key) {
        error(
            "Failed to load logger configuration",
            attrs![key = key, error = e.to_string()],
        );
        let _ = flush();
        std::process::exit(1);
    }
}

pub fn is_initialized() -> bool {
    STATE.initialized.load(Ordering::Acquire)
}

/// Logger over the current process-wide handler
///
/// The returned logger keeps the handler it was created with; it does not
/// follow a later initialization.
pub fn logger() -> Logger {
    Logger::new(current())
}

pub fn enabled(level: Level) -> bool {
    current().enabled(level)
}

/// Flush every sink of the current handler
pub fn flush() -> Result<()> {
    current().flush()
}

/// Drop the installed handler and return to the bootstrap state
#[doc(hidden)]
pub fn reset() {
    let _guard = STATE.init_lock.lock();
    STATE.initialized.store(false, Ordering::Release);
    *STATE.handler.write() = None;
}

#[track_caller]
pub fn log<I>(level: Level, message: &str, attrs: I)
where
    I: IntoIterator<Item = Attr>,
{
    let _ = Logger::new(current()).emit(level, message, attrs, Location::caller());
}

#[inline]
#[track_caller]
pub fn debug<I: IntoIterator<Item = Attr>>(message: &str, attrs: I) {
    log(Level::DEBUG, message, attrs);
}

#[inline]
#[track_caller]
pub fn info<I: IntoIterator<Item = Attr>>(message: &str, attrs: I) {
    log(Level::INFO, message, attrs);
}

#[inline]
#[track_caller]
pub fn warn<I: IntoIterator<Item = Attr>>(message: &str, attrs: I) {
    log(Level::WARN, message, attrs);
}

#[inline]
#[track_caller]
pub fn error<I: IntoIterator<Item = Attr>>(message: &str, attrs: I) {
    log(Level::ERROR, message, attrs);
}
