//! Router assembly from configuration
//!
//! Sinks are registered per level in a fixed order: the console first (for
//! every level at or above its own threshold), then that level's file
//! output. A file output that cannot be opened is reported through the
//! process-wide logger and left out; the remaining sinks are still built.

use crate::core::{Config, FileOutputConfig, Handler, Level, LevelRouter, Result};
use crate::sinks::{console, open_file_sink, TextHandler};
use crate::{attrs, facade};
use std::io::Write;
use std::sync::Arc;

/// Build the level router described by `cfg`, with the console on stderr
#[must_use]
pub fn build_router(cfg: &Config) -> LevelRouter {
    assemble(cfg, console_sink(cfg))
}

/// Build the level router described by `cfg`, writing console output to
/// `writer`
pub fn build_router_with_console<W>(cfg: &Config, writer: W) -> LevelRouter
where
    W: Write + Send + 'static,
{
    let sink = TextHandler::new(writer, cfg.console.level());
    assemble(cfg, styled(sink, cfg))
}

/// Standard-error console sink configured from `cfg`
#[must_use]
pub fn console_sink(cfg: &Config) -> TextHandler {
    styled(console::stderr(cfg.console.level()), cfg)
}

fn styled(sink: TextHandler, cfg: &Config) -> TextHandler {
    sink.with_source(cfg.add_source).with_colors(cfg.console.colors)
}

fn assemble(cfg: &Config, console: TextHandler) -> LevelRouter {
    let mut builder = LevelRouter::builder(cfg.global_level());

    if cfg.console.enabled {
        builder = builder.route_from(console.level(), Arc::new(console));
    }

    for (level, output) in cfg.file_outputs() {
        if !output.enabled {
            continue;
        }
        if let Some(sink) = file_sink(cfg, level, output) {
            builder = builder.route(level, sink);
        }
    }

    builder.build()
}

fn file_sink(cfg: &Config, level: Level, output: &FileOutputConfig) -> Option<Arc<dyn Handler>> {
    if output.path.is_empty() {
        facade::warn(
            "Log file path is not configured, skipping",
            attrs![level = level.to_string()],
        );
        return None;
    }

    match open_output(cfg, output) {
        Ok(sink) => Some(Arc::new(sink)),
        Err(e) => {
            facade::warn(
                "Failed to create file sink, skipping",
                attrs![
                    level = level.to_string(),
                    path = output.path.as_str(),
                    error = e.to_string(),
                ],
            );
            None
        }
    }
}

fn open_output(cfg: &Config, output: &FileOutputConfig) -> Result<TextHandler> {
    let policy = output.rotation_policy(&cfg.file.default_rotation);
    // file sinks accept everything the router lets through
    let sink = open_file_sink(&output.path, policy, cfg.global_level())?;
    Ok(sink.with_source(cfg.add_source))
}
