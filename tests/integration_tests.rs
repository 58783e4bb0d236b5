//! Integration tests for the configured router
//!
//! These tests verify:
//! - Log injection prevention
//! - Exact-level routing to per-level files
//! - Isolation of a file output that cannot be opened
//! - Console-before-file ordering and fail-fast dispatch
//! - Derived loggers writing through shared sinks
//! - Rotation of a file sink driven through the logger

use leveled_logger::setup::build_router_with_console;
use leveled_logger::{
    attrs, load_config_file, Config, Handler, Level, Logger, RotatingWriter, RotationPolicy,
    TextHandler,
};
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("console output is UTF-8")
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Broken;

impl Write for Broken {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "console closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Lines of `path` with the leading time column removed
fn lines_without_time(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|line| line.split_once(' ').map(|(_, rest)| rest).unwrap_or(line).to_string())
        .collect()
}

fn file_config(dir: &TempDir) -> Config {
    let mut cfg = Config::default();
    cfg.level = "debug".to_string();
    cfg.console.enabled = false;
    for (name, output) in [
        ("debug", &mut cfg.file.debug),
        ("info", &mut cfg.file.info),
        ("warn", &mut cfg.file.warn),
        ("error", &mut cfg.file.error),
    ] {
        output.enabled = true;
        output.path = dir.path().join(format!("{}.log", name)).display().to_string();
    }
    cfg
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut cfg = file_config(&temp_dir);
    cfg.file.debug.enabled = false;
    cfg.file.warn.enabled = false;
    cfg.file.error.enabled = false;

    let logger = Logger::new(Arc::new(build_router_with_console(&cfg, Buffer::default())));
    let malicious_message = "User login\nERR Fake error injected\nINF Continuation";
    logger.info(malicious_message, attrs![]);
    logger.handler().flush().expect("flush");

    let content = fs::read_to_string(temp_dir.path().join("info.log")).expect("read info.log");
    assert!(content.contains("\\n"));
    assert!(!content.contains("\nERR Fake error injected\n"));
    assert_eq!(content.lines().count(), 1, "Log should be a single line");
}

#[test]
fn test_each_level_reaches_only_its_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let cfg = file_config(&temp_dir);
    let logger = Logger::new(Arc::new(build_router_with_console(&cfg, Buffer::default())));

    logger.debug("query", attrs![rows = 3]);
    logger.info("started", attrs![port = 8080]);
    logger.warn("disk low", attrs![free_mb = 12_u64]);
    logger.error("boom", attrs![]);

    let dir = temp_dir.path();
    assert_eq!(lines_without_time(&dir.join("debug.log")), vec!["DBG query rows=3"]);
    assert_eq!(lines_without_time(&dir.join("info.log")), vec!["INF started port=8080"]);
    assert_eq!(lines_without_time(&dir.join("warn.log")), vec!["WRN disk low free_mb=12"]);
    assert_eq!(lines_without_time(&dir.join("error.log")), vec!["ERR boom"]);
}

#[test]
fn test_global_level_filters_before_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut cfg = file_config(&temp_dir);
    cfg.level = "warn".to_string();
    let logger = Logger::new(Arc::new(build_router_with_console(&cfg, Buffer::default())));

    assert!(!logger.enabled(Level::INFO));
    logger.debug("hidden", attrs![]);
    logger.info("hidden", attrs![]);
    logger.warn("shown", attrs![]);

    let dir = temp_dir.path();
    assert!(lines_without_time(&dir.join("debug.log")).is_empty());
    assert!(lines_without_time(&dir.join("info.log")).is_empty());
    assert_eq!(lines_without_time(&dir.join("warn.log")), vec!["WRN shown"]);
}

#[test]
fn test_unopenable_error_output_leaves_others_working() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "regular file").expect("write blocker");

    let mut cfg = file_config(&temp_dir);
    cfg.console.enabled = true;
    cfg.file.error.path = blocker.join("nested").join("error.log").display().to_string();

    let console = Buffer::default();
    let router = build_router_with_console(&cfg, console.clone());
    assert_eq!(router.sinks(Level::ERROR).len(), 1, "console only");

    let logger = Logger::new(Arc::new(router));
    logger.info("still here", attrs![]);
    logger.warn("also here", attrs![]);
    logger.error("console only", attrs![]);

    let dir = temp_dir.path();
    assert_eq!(lines_without_time(&dir.join("info.log")), vec!["INF still here"]);
    assert_eq!(lines_without_time(&dir.join("warn.log")), vec!["WRN also here"]);
    assert_eq!(console.text().lines().count(), 3);
    assert!(console.text().contains("ERR console only"));
}

#[test]
fn test_console_precedes_file_and_fails_fast() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut cfg = file_config(&temp_dir);
    cfg.console.enabled = true;

    let logger = Logger::new(Arc::new(build_router_with_console(&cfg, Broken)));
    let result = logger.try_log(Level::ERROR, "lost", attrs![]);

    assert!(result.is_err());
    assert!(
        lines_without_time(&temp_dir.path().join("error.log")).is_empty(),
        "file sink registered after the failing console must not run"
    );
}

#[test]
fn test_derived_logger_through_router() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let cfg = file_config(&temp_dir);
    let root = Logger::new(Arc::new(build_router_with_console(&cfg, Buffer::default())));

    let requests = root.with(attrs![service = "api"]).with_group("http");
    requests.info("accepted", attrs![status = 200]);
    root.info("plain", attrs![]);

    assert_eq!(
        lines_without_time(&temp_dir.path().join("info.log")),
        vec![
            "INF [http] accepted service=\"api\" status=200",
            "INF plain"
        ]
    );
}

#[test]
fn test_source_column_names_call_site() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut cfg = file_config(&temp_dir);
    cfg.add_source = true;
    let logger = Logger::new(Arc::new(build_router_with_console(&cfg, Buffer::default())));

    let line = line!() + 1;
    logger.warn("located", attrs![]);

    let lines = lines_without_time(&temp_dir.path().join("warn.log"));
    assert_eq!(lines, vec![format!("WRN integration_tests.rs:{} located", line)]);
}

#[test]
fn test_config_file_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let error_log = temp_dir.path().join("logs").join("error.log");
    let config_path = temp_dir.path().join("app.json");
    let document = serde_json::json!({
        "app": {
            "logger": {
                "level": "warn",
                "console": { "enabled": false },
                "file": {
                    "error": { "enabled": true, "path": error_log.display().to_string() }
                }
            }
        }
    });
    fs::write(&config_path, document.to_string()).expect("write config");

    let cfg = load_config_file(&config_path, "app.logger").expect("load config");
    let logger = Logger::new(Arc::new(build_router_with_console(&cfg, Buffer::default())));
    logger.error("written", attrs![code = 500]);

    assert_eq!(lines_without_time(&error_log), vec!["ERR written code=500"]);
}

#[test]
fn test_rotation_through_logger() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("app.log");
    let policy = RotationPolicy::new().with_max_backups(2);
    let writer = RotatingWriter::open(&path, policy)
        .expect("open writer")
        .with_max_bytes(120);
    let logger = Logger::new(Arc::new(TextHandler::new(writer, Level::DEBUG)));

    for i in 0..20 {
        logger.info("rotating", attrs![seq = i]);
    }

    let mut names: Vec<String> = fs::read_dir(temp_dir.path())
        .expect("list dir")
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    assert!(names.contains(&"app.log".to_string()));
    let backups = names.iter().filter(|n| n.starts_with("app-")).count();
    assert_eq!(backups, 2, "only the newest backups survive: {:?}", names);
    assert!(fs::metadata(&path).expect("active file").len() <= 120);

    let last = lines_without_time(&path);
    assert_eq!(last.last().map(String::as_str), Some("INF rotating seq=19"));
}
