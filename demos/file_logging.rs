//! File logging example
//!
//! Demonstrates per-level files with rotation settings loaded from a
//! configuration tree.
//!
//! Run with: cargo run --example file_logging

use leveled_logger::prelude::*;
use serde_json::json;
use std::fs;

fn main() -> Result<()> {
    println!("=== Leveled Logger - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("leveled_logger_demo");
    let path = |name: &str| dir.join(name).display().to_string();

    let tree = json!({
        "app": {
            "logger": {
                "level": "debug",
                "console": { "enabled": true, "level": "warn" },
                "file": {
                    "defaultRotation": { "maxSizeMB": 10, "maxBackups": 5, "maxAgeDays": 14 },
                    "debug": { "enabled": true, "path": path("debug.log") },
                    "info":  { "enabled": true, "path": path("info.log"), "maxBackups": 10 },
                    "warn":  { "enabled": true, "path": path("warn.log") },
                    "error": { "enabled": true, "path": path("error.log"), "compress": true }
                }
            }
        }
    });

    facade::initialize_from(&tree, "app.logger");

    let worker = facade::logger().with_group("worker").with(attrs![id = 7]);
    for job in 0..5 {
        worker.debug("Picked job", attrs![job = job]);
        worker.info("Finished job", attrs![job = job, ok = job != 3]);
        if job == 3 {
            worker.warn("Job needed a retry", attrs![job = job]);
        }
    }
    error!("Upstream unavailable", host = "db.internal", port = 5432);
    facade::flush()?;

    println!("\nLog files in {}:", dir.display());
    for name in ["debug.log", "info.log", "warn.log", "error.log"] {
        let content = fs::read_to_string(dir.join(name))?;
        println!("--- {} ({} lines)", name, content.lines().count());
        print!("{}", content);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
