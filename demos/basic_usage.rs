//! Basic logger usage example
//!
//! Demonstrates the bootstrap logger, console-only initialization, derived
//! loggers and structured attributes.
//!
//! Run with: cargo run --example basic_usage

use leveled_logger::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Leveled Logger - Basic Usage Example ===\n");

    println!("1. Before initialization (bootstrap stderr logger, INFO and above):");
    debug!("Debug message (hidden)");
    info!("Info message (visible)", phase = "bootstrap");

    println!("\n2. Console-only configuration at DEBUG:");
    let cfg = Config::from_json_str(
        r#"{
            "level": "debug",
            "addSource": true,
            "console": { "enabled": true, "level": "debug", "colors": true }
        }"#,
    )?;
    facade::initialize(&cfg);

    debug!("This is a debug message");
    info!("This is an info message", port = 8080);
    warn!("This is a warning message", retries = 3);
    error!("This is an error message", code = 500);

    println!("\n3. Derived loggers:");
    let requests = facade::logger()
        .with(attrs![service = "api"])
        .with_group("http");
    requests.info("Request handled", attrs![method = "GET", status = 200]);
    requests.warn(
        "Slow request",
        vec![
            Attr::new("elapsed", Duration::from_millis(1250)),
            Attr::group("client", attrs![ip = "10.0.0.7", agent = "curl/8.5"]),
        ],
    );

    println!("\n4. Messages stay on one line:");
    info!("first line\nsecond line");

    facade::flush()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
