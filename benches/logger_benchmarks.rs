//! Criterion benchmarks for leveled_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use leveled_logger::prelude::*;
use leveled_logger::LineFormatter;
use std::io;
use std::sync::Arc;
use std::thread;

fn sink_router(threshold: Level) -> LevelRouter {
    LevelRouter::builder(threshold)
        .route_from(Level::DEBUG, Arc::new(TextHandler::new(io::sink(), Level::DEBUG)))
        .build()
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    let formatter = LineFormatter::new();
    let plain = Record::new(Level::INFO, "Request handled");
    let structured = Record::new(Level::INFO, "Request handled").with_attrs(attrs![
        method = "GET",
        path = "/api/users",
        status = 200,
        elapsed_ms = 12.5,
    ]);
    let nested = Record::new(Level::WARN, "Slow query").with_attrs(vec![Attr::group(
        "db",
        attrs![table = "users", rows = 1500_u64, cached = false],
    )]);
    let bound = attrs![service = "api", region = "eu-west-1"];

    group.bench_function("plain", |b| {
        b.iter(|| black_box(formatter.format(black_box(&plain), "", &[])));
    });

    group.bench_function("structured", |b| {
        b.iter(|| black_box(formatter.format(black_box(&structured), "", &[])));
    });

    group.bench_function("nested_group", |b| {
        b.iter(|| black_box(formatter.format(black_box(&nested), "http", &bound)));
    });

    group.finish();
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::new(Arc::new(sink_router(Level::DEBUG)));
    let derived = logger.with(attrs![service = "api"]).with_group("http");
    let quiet = Logger::new(Arc::new(sink_router(Level::ERROR)));

    group.bench_function("info", |b| {
        b.iter(|| logger.info(black_box("Info message"), attrs![]));
    });

    group.bench_function("info_with_attrs", |b| {
        b.iter(|| logger.info(black_box("Info message"), attrs![user_id = 42, ok = true]));
    });

    group.bench_function("derived_logger", |b| {
        b.iter(|| derived.info(black_box("Info message"), attrs![status = 200]));
    });

    group.bench_function("disabled_level", |b| {
        b.iter(|| quiet.debug(black_box("Filtered message"), attrs![user_id = 42]));
    });

    group.finish();
}

fn bench_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivation");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::new(Arc::new(sink_router(Level::DEBUG)));

    group.bench_function("with_attrs", |b| {
        b.iter(|| black_box(logger.with(attrs![request_id = "abc123"])));
    });

    group.bench_function("with_group", |b| {
        b.iter(|| black_box(logger.with_group(black_box("worker"))));
    });

    group.finish();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for threads in [2usize, 4, 8] {
        let per_thread = 100;
        group.throughput(Throughput::Elements((threads * per_thread) as u64));
        group.bench_function(format!("{}_threads", threads), |b| {
            let logger = Logger::new(Arc::new(sink_router(Level::DEBUG)));
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|worker| {
                        let logger = logger.clone();
                        thread::spawn(move || {
                            for seq in 0..per_thread {
                                logger.info("tick", attrs![worker = worker, seq = seq]);
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_formatting,
    bench_dispatch,
    bench_derivation,
    bench_concurrent_logging,
);

criterion_main!(benches);
