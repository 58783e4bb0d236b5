//! Level router
//!
//! Fans a record out to the sinks registered for its exact level. A sink
//! registered for `WARN` never sees `ERROR` records; registering one sink
//! for several levels is how "this level and above" is expressed.

use super::{error::Result, handler::Handler, level::Level, record::Record, value::Attr};
use std::collections::BTreeMap;
use std::sync::Arc;

/// What to do when a sink fails while a record is being dispatched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// Stop at the first failing sink and return its error. Sinks
    /// registered after it for the same level do not see the record.
    #[default]
    FailFast,
    /// Offer the record to every sink, then return the first error
    Continue,
}

#[derive(Clone)]
pub struct LevelRouter {
    threshold: Level,
    routes: BTreeMap<Level, Vec<Arc<dyn Handler>>>,
    policy: DispatchPolicy,
}

impl LevelRouter {
    pub fn new(threshold: Level, routes: BTreeMap<Level, Vec<Arc<dyn Handler>>>) -> Self {
        Self {
            threshold,
            routes,
            policy: DispatchPolicy::default(),
        }
    }

    pub fn builder(threshold: Level) -> LevelRouterBuilder {
        LevelRouterBuilder {
            threshold,
            routes: BTreeMap::new(),
            policy: DispatchPolicy::default(),
        }
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Sinks registered for exactly `level`, in dispatch order
    pub fn sinks(&self, level: Level) -> &[Arc<dyn Handler>] {
        self.routes.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Levels that have at least one registered sink
    pub fn levels(&self) -> impl Iterator<Item = Level> + '_ {
        self.routes.keys().copied()
    }

    fn derive<F>(&self, extend: F) -> LevelRouter
    where
        F: Fn(&Arc<dyn Handler>) -> Arc<dyn Handler>,
    {
        let routes: BTreeMap<Level, Vec<Arc<dyn Handler>>> = self
            .routes
            .iter()
            .map(|(level, sinks)| (*level, sinks.iter().map(&extend).collect::<Vec<_>>()))
            .collect();
        LevelRouter {
            threshold: self.threshold,
            routes,
            policy: self.policy,
        }
    }
}

impl Handler for LevelRouter {
    fn enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let Some(sinks) = self.routes.get(&record.level) else {
            return Ok(());
        };

        let mut first_error = None;
        for sink in sinks {
            if !sink.enabled(record.level) {
                continue;
            }
            if let Err(e) = sink.handle(record) {
                match self.policy {
                    DispatchPolicy::FailFast => return Err(e),
                    DispatchPolicy::Continue => {
                        first_error.get_or_insert(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        Arc::new(self.derive(|sink| sink.with_attrs(attrs)))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(self.derive(|sink| sink.with_group(name)))
    }

    fn flush(&self) -> Result<()> {
        // A sink registered for several levels is flushed once
        let mut seen: Vec<*const ()> = Vec::new();
        for sink in self.routes.values().flatten() {
            let ptr = Arc::as_ptr(sink) as *const ();
            if seen.contains(&ptr) {
                continue;
            }
            seen.push(ptr);
            sink.flush()?;
        }
        Ok(())
    }
}

/// Assembles the fixed route table of a [`LevelRouter`]
pub struct LevelRouterBuilder {
    threshold: Level,
    routes: BTreeMap<Level, Vec<Arc<dyn Handler>>>,
    policy: DispatchPolicy,
}

impl LevelRouterBuilder {
    /// Register `sink` for exactly `level`, after any sinks already there
    #[must_use]
    pub fn route(mut self, level: Level, sink: Arc<dyn Handler>) -> Self {
        self.routes.entry(level).or_default().push(sink);
        self
    }

    /// Register `sink` for every named level at or above `min`
    #[must_use]
    pub fn route_from(mut self, min: Level, sink: Arc<dyn Handler>) -> Self {
        for level in Level::ALL.into_iter().filter(|l| *l >= min) {
            self.routes.entry(level).or_default().push(Arc::clone(&sink));
        }
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> LevelRouter {
        LevelRouter {
            threshold: self.threshold,
            routes: self.routes,
            policy: self.policy,
        }
    }
}
