//! Rotation parameters for file sinks
//!
//! A default policy lives at the configuration root; each per-level file
//! output may override it field by field.

use super::config::FileOutputConfig;
use serde::{Deserialize, Serialize};

/// Size, age and backup-count limits of a rotating file
///
/// A zero `max_size_mb` means 100 MB, a zero `max_backups` keeps every
/// backup and a zero `max_age_days` disables age-based removal.
///
/// # Examples
///
/// ```
/// use leveled_logger::RotationPolicy;
///
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(50)
///     .with_max_backups(7)
///     .with_compression(true);
/// assert_eq!(policy.max_size_bytes(), 50 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default = "RotationPolicy::standard")]
pub struct RotationPolicy {
    #[serde(rename = "maxSizeMB", alias = "max_size_mb")]
    pub max_size_mb: u64,
    #[serde(rename = "maxBackups", alias = "max_backups")]
    pub max_backups: usize,
    #[serde(rename = "maxAgeDays", alias = "max_age_days")]
    pub max_age_days: u64,
    pub compress: bool,
}

impl RotationPolicy {
    /// Size used when `max_size_mb` is zero
    pub const DEFAULT_MAX_SIZE_MB: u64 = 100;

    const MEGABYTE: u64 = 1024 * 1024;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 50 MB, 3 backups, 7 days, uncompressed. Keys missing from a
    /// configured default rotation block take these values.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_max_size_mb(50)
            .with_max_backups(3)
            .with_max_age_days(7)
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size_mb(mut self, size: u64) -> Self {
        self.max_size_mb = size;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age_days(mut self, days: u64) -> Self {
        self.max_age_days = days;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    /// Size limit in bytes of the active file
    #[must_use]
    pub fn max_size_bytes(&self) -> u64 {
        let mb = if self.max_size_mb == 0 {
            Self::DEFAULT_MAX_SIZE_MB
        } else {
            self.max_size_mb
        };
        mb.saturating_mul(Self::MEGABYTE)
    }
}

/// Merge a per-level override with the default policy
///
/// Zero limits fall back to the default's value. `compress` always comes
/// from the override since `false` is an explicit choice.
#[must_use]
pub fn resolve(output: &FileOutputConfig, default: &RotationPolicy) -> RotationPolicy {
    fn or_default<T: PartialEq + Default>(value: T, fallback: T) -> T {
        if value == T::default() {
            fallback
        } else {
            value
        }
    }

    RotationPolicy {
        max_size_mb: or_default(output.max_size_mb, default.max_size_mb),
        max_backups: or_default(output.max_backups, default.max_backups),
        max_age_days: or_default(output.max_age_days, default.max_age_days),
        compress: output.compress,
    }
}
