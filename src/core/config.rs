//! Logger configuration
//!
//! The configuration tree is read from an external key/value store, modelled
//! here as a `serde_json::Value`. Keys missing from the tree keep their
//! defaults: level `info`, console enabled at `debug`, default rotation of
//! 50 MB / 3 backups / 7 days, and every file output disabled.

use super::error::{LoggerError, Result};
use super::level::Level;
use super::rotation::{self, RotationPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Global threshold: `debug`, `info`, `warn` or `error`
    pub level: String,
    #[serde(rename = "addSource", alias = "add_source")]
    pub add_source: bool,
    pub console: ConsoleConfig,
    pub file: FileConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            add_source: false,
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
        }
    }
}

impl Config {
    /// Decode a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Global threshold; unrecognized names mean `info`
    #[must_use]
    pub fn global_level(&self) -> Level {
        Level::parse_or(&self.level, Level::INFO)
    }

    /// The four per-level file outputs, lowest level first
    #[must_use]
    pub fn file_outputs(&self) -> [(Level, &FileOutputConfig); 4] {
        [
            (Level::DEBUG, &self.file.debug),
            (Level::INFO, &self.file.info),
            (Level::WARN, &self.file.warn),
            (Level::ERROR, &self.file.error),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// Console threshold; unrecognized names mean `debug`
    pub level: String,
    /// Color the level code
    pub colors: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "debug".to_string(),
            colors: false,
        }
    }
}

impl ConsoleConfig {
    #[must_use]
    pub fn level(&self) -> Level {
        Level::parse_or(&self.level, Level::DEBUG)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(rename = "defaultRotation", alias = "default_rotation")]
    pub default_rotation: RotationPolicy,
    pub debug: FileOutputConfig,
    pub info: FileOutputConfig,
    pub warn: FileOutputConfig,
    pub error: FileOutputConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            default_rotation: RotationPolicy::standard(),
            debug: FileOutputConfig::default(),
            info: FileOutputConfig::default(),
            warn: FileOutputConfig::default(),
            error: FileOutputConfig::default(),
        }
    }
}

/// File output for a single level
///
/// Zero rotation fields inherit from `file.defaultRotation`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub enabled: bool,
    pub path: String,
    #[serde(rename = "maxSizeMB", alias = "max_size_mb")]
    pub max_size_mb: u64,
    #[serde(rename = "maxBackups", alias = "max_backups")]
    pub max_backups: usize,
    #[serde(rename = "maxAgeDays", alias = "max_age_days")]
    pub max_age_days: u64,
    pub compress: bool,
}

impl FileOutputConfig {
    /// Effective rotation policy against `default`
    #[must_use]
    pub fn rotation_policy(&self, default: &RotationPolicy) -> RotationPolicy {
        rotation::resolve(self, default)
    }
}

/// Look up `key` (dot-separated) in `tree` and decode it as a [`Config`]
///
/// # Errors
///
/// Returns [`LoggerError::ConfigKeyNotFound`] when the key is absent,
/// [`LoggerError::InvalidConfiguration`] when it does not hold an object and
/// [`LoggerError::JsonError`] when the object does not decode.
pub fn load_config(tree: &serde_json::Value, key: &str) -> Result<Config> {
    let node = lookup(tree, key).ok_or_else(|| LoggerError::key_not_found(key))?;
    if !node.is_object() {
        return Err(LoggerError::config(
            key,
            format!("expected an object, found {}", json_kind(node)),
        ));
    }
    Ok(Config::deserialize(node)?)
}

fn json_kind(node: &serde_json::Value) -> &'static str {
    match node {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Read a JSON document from `path` and decode the subtree at `key`
pub fn load_config_file(path: impl AsRef<Path>, key: &str) -> Result<Config> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        LoggerError::io_operation(
            "reading configuration",
            format!("Failed to read '{}'", path.display()),
            e,
        )
    })?;
    let tree: serde_json::Value = serde_json::from_str(&text)?;
    load_config(&tree, key)
}

fn lookup<'a>(tree: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return Some(tree);
    }
    key.split('.').try_fold(tree, |node, segment| node.get(segment))
}
