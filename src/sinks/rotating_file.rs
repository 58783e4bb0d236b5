//! Rotating file sink
//!
//! [`RotatingWriter`] is a byte stream that keeps the active log file below
//! a size limit. When a write would push the file past the limit, the file
//! is renamed to `<stem>-<local time><ext>` (for example
//! `app-2025-01-08T10-30-45.123.log`), a fresh file is opened at the
//! original path, and old backups are cleaned up:
//!
//! 1. backups beyond `max_backups` are removed, oldest first
//! 2. backups older than `max_age_days` are removed regardless of count
//! 3. with `compress` set, remaining backups are queued for gzip on a
//!    background thread owned by the writer
//!
//! Cleanup failures never fail the write that triggered the rotation.
//! Dropping the writer waits for queued compression to finish.

use super::text::TextHandler;
use crate::core::{Level, LoggerError, Result, RotationPolicy};
use chrono::{Local, NaiveDateTime};
use crossbeam_channel::{unbounded, Sender};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::thread;

const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const COMPRESS_SUFFIX: &str = ".gz";

/// Open a file sink at `path`: create the parent directory, open the file
/// and wrap it in a [`TextHandler`] at `level`
///
/// # Errors
///
/// Fails when the directory cannot be created or the file cannot be opened.
pub fn open_file_sink(
    path: impl AsRef<Path>,
    policy: RotationPolicy,
    level: Level,
) -> Result<TextHandler> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let writer = RotatingWriter::open(path, policy)?;
    Ok(TextHandler::new(writer, level))
}

/// Create the parent directory of `path` (mode 0755 on Unix) if missing
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(parent).map_err(|e| {
        LoggerError::io_operation(
            "creating log directory",
            format!("Failed to create directory '{}'", parent.display()),
            e,
        )
    })
}

/// Size-limited log file with timestamped backups
///
/// # Examples
///
/// ```no_run
/// use leveled_logger::{RotatingWriter, RotationPolicy};
/// use std::io::Write;
///
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(10)
///     .with_max_backups(5)
///     .with_compression(true);
/// let mut writer = RotatingWriter::open("/var/log/app/info.log", policy).unwrap();
/// writer.write_all(b"INF started\n").unwrap();
/// ```
pub struct RotatingWriter {
    path: PathBuf,
    policy: RotationPolicy,
    max_bytes: u64,
    file: Option<File>,
    size: u64,
    /// Timestamp of the most recent backup this writer produced
    last_backup: Option<NaiveDateTime>,
    /// Present only when the policy compresses backups
    compressor: Option<Compressor>,
}

/// Background gzip worker fed with backup paths
struct Compressor {
    queue: Option<Sender<PathBuf>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Compressor {
    fn spawn() -> io::Result<Self> {
        let (queue, jobs) = unbounded::<PathBuf>();
        let worker = thread::Builder::new()
            .name("log-compress".to_string())
            .spawn(move || {
                for path in jobs {
                    // queued twice, or removed by a later cleanup
                    if !path.exists() {
                        continue;
                    }
                    if let Err(e) = compress_file(&path) {
                        eprintln!(
                            "[WARN] Backup compression failed for {}: {}",
                            path.display(),
                            e
                        );
                    }
                }
            })?;

        Ok(Self {
            queue: Some(queue),
            worker: Some(worker),
        })
    }

    /// Queue `path`; compresses inline if the worker is gone
    fn submit(&self, path: PathBuf) -> Result<()> {
        match self.queue {
            Some(ref queue) => match queue.send(path) {
                Ok(()) => Ok(()),
                Err(returned) => compress_file(&returned.into_inner()),
            },
            None => compress_file(&path),
        }
    }

    /// Close the queue and wait for every queued backup
    fn finish(&mut self) {
        drop(self.queue.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                eprintln!("[WARN] Backup compression worker panicked");
            }
        }
    }
}

impl Drop for Compressor {
    fn drop(&mut self) {
        self.finish();
    }
}

/// A rotated-out file found next to the active one
#[derive(Debug)]
struct Backup {
    path: PathBuf,
    /// File name without the compression suffix
    name: String,
    timestamp: NaiveDateTime,
    compressed: bool,
}

impl RotatingWriter {
    /// Open (or create) the file at `path` for appending
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or opened
    pub fn open<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (file, size) = Self::open_append(&path)?;

        let compressor = if policy.compress {
            match Compressor::spawn() {
                Ok(compressor) => Some(compressor),
                Err(e) => {
                    eprintln!(
                        "[WARN] Backups of {} will be compressed inline: {}",
                        path.display(),
                        e
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            path,
            max_bytes: policy.max_size_bytes(),
            policy,
            file: Some(file),
            size,
            last_backup: None,
            compressor,
        })
    }

    /// Override the size limit with an exact byte count
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Bytes in the active file
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.size
    }

    /// Block until every backup queued so far is compressed.
    ///
    /// Later rotations compress inline.
    pub fn finish_compression(&mut self) {
        if let Some(ref mut compressor) = self.compressor {
            compressor.finish();
        }
    }

    fn open_append(path: &Path) -> Result<(File, u64)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_sink(path.display().to_string(), format!("Failed to open: {}", e))
            })?;

        let size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_sink(
                    path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok((file, size))
    }

    /// Move the active file to a backup and start a new one
    pub fn rotate(&mut self) -> Result<()> {
        // Close the handle before renaming
        self.file.take();

        if self.path.exists() {
            let backup = self.backup_path();
            fs::rename(&self.path, &backup).map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to rename to '{}': {}", backup.display(), e),
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to create new log file: {}", e),
                )
            })?;
        self.file = Some(file);
        self.size = 0;

        if let Err(e) = self.remove_stale_backups() {
            eprintln!(
                "[WARN] Backup cleanup failed for {}: {}",
                self.path.display(),
                e
            );
        }

        Ok(())
    }

    /// `(prefix, extension)` of backup names, e.g. `("app-", ".log")`
    fn name_parts(&self) -> (String, String) {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log");
        match name.rfind('.') {
            Some(dot) if dot > 0 => (format!("{}-", &name[..dot]), name[dot..].to_string()),
            _ => (format!("{}-", name), String::new()),
        }
    }

    /// Backup path for the current time. Names are unique and strictly
    /// newer than any backup this writer produced before.
    fn backup_path(&mut self) -> PathBuf {
        let (prefix, ext) = self.name_parts();
        let step = chrono::Duration::milliseconds(1);
        let mut at = Local::now().naive_local();
        if let Some(last) = self.last_backup {
            if at < last + step {
                at = last + step;
            }
        }
        loop {
            let name = format!("{}{}{}", prefix, at.format(BACKUP_TIME_FORMAT), ext);
            let path = self.path.with_file_name(&name);
            let compressed = self.path.with_file_name(format!("{}{}", name, COMPRESS_SUFFIX));
            if !path.exists() && !compressed.exists() {
                self.last_backup = Some(at);
                return path;
            }
            at += step;
        }
    }

    /// Backups of this file, newest first
    fn backups(&self) -> Result<Vec<Backup>> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let (prefix, ext) = self.name_parts();

        let entries = fs::read_dir(dir).map_err(|e| {
            LoggerError::io_operation(
                "listing log backups",
                format!("Failed to read directory '{}'", dir.display()),
                e,
            )
        })?;

        let mut backups = Vec::new();
        for entry in entries.flatten() {
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str().map(String::from) else {
                continue;
            };
            let (name, compressed) = match file_name.strip_suffix(COMPRESS_SUFFIX) {
                Some(stripped) => (stripped.to_string(), true),
                None => (file_name.clone(), false),
            };
            let Some(timestamp) = parse_backup_time(&name, &prefix, &ext) else {
                continue;
            };
            backups.push(Backup {
                path: entry.path(),
                name,
                timestamp,
                compressed,
            });
        }

        backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(backups)
    }

    fn remove_stale_backups(&self) -> Result<()> {
        let policy = self.policy;
        if policy.max_backups == 0 && policy.max_age_days == 0 && !policy.compress {
            return Ok(());
        }

        let mut remaining = self.backups()?;
        let mut remove = Vec::new();

        if policy.max_backups > 0 {
            let mut preserved = HashSet::new();
            let (keep, excess): (Vec<_>, Vec<_>) = remaining.into_iter().partition(|b| {
                preserved.insert(b.name.clone());
                preserved.len() <= policy.max_backups
            });
            remaining = keep;
            remove.extend(excess);
        }

        if policy.max_age_days > 0 {
            let age = chrono::Duration::days(policy.max_age_days.min(1 << 20) as i64);
            let cutoff = Local::now().naive_local() - age;
            let (keep, expired): (Vec<_>, Vec<_>) =
                remaining.into_iter().partition(|b| b.timestamp >= cutoff);
            remaining = keep;
            remove.extend(expired);
        }

        let mut first_error = None;
        for backup in &remove {
            if let Err(e) = fs::remove_file(&backup.path) {
                first_error.get_or_insert(LoggerError::io_operation(
                    "removing log backup",
                    format!("Failed to remove '{}'", backup.path.display()),
                    e,
                ));
            }
        }

        if policy.compress {
            for backup in remaining.into_iter().filter(|b| !b.compressed) {
                let queued = match self.compressor {
                    Some(ref compressor) => compressor.submit(backup.path),
                    None => compress_file(&backup.path),
                };
                if let Err(e) = queued {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len() as u64;
        if len > self.max_bytes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "write length {} exceeds maximum file size {}",
                    len, self.max_bytes
                ),
            ));
        }

        if self.file.is_none() {
            // A failed rotation left no open file; continue in place
            let (file, size) = Self::open_append(&self.path)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            self.file = Some(file);
            self.size = size;
        }

        if self.size + len > self.max_bytes {
            self.rotate()
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file is not open"))?;
        // whole record or nothing, so a line never straddles two files
        file.write_all(buf)?;
        self.size += len;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file {
            Some(ref mut file) => file.flush(),
            None => Ok(()),
        }
    }
}

fn parse_backup_time(name: &str, prefix: &str, ext: &str) -> Option<NaiveDateTime> {
    let stamp = name.strip_prefix(prefix)?.strip_suffix(ext)?;
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT).ok()
}

/// Gzip `path` to `<path>.gz`, removing the original only on success
fn compress_file(path: &Path) -> Result<()> {
    let mut gz_name = path.as_os_str().to_os_string();
    gz_name.push(COMPRESS_SUFFIX);
    let gz_path = PathBuf::from(gz_name);
    let mut tmp_name = gz_path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let result = (|| -> Result<()> {
        let input = File::open(path).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to open file for compression: {}", path.display()),
                e,
            )
        })?;
        let output = File::create(&tmp_path).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to create temporary file: {}", tmp_path.display()),
                e,
            )
        })?;

        let mut reader = BufReader::with_capacity(64 * 1024, input);
        let mut encoder = flate2::write::GzEncoder::new(
            BufWriter::with_capacity(64 * 1024, output),
            flate2::Compression::default(),
        );
        io::copy(&mut reader, &mut encoder)?;
        encoder.finish()?.flush()?;

        fs::rename(&tmp_path, &gz_path).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to rename compressed file to: {}", gz_path.display()),
                e,
            )
        })
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
        return result;
    }

    fs::remove_file(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Compressed but failed to remove original: {}", path.display()),
            e,
        )
    })
}
