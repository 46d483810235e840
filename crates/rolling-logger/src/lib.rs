//! Rolling Logger
//!
//! Size-rotated log files plus a circular buffer of the most recent lines.
//!
//! `init_logger` installs a global tracing subscriber. Records emitted through
//! the `log` facade are bridged into it, so backend crates only need `log`.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Installed file sink (set once by `init_logger`)
static LOGGER: OnceLock<RollingFile> = OnceLock::new();

/// Logger tuning knobs
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// Rotate once the active file would exceed this size
    pub max_bytes: u64,
    /// Rotated archives kept on disk (active file not counted)
    pub max_files: usize,
    /// Lines kept in the in-memory ring buffer
    pub recent_capacity: usize,
    /// Minimum level written to the file
    pub level: log::LevelFilter,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            max_files: 5,
            recent_capacity: 200,
            level: log::LevelFilter::Info,
        }
    }
}

struct RollingInner {
    dir: PathBuf,
    app_name: String,
    options: LoggerOptions,
    file: File,
    written: u64,
    rotations: u32,
    recent: VecDeque<String>,
    partial: String,
}

/// Shared handle to the active log file.
///
/// Cloning is cheap; all clones write into the same file and ring buffer.
#[derive(Clone)]
pub struct RollingFile {
    inner: Arc<Mutex<RollingInner>>,
}

impl RollingFile {
    /// Open (or append to) `<dir>/<app_name>.log`
    pub fn open(dir: &Path, app_name: &str, options: LoggerOptions) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = active_path(dir, app_name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            inner: Arc::new(Mutex::new(RollingInner {
                dir: dir.to_path_buf(),
                app_name: app_name.to_string(),
                options,
                file,
                written,
                rotations: 0,
                recent: VecDeque::new(),
                partial: String::new(),
            })),
        })
    }

    /// Path of the file currently written to
    pub fn path(&self) -> PathBuf {
        let inner = self.lock();
        active_path(&inner.dir, &inner.app_name)
    }

    /// Most recent complete lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        self.lock().recent.iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RollingInner> {
        // Poisoned lock still guards a usable file
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RollingInner {
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.rotations += 1;

        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let archive = self
            .dir
            .join(format!("{}-{}-{:04}.log", self.app_name, stamp, self.rotations));
        fs::rename(active_path(&self.dir, &self.app_name), &archive)?;

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(active_path(&self.dir, &self.app_name))?;
        self.written = 0;

        self.prune()
    }

    fn prune(&self) -> io::Result<()> {
        let mut archives = archived_files(&self.dir, &self.app_name)?;
        if archives.len() <= self.options.max_files {
            return Ok(());
        }
        archives.sort();
        let excess = archives.len() - self.options.max_files;
        for old in archives.into_iter().take(excess) {
            fs::remove_file(old)?;
        }
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            let line = line.trim_end().to_string();
            if line.is_empty() {
                continue;
            }
            if self.recent.len() == self.options.recent_capacity {
                self.recent.pop_front();
            }
            if self.options.recent_capacity > 0 {
                self.recent.push_back(line);
            }
        }
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.lock();
        let incoming = buf.len() as u64;
        if inner.written > 0 && inner.written + incoming > inner.options.max_bytes {
            inner.rotate()?;
        }
        inner.file.write_all(buf)?;
        inner.written += incoming;
        inner.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingFile {
    type Writer = RollingFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn active_path(dir: &Path, app_name: &str) -> PathBuf {
    dir.join(format!("{}.log", app_name))
}

fn archived_files(dir: &Path, app_name: &str) -> io::Result<Vec<PathBuf>> {
    let prefix = format!("{}-", app_name);
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with(&prefix) && n.ends_with(".log"))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }
    Ok(files)
}

fn to_tracing_level(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

/// Initialize the global logger with default options
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    init_with_options(log_dir, app_name, LoggerOptions::default())
}

/// Initialize the global logger.
///
/// Warnings and errors are echoed to stderr as well. Calling this twice fails.
pub fn init_with_options(log_dir: PathBuf, app_name: &str, options: LoggerOptions) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Err("logger already initialized".to_string());
    }

    let level = to_tracing_level(options.level);
    let sink = RollingFile::open(&log_dir, app_name, options)
        .map_err(|e| format!("Failed to open log file in {}: {}", log_dir.display(), e))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(sink.clone())
                .with_ansi(false)
                .with_target(true)
                .with_filter(level),
        )
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(LevelFilter::WARN),
        )
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))?;

    LOGGER
        .set(sink)
        .map_err(|_| "logger already initialized".to_string())
}

fn ensure_initialized() -> Result<(), String> {
    LOGGER
        .get()
        .map(|_| ())
        .ok_or_else(|| "logger not initialized".to_string())
}

pub fn info(msg: &str) -> Result<(), String> {
    tracing::info!("{}", msg);
    ensure_initialized()
}

pub fn warn(msg: &str) -> Result<(), String> {
    tracing::warn!("{}", msg);
    ensure_initialized()
}

pub fn error(msg: &str) -> Result<(), String> {
    tracing::error!("{}", msg);
    ensure_initialized()
}

/// Recent lines of the global logger (empty before `init_logger`)
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(|l| l.recent_lines()).unwrap_or_default()
}

/// Active log file of the global logger
pub fn log_file_path() -> Option<PathBuf> {
    LOGGER.get().map(|l| l.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_options() -> LoggerOptions {
        LoggerOptions {
            max_bytes: 64,
            max_files: 2,
            recent_capacity: 3,
            level: log::LevelFilter::Info,
        }
    }

    #[test]
    fn test_rotation_keeps_bounded_archives() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = RollingFile::open(dir.path(), "Shelf", small_options()).unwrap();

        for i in 0..20 {
            let line = format!("line number {:02} with some padding\n", i);
            sink.write_all(line.as_bytes()).unwrap();
        }
        sink.flush().unwrap();

        let archives = archived_files(dir.path(), "Shelf").unwrap();
        assert_eq!(archives.len(), 2);
        assert!(sink.path().exists());
        let active = fs::read_to_string(sink.path()).unwrap();
        assert!(active.contains("line number 19"));
    }

    #[test]
    fn test_recent_lines_ring_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = RollingFile::open(dir.path(), "Shelf", small_options()).unwrap();

        sink.write_all(b"first\nsecond\n").unwrap();
        sink.write_all(b"thi").unwrap();
        sink.write_all(b"rd\nfourth\n").unwrap();

        assert_eq!(sink.recent_lines(), vec!["second", "third", "fourth"]);
    }

    #[test]
    fn test_reopen_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut sink = RollingFile::open(dir.path(), "Shelf", LoggerOptions::default()).unwrap();
            sink.write_all(b"before restart\n").unwrap();
        }
        let mut sink = RollingFile::open(dir.path(), "Shelf", LoggerOptions::default()).unwrap();
        sink.write_all(b"after restart\n").unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        assert!(content.contains("before restart"));
        assert!(content.contains("after restart"));
    }

    #[test]
    fn test_helpers_report_uninitialized() {
        // No test in this module installs the global logger
        assert!(info("not yet").is_err());
        assert!(recent_lines().is_empty());
        assert!(log_file_path().is_none());
    }
}
