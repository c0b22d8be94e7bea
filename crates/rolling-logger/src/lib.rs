//! Rolling file logger
//!
//! Installs a global `tracing` subscriber that writes to stderr and to a
//! size-rotated file in a log directory. `log` records are bridged in, so
//! crates using the `log` macros end up in the same files. The most recent
//! lines are also kept in memory.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 3;
pub const RECENT_CAPACITY: usize = 500;

static LOGGER: OnceLock<Arc<RollingFile>> = OnceLock::new();

/// Fixed-capacity buffer of the most recent lines
pub struct RecentLines {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl RecentLines {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn push(&self, line: &str) {
        let Ok(mut lines) = self.lines.lock() else { return };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line.trim_end().to_string());
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.iter().cloned().collect()).unwrap_or_default()
    }
}

struct FileState {
    file: Option<File>,
    written: u64,
}

/// `<dir>/<app>.log`, shifted to `<app>.1.log` .. `<app>.N.log` once full
pub struct RollingFile {
    dir: PathBuf,
    app_name: String,
    max_bytes: u64,
    max_files: usize,
    state: Mutex<FileState>,
    recent: RecentLines,
}

impl RollingFile {
    pub fn open(dir: &Path, app_name: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let rolling = Self {
            dir: dir.to_path_buf(),
            app_name: app_name.to_string(),
            max_bytes,
            max_files: max_files.max(1),
            state: Mutex::new(FileState { file: None, written: 0 }),
            recent: RecentLines::new(RECENT_CAPACITY),
        };
        let (file, written) = rolling.open_current()?;
        if let Ok(mut state) = rolling.state.lock() {
            state.file = Some(file);
            state.written = written;
        }
        Ok(rolling)
    }

    pub fn current_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.app_name))
    }

    fn archive_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}.log", self.app_name, index))
    }

    fn open_current(&self) -> io::Result<(File, u64)> {
        let file = OpenOptions::new().create(true).append(true).open(self.current_path())?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok((file, written))
    }

    fn rotate(&self, state: &mut FileState) -> io::Result<()> {
        state.file = None;
        let oldest = self.archive_path(self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.max_files).rev() {
            let from = self.archive_path(index);
            if from.exists() {
                fs::rename(&from, self.archive_path(index + 1))?;
            }
        }
        fs::rename(self.current_path(), self.archive_path(1))?;
        let (file, written) = self.open_current()?;
        state.file = Some(file);
        state.written = written;
        Ok(())
    }

    pub fn write_bytes(&self, buf: &[u8]) -> io::Result<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        let state = &mut *guard;
        if state.written > 0 && state.written + buf.len() as u64 > self.max_bytes {
            self.rotate(state)?;
        }
        if let Some(file) = state.file.as_mut() {
            file.write_all(buf)?;
            state.written += buf.len() as u64;
        }
        for line in String::from_utf8_lossy(buf).lines() {
            if !line.is_empty() {
                self.recent.push(line);
            }
        }
        Ok(())
    }

    pub fn recent_lines(&self) -> Vec<String> {
        self.recent.snapshot()
    }
}

/// Per-event writer handed out to the fmt layer
pub struct RollingWriter(Arc<RollingFile>);

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    let rolling = Arc::new(
        RollingFile::open(log_dir.as_ref(), app_name, DEFAULT_MAX_FILE_BYTES, DEFAULT_MAX_FILES)
            .map_err(|e| format!("Failed to open log file in {}: {}", log_dir.as_ref().display(), e))?,
    );
    if LOGGER.set(rolling.clone()).is_err() {
        return Err("Logger already initialized".to_string());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_writer = rolling.clone();
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(move || RollingWriter(file_writer.clone()));
    let stderr_layer = fmt::layer().with_target(true).with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))?;

    tracing::info!(app = app_name, dir = %log_dir.as_ref().display(), "Logger initialized");
    Ok(())
}

fn write_line(level: &str, msg: &str) -> Result<(), String> {
    let logger = LOGGER.get().ok_or_else(|| "Logger not initialized".to_string())?;
    let line = format!(
        "{} {} {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        level,
        msg
    );
    logger.write_bytes(line.as_bytes()).map_err(|e| e.to_string())
}

/// Append an INFO line straight to the log file
pub fn info(msg: &str) -> Result<(), String> {
    write_line("INFO", msg)
}

pub fn error(msg: &str) -> Result<(), String> {
    write_line("ERROR", msg)
}

/// Most recent lines written, oldest first. Empty before `init_logger`.
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(|l| l.recent_lines()).unwrap_or_default()
}
