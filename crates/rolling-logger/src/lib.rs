//! Rolling Logger
//!
//! Daily log files plus an in-memory ring of the most recent lines.
//! `log` records are bridged into the same `tracing` subscriber.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use chrono::{Local, NaiveDate};
use tracing_subscriber::fmt::MakeWriter;

/// Log files kept per application, oldest deleted first
pub const MAX_LOG_FILES: usize = 7;

/// Lines kept in memory for `recent_lines`
pub const BUFFER_CAPACITY: usize = 500;

#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    AlreadyInitialized,
    NotInitialized,
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "Log file error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "Logger already initialized"),
            LoggerError::NotInitialized => write!(f, "Logger not initialized"),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<io::Error> for LoggerError {
    fn from(e: io::Error) -> Self {
        LoggerError::Io(e)
    }
}

struct Inner {
    dir: PathBuf,
    app_name: String,
    date: Option<NaiveDate>,
    file: Option<File>,
    buffer: VecDeque<String>,
}

/// Writer behind the subscriber: one file per day, ring buffer in memory
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<Inner>>,
}

impl RollingWriter {
    pub fn new(dir: impl Into<PathBuf>, app_name: &str) -> Result<Self, LoggerError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                dir,
                app_name: app_name.to_string(),
                date: None,
                file: None,
                buffer: VecDeque::with_capacity(BUFFER_CAPACITY),
            })),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // a panic while logging must not disable logging
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn write_line(&self, line: &str) -> Result<(), LoggerError> {
        self.write_line_on(Local::now().date_naive(), line)
    }

    fn write_line_on(&self, date: NaiveDate, line: &str) -> Result<(), LoggerError> {
        let mut inner = self.lock();

        if inner.buffer.len() == BUFFER_CAPACITY {
            inner.buffer.pop_front();
        }
        inner.buffer.push_back(line.to_string());

        if inner.date != Some(date) || inner.file.is_none() {
            let path = log_file_path(&inner.dir, &inner.app_name, date);
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            inner.file = Some(file);
            inner.date = Some(date);
            prune_old_files(&inner.dir, &inner.app_name)?;
        }

        if let Some(file) = inner.file.as_mut() {
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    pub fn recent_lines(&self) -> Vec<String> {
        self.lock().buffer.iter().cloned().collect()
    }
}

fn log_file_path(dir: &Path, app_name: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.{}.log", app_name, date.format("%Y-%m-%d")))
}

/// Date of a file named exactly `<app>.YYYY-MM-DD.log`
fn log_file_date(name: &str, app_name: &str) -> Option<NaiveDate> {
    let date = name
        .strip_prefix(app_name)?
        .strip_prefix('.')?
        .strip_suffix(".log")?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn prune_old_files(dir: &Path, app_name: &str) -> io::Result<()> {
    let mut files: Vec<(NaiveDate, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter_map(|path| {
            let date = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| log_file_date(name, app_name))?;
            Some((date, path))
        })
        .collect();
    files.sort();

    let excess = files.len().saturating_sub(MAX_LOG_FILES);
    for (_, path) in files.into_iter().take(excess) {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// One formatted event; written out line by line when dropped
pub struct EventWriter {
    target: RollingWriter,
    buf: Vec<u8>,
}

impl Write for EventWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let text = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        for line in text.lines().filter(|l| !l.is_empty()) {
            self.target
                .write_line(line)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter {
            target: self.clone(),
            buf: Vec::new(),
        }
    }
}

static LOGGER: OnceLock<RollingWriter> = OnceLock::new();

/// Install the global subscriber writing to `log_dir`
pub fn init_logger(log_dir: impl Into<PathBuf>, app_name: &str) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    let writer = RollingWriter::new(log_dir, app_name)?;

    tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    LOGGER
        .set(writer)
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    tracing::info!("{} logging to daily files", app_name);
    Ok(())
}

fn ensure_initialized() -> Result<(), LoggerError> {
    LOGGER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!("{}", msg);
    Ok(())
}

/// Most recent formatted lines, oldest first. Empty before `init_logger`.
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(|w| w.recent_lines()).unwrap_or_default()
}
