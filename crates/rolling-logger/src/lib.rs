//! Rolling Logger
//!
//! Daily rolled log files plus an in-memory ring of the most recent lines.
//! Installs a `tracing` subscriber that also receives `log` records, so crates
//! logging through either facade end up in the same file.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use chrono::{Local, NaiveDate};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Number of lines kept in memory for `recent_lines`
pub const RING_CAPACITY: usize = 500;

static SINK: OnceLock<LogSink> = OnceLock::new();

struct SinkState {
    date: Option<NaiveDate>,
    file: Option<File>,
    partial: String,
    ring: VecDeque<String>,
}

/// Writer handle shared between the subscriber and `recent_lines`.
///
/// Cloning is cheap; all clones append to the same file and ring.
#[derive(Clone)]
pub struct LogSink {
    dir: PathBuf,
    app_name: String,
    capacity: usize,
    state: Arc<Mutex<SinkState>>,
}

impl LogSink {
    pub fn new(dir: impl Into<PathBuf>, app_name: &str, capacity: usize) -> Self {
        Self {
            dir: dir.into(),
            app_name: app_name.to_string(),
            capacity,
            state: Arc::new(Mutex::new(SinkState {
                date: None,
                file: None,
                partial: String::new(),
                ring: VecDeque::with_capacity(capacity),
            })),
        }
    }

    /// Path of the log file for a given day
    pub fn file_path(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}.{}.log", self.app_name, date.format("%Y-%m-%d")))
    }

    /// Snapshot of the buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        match self.state.lock() {
            Ok(state) => state.ring.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().ring.iter().cloned().collect(),
        }
    }

    fn write_at(&self, date: NaiveDate, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log sink poisoned"))?;

        if state.date != Some(date) || state.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.file_path(date))?;
            state.file = Some(file);
            state.date = Some(date);
        }

        if let Some(file) = state.file.as_mut() {
            file.write_all(buf)?;
        }

        state.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = state.partial.find('\n') {
            let line: String = state.partial.drain(..=pos).collect();
            if state.ring.len() == self.capacity {
                state.ring.pop_front();
            }
            state.ring.push_back(line.trim_end().to_string());
        }

        Ok(buf.len())
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_at(Local::now().date_naive(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log sink poisoned"))?;
        match state.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Initialize the global logger.
///
/// Writes to stderr and to `<log_dir>/<app_name>.<date>.log`. The filter
/// honours `RUST_LOG` and falls back to `info`.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    let log_dir = log_dir.as_ref();
    fs::create_dir_all(log_dir)
        .map_err(|e| format!("Failed to create log dir {}: {}", log_dir.display(), e))?;

    let sink = LogSink::new(log_dir, app_name, RING_CAPACITY);
    SINK.set(sink.clone())
        .map_err(|_| "Logger already initialized".to_string())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_sink = sink.clone();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(move || file_sink.clone()),
        )
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))
}

/// Lines buffered since `init_logger`, oldest first
pub fn recent_lines() -> Vec<String> {
    SINK.get().map(LogSink::lines).unwrap_or_default()
}

pub fn info(msg: &str) -> Result<(), String> {
    tracing::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), String> {
    tracing::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    tracing::error!("{}", msg);
    Ok(())
}
