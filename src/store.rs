use crate::app_dirs::AppDirs;
use crate::scramble::ScrambleSequence;
use crate::time_log::TimeLog;
use chrono::prelude::*;
use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Durable home for the recorded time log. Implementations hand the typed
/// log back and forth; everything else about the medium is private to the
/// implementation.
pub trait TimeStore {
    /// Load the persisted log. Absence or malformed content yields an empty
    /// log, never an error.
    fn load(&self) -> TimeLog;
    fn save(&self, log: &TimeLog) -> io::Result<()>;
    /// Remove the persisted log entirely (clear-all semantics).
    fn wipe(&self) -> io::Result<()>;
}

/// JSON-array-on-disk store, one well-known file per user.
#[derive(Debug, Clone)]
pub struct FileTimeStore {
    path: PathBuf,
}

impl FileTimeStore {
    pub fn new() -> Self {
        let path = AppDirs::times_path().unwrap_or_else(|| PathBuf::from("cubik_times.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileTimeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeStore for FileTimeStore {
    fn load(&self) -> TimeLog {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(log) = serde_json::from_slice::<TimeLog>(&bytes) {
                return log;
            }
        }
        TimeLog::new()
    }

    fn save(&self, log: &TimeLog) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec(log).unwrap_or_default();
        fs::write(&self.path, data)
    }

    fn wipe(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-memory store for tests and `--fresh` runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    times: RefCell<TimeLog>,
}

impl TimeStore for MemoryStore {
    fn load(&self) -> TimeLog {
        self.times.borrow().clone()
    }

    fn save(&self, log: &TimeLog) -> io::Result<()> {
        *self.times.borrow_mut() = log.clone();
        Ok(())
    }

    fn wipe(&self) -> io::Result<()> {
        self.times.borrow_mut().clear();
        Ok(())
    }
}

/// Append one completed solve to the per-solve journal. Emits a header when
/// the file is first created.
pub fn append_history(
    path: &Path,
    duration_ms: u64,
    scramble: &ScrambleSequence,
) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let needs_header = !path.exists();

    let mut log_file = OpenOptions::new().append(true).create(true).open(path)?;

    if needs_header {
        writeln!(log_file, "date,duration_ms,scramble")?;
    }

    writeln!(
        log_file,
        "{},{},{}",
        Local::now().format("%c"),
        duration_ms,
        scramble
    )
}

/// Journal a solve at the default location, swallowing failures; the journal
/// is best-effort and must never surface into the timer.
pub fn journal_solve(duration_ms: u64, scramble: &ScrambleSequence) {
    if let Some(path) = AppDirs::history_path() {
        let _ = append_history(&path, duration_ms, scramble);
    }
}
