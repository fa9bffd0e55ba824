//! Destinations for finished, filename-attributed log entries.

use crate::entry::{EventType, LogEntry};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Receives every entry once it is attributed to a file.
///
/// Entries arrive in causal order per buffer. Recording is infallible from
/// the caller's point of view: a sink that can fail deals with the failure
/// itself.
pub trait LogSink {
    fn record(&mut self, entry: &LogEntry);
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn record(&mut self, entry: &LogEntry) {
        (**self).record(entry);
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn record(&mut self, entry: &LogEntry) {
        (**self).record(entry);
    }
}

/// A sink that keeps every recorded entry in memory.
///
/// # Examples
///
/// ```
/// use editlog::{BufferState, EventType, MemorySink};
///
/// let mut sink = MemorySink::new();
/// let mut buffer = BufferState::new(1, "laptop", Some("notes.md".into()));
/// buffer.on_post_save(&mut sink);
/// assert_eq!(sink.event_types(), vec![EventType::Saved]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    entries: Vec<LogEntry>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn event_types(&self) -> Vec<EventType> {
        self.entries.iter().map(|e| e.event_type).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drain the recorded entries, leaving the sink empty.
    pub fn take(&mut self) -> Vec<LogEntry> {
        std::mem::take(&mut self.entries)
    }
}

impl LogSink for MemorySink {
    fn record(&mut self, entry: &LogEntry) {
        self.entries.push(entry.clone());
    }
}

/// A sink that appends each entry as one JSON line to a file.
///
/// The file is held under an exclusive advisory lock for the lifetime of the
/// sink, so two loggers never interleave lines in the same file. Each line is
/// synced to disk before `record` returns.
pub struct JsonlSink {
    path: PathBuf,
    file: File,
    written: u64,
}

impl std::fmt::Debug for JsonlSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlSink")
            .field("path", &self.path)
            .field("written", &self.written)
            .finish()
    }
}

impl JsonlSink {
    /// Open or create the log file at `path` in append mode.
    ///
    /// Creates missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if another sink holds the lock on the file,
    /// or any I/O error from creating the directory or opening the file.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.try_lock_exclusive().map_err(|_| {
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("another writer holds the lock on {}", path.display()),
            )
        })?;

        Ok(JsonlSink {
            path,
            file,
            written: 0,
        })
    }

    /// Returns the path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries this sink has written successfully.
    pub fn written(&self) -> u64 {
        self.written
    }

    fn append(&mut self, entry: &LogEntry) -> io::Result<()> {
        let json = serde_json::to_string(entry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(self.file, "{json}")?;
        self.file.sync_data()?;
        Ok(())
    }
}

impl LogSink for JsonlSink {
    fn record(&mut self, entry: &LogEntry) {
        match self.append(entry) {
            Ok(()) => self.written += 1,
            Err(e) => log::error!(
                "editlog: failed to write {} entry to {}: {e}",
                entry.event_type,
                self.path.display()
            ),
        }
    }
}

impl Drop for JsonlSink {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Read every complete entry from a JSONL log file.
///
/// Empty lines are skipped. A trailing line without its newline (a write cut
/// short) is ignored.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or `InvalidData` if a
/// complete line is not a valid entry.
pub fn read_jsonl(path: impl AsRef<Path>) -> io::Result<Vec<LogEntry>> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    let mut entries = Vec::new();
    let mut line = String::new();

    loop {
        line.clear();
        let n = reader.read_line(&mut line)?;
        if n == 0 {
            break;
        }
        if !line.ends_with('\n') {
            break;
        }
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            continue;
        }
        let entry: LogEntry = serde_json::from_str(trimmed)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        entries.push(entry);
    }

    Ok(entries)
}
