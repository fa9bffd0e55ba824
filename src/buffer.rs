use crate::entry::{CursorSpan, EventType, LogEntry};
use crate::error::LogError;
use crate::sink::LogSink;
use serde_json::{Value, json};

/// Host-assigned buffer identifier. Unique among open buffers only.
pub type BufferId = u64;

/// Number of recent event types traced after each resolved append.
pub const DEFAULT_DEBUG_TAIL: usize = 10;

/// The two-state entry container of a buffer.
///
/// Entries recorded before the buffer has a filename wait in `pending`.
/// Once the filename is known they move, in their original order, to
/// `resolved`; from then on new entries go straight to `resolved`.
#[derive(Debug, Default, Clone)]
pub struct PendingLogBuffer {
    pending: Vec<LogEntry>,
    resolved: Vec<LogEntry>,
}

impl PendingLogBuffer {
    /// Entries waiting for a filename, oldest first.
    pub fn pending(&self) -> &[LogEntry] {
        &self.pending
    }

    /// Filename-attributed entries, oldest first.
    pub fn resolved(&self) -> &[LogEntry] {
        &self.resolved
    }

    fn queue(&mut self, entry: LogEntry) {
        self.pending.push(entry);
    }

    fn take_pending(&mut self) -> Vec<LogEntry> {
        std::mem::take(&mut self.pending)
    }
}

/// Activity log and focus/size bookkeeping for one editor buffer.
///
/// Every operation that can produce an entry takes the sink the entry is
/// forwarded to once it carries a filename. Entries logged while the
/// buffer is unsaved are held back and forwarded when
/// [`resolve_filename`](Self::resolve_filename) runs.
///
/// # Examples
///
/// ```
/// use editlog::{BufferState, EventType, MemorySink};
///
/// let mut sink = MemorySink::new();
/// let mut buffer = BufferState::new(1, "laptop", None);
///
/// buffer.on_activated(true, 0, &mut sink);
/// buffer.on_modified(12, &mut sink);
/// assert!(sink.is_empty());
/// assert_eq!(buffer.pending_entries().len(), 3);
///
/// buffer.resolve_filename("a.txt", &mut sink);
/// assert_eq!(
///     sink.event_types(),
///     vec![EventType::Opened, EventType::Activated, EventType::Insert]
/// );
/// assert!(sink.entries().iter().all(|e| e.filename.as_deref() == Some("a.txt")));
/// ```
#[derive(Debug, Clone)]
pub struct BufferState {
    buffer_id: BufferId,
    device_id: String,
    filename: Option<String>,
    entries: PendingLogBuffer,
    is_active: bool,
    last_known_size: u64,
    debug_tail: usize,
}

impl BufferState {
    /// Create the state for a buffer seen for the first time.
    ///
    /// An empty `filename` is treated as unknown.
    pub fn new(buffer_id: BufferId, device_id: &str, filename: Option<String>) -> Self {
        BufferState {
            buffer_id,
            device_id: device_id.to_string(),
            filename: filename.filter(|f| !f.is_empty()),
            entries: PendingLogBuffer::default(),
            is_active: false,
            last_known_size: 0,
            debug_tail: DEFAULT_DEBUG_TAIL,
        }
    }

    /// Set how many recent event types the debug trace lists.
    pub fn with_debug_tail(mut self, n: usize) -> Self {
        self.debug_tail = n;
        self
    }

    pub fn buffer_id(&self) -> BufferId {
        self.buffer_id
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn last_known_size(&self) -> u64 {
        self.last_known_size
    }

    pub fn log_buffer(&self) -> &PendingLogBuffer {
        &self.entries
    }

    pub fn pending_entries(&self) -> &[LogEntry] {
        self.entries.pending()
    }

    pub fn resolved_entries(&self) -> &[LogEntry] {
        self.entries.resolved()
    }

    /// Event types of the last `n` resolved entries, oldest first.
    pub fn recent_event_types(&self, n: usize) -> Vec<EventType> {
        let resolved = self.entries.resolved();
        let start = resolved.len().saturating_sub(n);
        resolved[start..].iter().map(|e| e.event_type).collect()
    }

    /// Record an event.
    ///
    /// Without a filename the entry is queued; with one it is appended to the
    /// resolved list and forwarded to `sink`.
    pub fn log<S: LogSink + ?Sized>(
        &mut self,
        event_type: EventType,
        event_data: Option<Value>,
        sink: &mut S,
    ) {
        let entry = LogEntry::new(&self.device_id, event_type, event_data);
        if self.filename.is_none() {
            self.entries.queue(entry);
            return;
        }
        if let Err(e) = self.push_resolved(entry, sink) {
            log::warn!("editlog: {e}");
        }
    }

    /// Append an entry directly to the resolved list.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidLogTarget`] if the buffer has no filename
    /// yet; nothing is recorded in that case.
    pub fn append_resolved<S: LogSink + ?Sized>(
        &mut self,
        event_type: EventType,
        event_data: Option<Value>,
        sink: &mut S,
    ) -> Result<(), LogError> {
        let entry = LogEntry::new(&self.device_id, event_type, event_data);
        self.push_resolved(entry, sink)
    }

    fn push_resolved<S: LogSink + ?Sized>(
        &mut self,
        entry: LogEntry,
        sink: &mut S,
    ) -> Result<(), LogError> {
        let filename = self.filename.as_deref().ok_or(LogError::InvalidLogTarget {
            buffer_id: self.buffer_id,
        })?;
        let entry = entry.stamped(filename);
        sink.record(&entry);
        self.entries.resolved.push(entry);
        self.trace_tail();
        Ok(())
    }

    fn trace_tail(&self) {
        if self.debug_tail == 0 || !log::log_enabled!(log::Level::Debug) {
            return;
        }
        let tail: Vec<&str> = self
            .recent_event_types(self.debug_tail)
            .into_iter()
            .map(EventType::as_str)
            .collect();
        log::debug!("editlog: buffer {}: {}", self.buffer_id, tail.join(" "));
    }

    /// Attribute the buffer to `filename` and flush its pending entries.
    ///
    /// First writer wins: once a filename is set, later calls are ignored and
    /// nothing is flushed again. Empty names are ignored. Returns whether the
    /// filename was applied.
    pub fn resolve_filename<S: LogSink + ?Sized>(&mut self, filename: &str, sink: &mut S) -> bool {
        if self.filename.is_some() || filename.is_empty() {
            return false;
        }
        self.filename = Some(filename.to_string());
        let flushed = self.flush_pending(sink);
        log::debug!(
            "editlog: buffer {} resolved to {filename}, flushed {flushed} pending entries",
            self.buffer_id
        );
        true
    }

    /// Move every pending entry to the resolved list, in order, forwarding
    /// each to `sink`. Returns how many entries were flushed.
    ///
    /// Does nothing (and warns) while the buffer has no filename.
    pub fn flush_pending<S: LogSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        if self.filename.is_none() {
            log::warn!(
                "editlog: buffer {} has no filename, cannot flush pending entries",
                self.buffer_id
            );
            return 0;
        }
        let pending = self.entries.take_pending();
        let count = pending.len();
        for entry in pending {
            if let Err(e) = self.push_resolved(entry, sink) {
                log::warn!("editlog: {e}");
            }
        }
        count
    }

    /// The buffer gained focus among the editor's tabs.
    ///
    /// Repeated activations without a deactivation in between are ignored.
    /// `created` marks the first activation of a new buffer and adds an
    /// `opened` entry ahead of `activated`.
    pub fn on_activated<S: LogSink + ?Sized>(&mut self, created: bool, size: u64, sink: &mut S) {
        if self.is_active {
            return;
        }
        self.is_active = true;
        if created {
            self.log(EventType::Opened, None, sink);
        }
        self.last_known_size = size;
        self.log(EventType::Activated, None, sink);
    }

    pub fn on_deactivated<S: LogSink + ?Sized>(&mut self, sink: &mut S) {
        if !self.is_active {
            return;
        }
        self.is_active = false;
        self.log(EventType::Deactivated, None, sink);
    }

    /// Derive an insert or delete from the new buffer size.
    ///
    /// An unchanged size is logged as an insert of zero.
    pub fn on_modified<S: LogSink + ?Sized>(&mut self, size: u64, sink: &mut S) {
        let old = self.last_known_size;
        if size < old {
            self.log(EventType::Delete, Some(json!({ "count": old - size })), sink);
        } else {
            self.log(EventType::Insert, Some(json!({ "count": size - old })), sink);
        }
        self.last_known_size = size;
    }

    pub fn on_cursor_modified<S: LogSink + ?Sized>(&mut self, positions: &[CursorSpan], sink: &mut S) {
        self.log(EventType::CursorChanged, Some(json!(positions)), sink);
    }

    pub fn on_close<S: LogSink + ?Sized>(&mut self, sink: &mut S) {
        self.log(EventType::Closed, None, sink);
    }

    pub fn on_post_save<S: LogSink + ?Sized>(&mut self, sink: &mut S) {
        self.log(EventType::Saved, None, sink);
    }

    pub fn on_tool_activated<S: LogSink + ?Sized>(&mut self, sink: &mut S) {
        self.log(EventType::ToolActivated, None, sink);
    }

    pub fn on_tool_deactivated<S: LogSink + ?Sized>(&mut self, sink: &mut S) {
        self.log(EventType::ToolDeactivated, None, sink);
    }
}
