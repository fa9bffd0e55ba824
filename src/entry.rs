use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// The semantic event kinds a buffer can record.
///
/// Serialized in snake_case (`"cursor_changed"`, `"tool_activated"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// First activation of a brand-new buffer instance.
    Opened,
    /// The buffer gained focus among the editor's tabs.
    Activated,
    /// The buffer lost focus among the editor's tabs.
    Deactivated,
    /// The buffer grew (or kept its size) after a modification.
    Insert,
    /// The buffer shrank after a modification.
    Delete,
    /// The selection moved.
    CursorChanged,
    Saved,
    Closed,
    /// The editor application gained OS focus while this buffer was last in front.
    ToolActivated,
    /// The editor application lost OS focus while this buffer was last in front.
    ToolDeactivated,
}

impl EventType {
    /// The wire name of the event type.
    pub const fn as_str(self) -> &'static str {
        match self {
            EventType::Opened => "opened",
            EventType::Activated => "activated",
            EventType::Deactivated => "deactivated",
            EventType::Insert => "insert",
            EventType::Delete => "delete",
            EventType::CursorChanged => "cursor_changed",
            EventType::Saved => "saved",
            EventType::Closed => "closed",
            EventType::ToolActivated => "tool_activated",
            EventType::ToolDeactivated => "tool_deactivated",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selection expressed as `((start_row, start_col), (end_row, end_col))`.
pub type CursorSpan = ((u64, u64), (u64, u64));

/// An immutable activity record.
///
/// Entries are created by a [`BufferState`](crate::BufferState) and never
/// change after they reach the resolved list. `filename` stays `None` only
/// while the entry waits in the pending queue of an unsaved buffer; the
/// flush stamps it once.
///
/// # Examples
///
/// ```
/// use editlog::{EventType, LogEntry};
/// use serde_json::json;
///
/// let entry = LogEntry::new("laptop", EventType::Insert, Some(json!({"count": 3})));
/// assert_eq!(entry.device_id, "laptop");
/// assert_eq!(entry.filename, None);
/// assert_eq!(entry.event_data, Some(json!({"count": 3})));
/// assert!(entry.created_at > 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct LogEntry {
    /// Identity of the installation that produced the entry.
    pub device_id: String,

    /// Path of the file the buffer belongs to.
    #[serde(default)]
    pub filename: Option<String>,

    /// Milliseconds since the Unix epoch, taken when the entry was built.
    pub created_at: u64,

    pub event_type: EventType,

    /// Optional payload: `{"count": n}` for size deltas, a list of
    /// [`CursorSpan`]s for cursor changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_data: Option<Value>,
}

impl LogEntry {
    /// Create an unattributed entry stamped with the current time.
    pub fn new(device_id: &str, event_type: EventType, event_data: Option<Value>) -> Self {
        LogEntry {
            device_id: device_id.to_string(),
            filename: None,
            created_at: now_millis(),
            event_type,
            event_data,
        }
    }

    /// Attribute the entry to `filename`.
    pub(crate) fn stamped(mut self, filename: &str) -> Self {
        self.filename = Some(filename.to_string());
        self
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// A clock set before the epoch yields 0 instead of failing the callback.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
