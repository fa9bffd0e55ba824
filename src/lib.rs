//! Editor activity logging.
//!
//! Host editor callbacks arrive keyed by transient buffer ids. `editlog`
//! maps them onto per-buffer [`BufferState`]s, derives semantic events
//! (opened, activated, insert, delete, cursor_changed, ...) from raw size
//! and selection changes, holds back entries of unsaved buffers until their
//! filename is known, and hands every attributed [`LogEntry`] to a
//! [`LogSink`].

mod buffer;
mod config;
mod entry;
mod error;
pub mod host;
mod registry;
mod sink;
mod translator;

pub use buffer::{BufferId, BufferState, DEFAULT_DEBUG_TAIL, PendingLogBuffer};
pub use config::Config;
pub use entry::{CursorSpan, EventType, LogEntry, now_millis};
pub use error::{ConfigError, LogError};
pub use host::{HostView, Region, ViewId, is_file_buffer, selection_coords};
pub use registry::BufferRegistry;
pub use sink::{JsonlSink, LogSink, MemorySink, read_jsonl};
pub use translator::{CallbackKind, EventTranslator, SurfaceRoute};
