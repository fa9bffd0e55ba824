use crate::buffer::{BufferId, BufferState, DEFAULT_DEBUG_TAIL};
use crate::config::Config;
use crate::sink::LogSink;
use std::collections::HashMap;

/// Maps host buffer ids to their [`BufferState`].
///
/// States are created lazily on first reference and kept for the life of
/// the registry, so callbacks arriving after a close still land on the same
/// state until the host reuses the id.
///
/// # Examples
///
/// ```
/// use editlog::{BufferRegistry, MemorySink};
///
/// let mut sink = MemorySink::new();
/// let mut registry = BufferRegistry::new("laptop");
///
/// let (_, created) = registry.get_or_create(7, None, &mut sink);
/// assert!(created);
///
/// let (buffer, created) = registry.get_or_create(7, Some("notes.md"), &mut sink);
/// assert!(!created);
/// assert_eq!(buffer.filename(), Some("notes.md"));
/// ```
#[derive(Debug, Clone)]
pub struct BufferRegistry {
    device_id: String,
    debug_tail: usize,
    buffers: HashMap<BufferId, BufferState>,
}

impl BufferRegistry {
    pub fn new(device_id: impl Into<String>) -> Self {
        BufferRegistry {
            device_id: device_id.into(),
            debug_tail: DEFAULT_DEBUG_TAIL,
            buffers: HashMap::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        BufferRegistry {
            device_id: config.device_id.clone(),
            debug_tail: config.debug_tail,
            buffers: HashMap::new(),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Look up `buffer_id`, creating its state if this is the first sighting.
    ///
    /// Returns the state and whether it was just created. When an existing
    /// state has no filename yet and `filename` is known, the filename is
    /// resolved (flushing pending entries to `sink`) before returning.
    pub fn get_or_create<S: LogSink + ?Sized>(
        &mut self,
        buffer_id: BufferId,
        filename: Option<&str>,
        sink: &mut S,
    ) -> (&mut BufferState, bool) {
        let filename = filename.filter(|f| !f.is_empty());
        let mut created = false;

        let buffer = self.buffers.entry(buffer_id).or_insert_with(|| {
            created = true;
            log::debug!("editlog: new buffer {buffer_id} ({filename:?})");
            BufferState::new(buffer_id, &self.device_id, filename.map(str::to_string))
                .with_debug_tail(self.debug_tail)
        });

        if let Some(name) = filename {
            if buffer.filename().is_none() {
                buffer.resolve_filename(name, sink);
            }
        }

        (buffer, created)
    }

    pub fn get(&self, buffer_id: BufferId) -> Option<&BufferState> {
        self.buffers.get(&buffer_id)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BufferState> {
        self.buffers.values()
    }
}
