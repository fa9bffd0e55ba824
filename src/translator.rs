use crate::buffer::BufferId;
use crate::host::{HostView, is_file_buffer, selection_coords};
use crate::registry::BufferRegistry;
use crate::sink::LogSink;

/// The host callbacks the translator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    Activated,
    Deactivated,
    Close,
    PostSave,
    Modified,
    SelectionModified,
}

/// What a callback does when its view is not a file buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRoute {
    /// Report a tool focus change on the last activated file buffer.
    RedirectToLastActivated,
    /// Ignore the callback.
    Drop,
}

impl CallbackKind {
    pub const ALL: [CallbackKind; 6] = [
        CallbackKind::Activated,
        CallbackKind::Deactivated,
        CallbackKind::Close,
        CallbackKind::PostSave,
        CallbackKind::Modified,
        CallbackKind::SelectionModified,
    ];

    /// Focus callbacks also fire for panels and palettes; those are read as
    /// the editor itself gaining or losing focus. Everything else only makes
    /// sense for real files.
    pub const fn surface_route(self) -> SurfaceRoute {
        match self {
            CallbackKind::Activated | CallbackKind::Deactivated => {
                SurfaceRoute::RedirectToLastActivated
            }
            CallbackKind::Close
            | CallbackKind::PostSave
            | CallbackKind::Modified
            | CallbackKind::SelectionModified => SurfaceRoute::Drop,
        }
    }
}

/// Turns host view callbacks into semantic buffer events.
///
/// Owns the [`BufferRegistry`] it is given at construction and the sink
/// every attributed entry is forwarded to. Also remembers the last file
/// buffer that was activated, so focus changes on non-file surfaces can be
/// recorded against it.
///
/// # Examples
///
/// ```
/// use editlog::{BufferId, BufferRegistry, EventTranslator, EventType, HostView, MemorySink, Region, ViewId};
///
/// struct Tab;
///
/// impl HostView for Tab {
///     fn id(&self) -> ViewId { 10 }
///     fn buffer_id(&self) -> BufferId { 1 }
///     fn file_name(&self) -> Option<String> { Some("main.rs".into()) }
///     fn size(&self) -> u64 { 120 }
///     fn window_view_ids(&self) -> Option<Vec<ViewId>> { Some(vec![10]) }
///     fn selection(&self) -> Vec<Region> { vec![] }
///     fn rowcol(&self, point: u64) -> (u64, u64) { (0, point) }
/// }
///
/// let mut translator = EventTranslator::new(BufferRegistry::new("laptop"), MemorySink::new());
/// translator.on_activated(&Tab);
/// translator.on_modified(&Tab);
///
/// assert_eq!(
///     translator.sink().event_types(),
///     vec![EventType::Opened, EventType::Activated, EventType::Insert]
/// );
/// ```
#[derive(Debug)]
pub struct EventTranslator<K: LogSink> {
    registry: BufferRegistry,
    sink: K,
    last_activated: Option<(BufferId, Option<String>)>,
}

impl<K: LogSink> EventTranslator<K> {
    pub fn new(registry: BufferRegistry, sink: K) -> Self {
        EventTranslator {
            registry,
            sink,
            last_activated: None,
        }
    }

    pub fn registry(&self) -> &BufferRegistry {
        &self.registry
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// The most recently activated file buffer and the filename it had then.
    pub fn last_activated(&self) -> Option<(BufferId, Option<&str>)> {
        self.last_activated
            .as_ref()
            .map(|(id, name)| (*id, name.as_deref()))
    }

    pub fn into_parts(self) -> (BufferRegistry, K) {
        (self.registry, self.sink)
    }

    /// Route one host callback.
    ///
    /// Whether `view` is a file buffer is decided afresh on every call,
    /// since a preview can become a real tab.
    pub fn dispatch<V: HostView + ?Sized>(&mut self, kind: CallbackKind, view: &V) {
        if !is_file_buffer(view) {
            match kind.surface_route() {
                SurfaceRoute::RedirectToLastActivated => self.redirect_to_last_activated(kind),
                SurfaceRoute::Drop => {
                    log::trace!("editlog: ignoring {kind:?} on non-file view {}", view.id());
                }
            }
            return;
        }

        let buffer_id = view.buffer_id();
        let filename = view.file_name();
        let (buffer, created) =
            self.registry
                .get_or_create(buffer_id, filename.as_deref(), &mut self.sink);

        match kind {
            CallbackKind::Activated => {
                buffer.on_activated(created, view.size(), &mut self.sink);
                self.last_activated = Some((buffer_id, filename));
            }
            CallbackKind::Deactivated => buffer.on_deactivated(&mut self.sink),
            CallbackKind::Close => buffer.on_close(&mut self.sink),
            CallbackKind::PostSave => buffer.on_post_save(&mut self.sink),
            CallbackKind::Modified => buffer.on_modified(view.size(), &mut self.sink),
            CallbackKind::SelectionModified => {
                buffer.on_cursor_modified(&selection_coords(view), &mut self.sink)
            }
        }
    }

    fn redirect_to_last_activated(&mut self, kind: CallbackKind) {
        let Some((buffer_id, filename)) = self.last_activated.as_ref() else {
            log::trace!("editlog: {kind:?} on non-file view before any buffer was activated");
            return;
        };
        let (buffer, _) = self
            .registry
            .get_or_create(*buffer_id, filename.as_deref(), &mut self.sink);
        match kind {
            CallbackKind::Activated => buffer.on_tool_activated(&mut self.sink),
            CallbackKind::Deactivated => buffer.on_tool_deactivated(&mut self.sink),
            _ => {}
        }
    }

    pub fn on_activated<V: HostView + ?Sized>(&mut self, view: &V) {
        self.dispatch(CallbackKind::Activated, view);
    }

    pub fn on_deactivated<V: HostView + ?Sized>(&mut self, view: &V) {
        self.dispatch(CallbackKind::Deactivated, view);
    }

    pub fn on_close<V: HostView + ?Sized>(&mut self, view: &V) {
        self.dispatch(CallbackKind::Close, view);
    }

    pub fn on_post_save<V: HostView + ?Sized>(&mut self, view: &V) {
        self.dispatch(CallbackKind::PostSave, view);
    }

    pub fn on_modified<V: HostView + ?Sized>(&mut self, view: &V) {
        self.dispatch(CallbackKind::Modified, view);
    }

    pub fn on_selection_modified<V: HostView + ?Sized>(&mut self, view: &V) {
        self.dispatch(CallbackKind::SelectionModified, view);
    }
}
