#![allow(dead_code)]

use editlog::{BufferId, BufferRegistry, EventTranslator, HostView, MemorySink, Region, ViewId};

/// Characters per line in the fake text layout used by `rowcol`.
pub const LINE_WIDTH: u64 = 80;

/// A scripted host view.
#[derive(Debug, Clone)]
pub struct FakeView {
    pub id: ViewId,
    pub buffer_id: BufferId,
    pub file_name: Option<String>,
    pub size: u64,
    pub window: Option<Vec<ViewId>>,
    pub selection: Vec<Region>,
}

impl FakeView {
    /// A view that is a tab of its window.
    pub fn tab(id: ViewId, buffer_id: BufferId, file_name: Option<&str>) -> Self {
        FakeView {
            id,
            buffer_id,
            file_name: file_name.map(str::to_string),
            size: 0,
            window: Some(vec![id]),
            selection: Vec::new(),
        }
    }

    /// A view with a window that does not list it, like a command palette.
    pub fn palette(id: ViewId, buffer_id: BufferId) -> Self {
        FakeView {
            id,
            buffer_id,
            file_name: None,
            size: 0,
            window: Some(vec![]),
            selection: Vec::new(),
        }
    }

    /// A view with no window at all.
    pub fn detached(id: ViewId, buffer_id: BufferId) -> Self {
        FakeView {
            window: None,
            ..FakeView::palette(id, buffer_id)
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_selection(mut self, selection: Vec<Region>) -> Self {
        self.selection = selection;
        self
    }
}

impl HostView for FakeView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn buffer_id(&self) -> BufferId {
        self.buffer_id
    }

    fn file_name(&self) -> Option<String> {
        self.file_name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn window_view_ids(&self) -> Option<Vec<ViewId>> {
        self.window.clone()
    }

    fn selection(&self) -> Vec<Region> {
        self.selection.clone()
    }

    fn rowcol(&self, point: u64) -> (u64, u64) {
        (point / LINE_WIDTH, point % LINE_WIDTH)
    }
}

pub fn translator() -> EventTranslator<MemorySink> {
    EventTranslator::new(BufferRegistry::new("test-device"), MemorySink::new())
}
