//! The view-handle surface the translator needs from the host editor.

use crate::buffer::BufferId;
use crate::entry::CursorSpan;

/// Host-assigned view identifier. A buffer may be shown by several views.
pub type ViewId = u64;

/// A selection region as two character offsets. `a` is the anchor, `b` the
/// caret; either may be the larger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub a: u64,
    pub b: u64,
}

impl Region {
    pub fn new(a: u64, b: u64) -> Self {
        Region { a, b }
    }

    pub fn to_tuple(self) -> (u64, u64) {
        (self.a, self.b)
    }
}

/// Read-only access to a host view handle.
///
/// Implemented by the editor integration over its native view type.
pub trait HostView {
    /// Identifier of this view.
    fn id(&self) -> ViewId;

    /// Identifier of the buffer shown in this view.
    fn buffer_id(&self) -> BufferId;

    /// Path of the backing file, `None` for an unsaved buffer.
    fn file_name(&self) -> Option<String>;

    /// Current size of the buffer.
    fn size(&self) -> u64;

    /// Ids of every view open in this view's window, or `None` when the
    /// view has no window.
    fn window_view_ids(&self) -> Option<Vec<ViewId>>;

    /// Current selection regions.
    fn selection(&self) -> Vec<Region>;

    /// Convert a character offset into `(row, column)`.
    fn rowcol(&self, point: u64) -> (u64, u64);
}

/// Whether `view` is a real file tab rather than a panel, palette or preview.
///
/// A view is a file buffer when it has a window and appears among that
/// window's views.
pub fn is_file_buffer<V: HostView + ?Sized>(view: &V) -> bool {
    match view.window_view_ids() {
        Some(ids) => ids.contains(&view.id()),
        None => false,
    }
}

/// Raw selection as `(a, b)` offset pairs.
pub fn selection_tuples<V: HostView + ?Sized>(view: &V) -> Vec<(u64, u64)> {
    view.selection().into_iter().map(Region::to_tuple).collect()
}

/// Selection as `((start_row, start_col), (end_row, end_col))` spans.
pub fn selection_coords<V: HostView + ?Sized>(view: &V) -> Vec<CursorSpan> {
    selection_tuples(view)
        .into_iter()
        .map(|(a, b)| (view.rowcol(a), view.rowcol(b)))
        .collect()
}
