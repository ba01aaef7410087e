//! Workbench-scoped notifications shared by every group.

use std::rc::Rc;

use super::EditorGroup;
use crate::core::Emitter;
use crate::kernel::services::ports::{CursorStatus, TextRange};
use crate::models::{GridNodeId, OpenType, Resource};

#[derive(Clone)]
pub struct GroupOpened {
    pub group: EditorGroup,
    pub resource: Rc<Resource>,
}

/// Transition of a group's current resource/open-type pair.
#[derive(Clone)]
pub struct GroupChanged {
    pub group: EditorGroup,
    pub old_resource: Option<Rc<Resource>>,
    pub old_open_type: Option<OpenType>,
    pub new_resource: Option<Rc<Resource>>,
    pub new_open_type: Option<OpenType>,
}

#[derive(Clone)]
pub struct GroupIndexChanged {
    pub group: EditorGroup,
    pub index: usize,
}

/// Selection moved in the editor currently showing `resource`.
#[derive(Clone)]
pub struct EditorSelectionChanged {
    pub group: EditorGroup,
    pub resource: Rc<Resource>,
    pub selections: Vec<TextRange>,
    pub source: String,
}

#[derive(Clone)]
pub struct EditorVisibleRangesChanged {
    pub group: EditorGroup,
    pub resource: Rc<Resource>,
    pub visible_ranges: Vec<TextRange>,
}

#[derive(Clone)]
pub struct EditorConfigurationChanged {
    pub group: EditorGroup,
    pub resource: Rc<Resource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridResize {
    pub node: GridNodeId,
}

#[derive(Default)]
pub struct WorkbenchEvents {
    /// The current group's resource changed, or another group became
    /// current. Resource changes inside non-current groups only surface
    /// through `group_changed`.
    pub active_resource_changed: Emitter<Option<Rc<Resource>>>,
    /// Only the current group's cursor moves are re-fired here.
    pub cursor_changed: Emitter<CursorStatus>,
    pub group_opened: Emitter<GroupOpened>,
    pub group_changed: Emitter<GroupChanged>,
    pub group_index_changed: Emitter<GroupIndexChanged>,
    /// Editor notifications below fire only while the emitting editor is
    /// the one rendering its group (code editor in code mode, the diff's
    /// modified side in diff mode).
    pub editor_selection_changed: Emitter<EditorSelectionChanged>,
    pub editor_visible_ranges_changed: Emitter<EditorVisibleRangesChanged>,
    pub editor_configuration_changed: Emitter<EditorConfigurationChanged>,
    pub grid_resize: Emitter<GridResize>,
    pub group_created: Emitter<EditorGroup>,
}
