//! Editor groups: ordered tabs, the active resource/open-type pair, and the
//! open/close/move operations over them.
//!
//! A group is a cheap handle (`Rc`) so the engine, the grid and in-flight
//! operations can all hold it. Interior state is only borrowed between await
//! points, never across one.

mod close;
mod error;
mod events;
mod host;
mod open;
mod options;
mod state;

pub use error::EditorError;
pub use events::{
    EditorConfigurationChanged, EditorSelectionChanged, EditorVisibleRangesChanged, GridResize,
    GroupChanged, GroupIndexChanged, GroupOpened, WorkbenchEvents,
};
pub use host::GroupHost;
pub use options::{DragOverPosition, OpenOptions, SplitAction};
pub use state::{CurrentState, GroupSnapshot};

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tokio::sync::OnceCell;

use crate::core::{Emitter, Gate, Subscription};
use crate::kernel::services::ports::{CodeEditor, CursorStatus, DiffEditor};
use crate::kernel::services::WorkbenchServices;
use crate::models::{GridNodeId, OpenType, Resource, Uri};
use state::GroupState;

/// Result of a successful open.
#[derive(Clone, Debug)]
pub struct OpenedResource {
    pub group: EditorGroup,
    pub resource: Rc<Resource>,
}

/// Which native editor currently renders the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    Code,
    Diff,
}

type PendingOpen = Rc<OnceCell<Option<OpenedResource>>>;

#[derive(Clone)]
pub struct EditorGroup {
    inner: Rc<GroupInner>,
}

struct GroupInner {
    name: CompactString,
    host: Weak<dyn GroupHost>,
    services: WorkbenchServices,
    events: Rc<WorkbenchEvents>,
    state: RefCell<GroupState>,
    opening: RefCell<FxHashMap<String, PendingOpen>>,
    code_editor: RefCell<Option<Rc<dyn CodeEditor>>>,
    diff_editor: RefCell<Option<Rc<dyn DiffEditor>>>,
    code_editor_ready: Gate,
    diff_editor_ready: Gate,
    grid_node: Cell<Option<GridNodeId>>,
    cursor_changed: Emitter<CursorStatus>,
    state_changed: Emitter<GroupSnapshot>,
    subscriptions: RefCell<Vec<Subscription>>,
    disposed: Cell<bool>,
}

impl EditorGroup {
    pub fn new(
        name: CompactString,
        host: Weak<dyn GroupHost>,
        services: WorkbenchServices,
        events: Rc<WorkbenchEvents>,
    ) -> Self {
        let group = Self {
            inner: Rc::new(GroupInner {
                name,
                host,
                services,
                events,
                state: RefCell::new(GroupState::default()),
                opening: RefCell::new(FxHashMap::default()),
                code_editor: RefCell::new(None),
                diff_editor: RefCell::new(None),
                code_editor_ready: Gate::new(),
                diff_editor_ready: Gate::new(),
                grid_node: Cell::new(None),
                cursor_changed: Emitter::new(),
                state_changed: Emitter::new(),
                subscriptions: RefCell::new(Vec::new()),
                disposed: Cell::new(false),
            }),
        };

        let weak = Rc::downgrade(&group.inner);
        let resize = group.inner.events.grid_resize.subscribe(move |event| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.grid_node.get() == Some(event.node) {
                EditorGroup { inner }.layout_editors();
            }
        });
        group.inner.subscriptions.borrow_mut().push(resize);
        group
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Position among the workbench's groups.
    pub fn index(&self) -> Option<usize> {
        self.host()
            .ok()?
            .groups()
            .iter()
            .position(|group| group == self)
    }

    pub fn grid_node(&self) -> Option<GridNodeId> {
        self.inner.grid_node.get()
    }

    pub(crate) fn set_grid_node(&self, node: GridNodeId) {
        self.inner.grid_node.set(Some(node));
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    pub fn resources(&self) -> Vec<Rc<Resource>> {
        self.inner.state.borrow().resources.clone()
    }

    pub fn resource_uris(&self) -> Vec<Uri> {
        self.inner
            .state
            .borrow()
            .resources
            .iter()
            .map(|r| r.uri.clone())
            .collect()
    }

    pub fn find_resource(&self, uri: &Uri) -> Option<Rc<Resource>> {
        self.inner.state.borrow().find(uri)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.borrow().resources.is_empty()
    }

    pub fn current_state(&self) -> Option<CurrentState> {
        self.inner.state.borrow().current.clone()
    }

    pub fn current_resource(&self) -> Option<Rc<Resource>> {
        self.inner
            .state
            .borrow()
            .current
            .as_ref()
            .map(|c| Rc::clone(&c.resource))
    }

    pub fn current_open_type(&self) -> Option<OpenType> {
        self.inner
            .state
            .borrow()
            .current
            .as_ref()
            .map(|c| c.open_type.clone())
    }

    /// Candidates computed for the last displayed resource.
    pub fn available_open_types(&self) -> Vec<OpenType> {
        self.inner.state.borrow().available_open_types.clone()
    }

    pub fn active_component_resources(&self, component_id: &str) -> Vec<Rc<Resource>> {
        self.inner
            .state
            .borrow()
            .active_components
            .get(component_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_code_editor_mode(&self) -> bool {
        matches!(self.current_open_type(), Some(OpenType::Code))
    }

    pub fn is_diff_editor_mode(&self) -> bool {
        matches!(self.current_open_type(), Some(OpenType::Diff))
    }

    pub fn is_component_mode(&self) -> bool {
        matches!(self.current_open_type(), Some(OpenType::Component { .. }))
    }

    pub fn current_editor_kind(&self) -> Option<EditorKind> {
        match self.current_open_type()? {
            OpenType::Code => Some(EditorKind::Code),
            OpenType::Diff => Some(EditorKind::Diff),
            _ => None,
        }
    }

    /// The editor the group currently renders into: the code editor in code
    /// mode, the diff's modified side in diff mode.
    pub fn current_editor(&self) -> Option<Rc<dyn CodeEditor>> {
        match self.current_editor_kind()? {
            EditorKind::Code => self.inner.code_editor.borrow().clone(),
            EditorKind::Diff => self
                .inner
                .diff_editor
                .borrow()
                .as_ref()
                .map(|diff| diff.modified_editor()),
        }
    }

    /// The code editor, if it is what the group currently shows.
    pub fn current_code_editor(&self) -> Option<Rc<dyn CodeEditor>> {
        if self.is_code_editor_mode() {
            self.inner.code_editor.borrow().clone()
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> GroupSnapshot {
        self.inner.state.borrow().snapshot()
    }

    /// Installs the native code editor and releases opens waiting on it.
    pub fn attach_code_editor(&self, editor: Rc<dyn CodeEditor>) {
        editor.layout();
        let weak = Rc::downgrade(&self.inner);
        let cursor = editor.on_cursor_change(Box::new(move |status| {
            if let Some(inner) = weak.upgrade() {
                inner.cursor_changed.fire(status);
            }
        }));
        let forwarded = self.forward_editor_events(editor.as_ref(), EditorKind::Code);
        {
            let mut subscriptions = self.inner.subscriptions.borrow_mut();
            subscriptions.push(cursor);
            subscriptions.extend(forwarded);
        }
        *self.inner.code_editor.borrow_mut() = Some(editor);
        self.inner.code_editor_ready.open();
    }

    pub fn attach_diff_editor(&self, editor: Rc<dyn DiffEditor>) {
        editor.layout();
        let modified = editor.modified_editor();
        let forwarded = self.forward_editor_events(modified.as_ref(), EditorKind::Diff);
        self.inner.subscriptions.borrow_mut().extend(forwarded);
        *self.inner.diff_editor.borrow_mut() = Some(editor);
        self.inner.diff_editor_ready.open();
    }

    pub fn layout_editors(&self) {
        let code = self.inner.code_editor.borrow().clone();
        if let Some(editor) = code {
            editor.layout();
        }
        let diff = self.inner.diff_editor.borrow().clone();
        if let Some(editor) = diff {
            editor.layout();
        }
    }

    /// Makes this the workbench's current group.
    pub fn gain_focus(&self) {
        if let Ok(host) = self.host() {
            host.set_current_group(self);
        }
    }

    pub fn focus(&self) {
        self.gain_focus();
        match self.current_editor_kind() {
            Some(EditorKind::Code) => {
                let editor = self.inner.code_editor.borrow().clone();
                if let Some(editor) = editor {
                    editor.focus();
                }
            }
            Some(EditorKind::Diff) => {
                let editor = self.inner.diff_editor.borrow().clone();
                if let Some(editor) = editor {
                    editor.focus();
                }
            }
            None => {}
        }
    }

    /// Cursor moves of this group's code editor, plus a position-less status
    /// whenever a custom component is displayed.
    pub fn on_cursor_change(&self, listener: impl Fn(&CursorStatus) + 'static) -> Subscription {
        self.inner.cursor_changed.subscribe(listener)
    }

    /// Fires with the new snapshot after every tab or current-state mutation.
    pub fn on_state_change(&self, listener: impl Fn(&GroupSnapshot) + 'static) -> Subscription {
        self.inner.state_changed.subscribe(listener)
    }

    /// Detaches from the grid and the workbench, then drops all listeners.
    pub fn dispose(&self) {
        if self.is_disposed() {
            return;
        }
        tracing::debug!(group = %self.name(), "dispose editor group");
        if let Ok(host) = self.host() {
            host.detach_group(self);
        }
        self.release();
    }

    /// Tears down listeners without touching the workbench.
    pub(crate) fn release(&self) {
        self.inner.disposed.set(true);
        let subscriptions: Vec<Subscription> =
            self.inner.subscriptions.borrow_mut().drain(..).collect();
        drop(subscriptions);
    }

    /// Re-fires `editor`'s selection, visible-range and configuration
    /// changes at workbench scope while the group renders in `kind`.
    fn forward_editor_events(
        &self,
        editor: &dyn CodeEditor,
        kind: EditorKind,
    ) -> Vec<Subscription> {
        let weak = Rc::downgrade(&self.inner);
        let showing = move || -> Option<(EditorGroup, Rc<Resource>)> {
            let group = EditorGroup {
                inner: weak.upgrade()?,
            };
            if group.current_editor_kind() != Some(kind) {
                return None;
            }
            let resource = group.current_resource()?;
            Some((group, resource))
        };

        let showing_selection = showing.clone();
        let selection = editor.on_selection_change(Box::new(move |change| {
            if let Some((group, resource)) = showing_selection() {
                let events = Rc::clone(&group.inner.events);
                events.editor_selection_changed.fire(&EditorSelectionChanged {
                    group,
                    resource,
                    selections: change.selections.clone(),
                    source: change.source.clone(),
                });
            }
        }));
        let showing_visible = showing.clone();
        let visible = editor.on_visible_ranges_change(Box::new(move |ranges| {
            if let Some((group, resource)) = showing_visible() {
                let events = Rc::clone(&group.inner.events);
                events
                    .editor_visible_ranges_changed
                    .fire(&EditorVisibleRangesChanged {
                        group,
                        resource,
                        visible_ranges: ranges.to_vec(),
                    });
            }
        }));
        let configuration = editor.on_configuration_change(Box::new(move || {
            if let Some((group, resource)) = showing() {
                let events = Rc::clone(&group.inner.events);
                events
                    .editor_configuration_changed
                    .fire(&EditorConfigurationChanged { group, resource });
            }
        }));
        vec![selection, visible, configuration]
    }

    fn host(&self) -> Result<Rc<dyn GroupHost>, EditorError> {
        self.inner.host.upgrade().ok_or(EditorError::Detached)
    }

    fn is_current(&self) -> bool {
        self.host()
            .map(|host| host.is_current_group(self))
            .unwrap_or(false)
    }

    fn is_sole_group(&self) -> bool {
        self.host()
            .map(|host| host.is_sole_group(self))
            .unwrap_or(true)
    }

    fn notify_state_changed(&self) {
        let snapshot = self.snapshot();
        self.inner.state_changed.fire(&snapshot);
    }

    /// Swaps the current pair and publishes the transition.
    fn set_current_state(&self, next: Option<CurrentState>) {
        let old = std::mem::replace(&mut self.inner.state.borrow_mut().current, next.clone());
        let (old_resource, old_open_type) = match old {
            Some(CurrentState {
                resource,
                open_type,
            }) => (Some(resource), Some(open_type)),
            None => (None, None),
        };
        let (new_resource, new_open_type) = match next {
            Some(CurrentState {
                resource,
                open_type,
            }) => (Some(resource), Some(open_type)),
            None => (None, None),
        };

        self.inner.events.group_changed.fire(&GroupChanged {
            group: self.clone(),
            old_resource,
            old_open_type,
            new_resource: new_resource.clone(),
            new_open_type,
        });
        if self.is_current() {
            self.inner.events.active_resource_changed.fire(&new_resource);
        }
        self.notify_state_changed();
    }
}

impl PartialEq for EditorGroup {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for EditorGroup {}

impl fmt::Debug for EditorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorGroup")
            .field("name", &self.inner.name)
            .field("tabs", &self.inner.state.borrow().resources.len())
            .field("disposed", &self.inner.disposed.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/group.rs"]
mod tests;
