//! Workbench engine: owns the groups and the grid, routes opens, tracks the
//! current group and drives persistence.

mod persistence;

use compact_str::CompactString;
use rand::Rng;
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tokio::sync::OnceCell;

use crate::core::{Gate, Subscription};
use crate::kernel::group::{
    EditorGroup, EditorKind, GridResize, GroupHost, GroupIndexChanged, OpenOptions, OpenedResource,
    SplitAction, WorkbenchEvents,
};
use crate::kernel::services::ports::CodeEditor;
use crate::kernel::services::WorkbenchServices;
use crate::models::{Grid, GridError, GridNodeId, GridState, Resource, SplitDirection, Uri};

pub use crate::kernel::group::GroupSnapshot;

const GROUP_NAME_LEN: usize = 5;

#[derive(Clone)]
pub struct Workbench {
    inner: Rc<WorkbenchInner>,
}

/// Non-owning handle, for listeners that must not keep the engine alive.
#[derive(Clone)]
pub struct WeakWorkbench {
    inner: Weak<WorkbenchInner>,
}

impl WeakWorkbench {
    pub fn upgrade(&self) -> Option<Workbench> {
        self.inner.upgrade().map(|inner| Workbench { inner })
    }
}

struct WorkbenchInner {
    this: Weak<WorkbenchInner>,
    services: WorkbenchServices,
    events: Rc<WorkbenchEvents>,
    groups: RefCell<Vec<EditorGroup>>,
    current: RefCell<Option<EditorGroup>>,
    grid: RefCell<Option<Grid<EditorGroup>>>,
    /// Engine-side listeners per group name, dropped with the group.
    group_subscriptions: RefCell<FxHashMap<CompactString, Vec<Subscription>>>,
    restoring: Cell<bool>,
    initialized: OnceCell<()>,
    contributions_ready: Gate,
    ready: Gate,
}

impl Workbench {
    pub fn new(services: WorkbenchServices) -> Self {
        let inner = Rc::new_cyclic(|this| WorkbenchInner {
            this: this.clone(),
            services,
            events: Rc::new(WorkbenchEvents::default()),
            groups: RefCell::new(Vec::new()),
            current: RefCell::new(None),
            grid: RefCell::new(None),
            group_subscriptions: RefCell::new(FxHashMap::default()),
            restoring: Cell::new(true),
            initialized: OnceCell::new(),
            contributions_ready: Gate::new(),
            ready: Gate::new(),
        });
        Self { inner }
    }

    pub fn downgrade(&self) -> WeakWorkbench {
        WeakWorkbench {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn events(&self) -> &WorkbenchEvents {
        &self.inner.events
    }

    pub fn services(&self) -> &WorkbenchServices {
        &self.inner.services
    }

    /// Every render surface has registered; initialization may restore.
    pub fn signal_contributions_ready(&self) {
        self.inner.contributions_ready.open();
    }

    /// One-time setup shared by all callers: waits for contributions, then
    /// restores the persisted grid.
    pub async fn initialize(&self) {
        self.inner
            .initialized
            .get_or_init(|| async {
                self.inner.contributions_ready.wait().await;
                self.restore_state().await;
                self.inner.ready.open();
                tracing::info!(groups = self.inner.groups.borrow().len(), "workbench ready");
            })
            .await;
    }

    pub fn is_ready(&self) -> bool {
        self.inner.ready.is_open()
    }

    pub async fn wait_ready(&self) {
        self.inner.ready.wait().await;
    }

    /// Opens `uri` in the current group, or in the group at
    /// `options.group_index`. An index at or past the group count splits the
    /// current group to the right.
    pub async fn open(&self, uri: &Uri, mut options: OpenOptions) -> Option<OpenedResource> {
        self.initialize().await;
        self.inner.services.workspace.set_most_recently_opened_file(uri);

        let current = self.current_group()?;
        let target = match options.group_index.take() {
            Some(index) => match self.inner.groups.borrow().get(index).cloned() {
                Some(group) => group,
                None => {
                    options.split = Some(SplitAction::Right);
                    current
                }
            },
            None => current,
        };
        target.open(uri, options).await
    }

    pub async fn open_uris(&self, uris: &[Uri]) {
        self.initialize().await;
        if let Some(group) = self.current_group() {
            group.open_uris(uris).await;
        }
    }

    /// Closes `uri` in every group holding it, or every group entirely.
    /// A group that declines is skipped; the others still close.
    pub async fn close_all(&self, uri: Option<&Uri>) {
        let groups = self.groups();
        for group in groups {
            match uri {
                Some(uri) => {
                    group.close(uri).await;
                }
                None => {
                    group.close_all().await;
                }
            }
        }
    }

    pub fn create_group(&self) -> EditorGroup {
        self.inner.create_group()
    }

    pub fn remove_group(&self, group: &EditorGroup) {
        self.inner.remove_group(group);
    }

    pub fn set_current_group(&self, group: &EditorGroup) {
        self.inner.set_current_group(group);
    }

    pub fn groups(&self) -> Vec<EditorGroup> {
        self.inner.groups.borrow().clone()
    }

    pub fn group(&self, name: &str) -> Option<EditorGroup> {
        self.inner
            .groups
            .borrow()
            .iter()
            .find(|group| group.name() == name)
            .cloned()
    }

    pub fn current_group(&self) -> Option<EditorGroup> {
        self.inner.current.borrow().clone()
    }

    pub fn current_resource(&self) -> Option<Rc<Resource>> {
        self.current_group()?.current_resource()
    }

    pub fn current_editor_kind(&self) -> Option<EditorKind> {
        self.current_group()?.current_editor_kind()
    }

    pub fn current_code_editor(&self) -> Option<Rc<dyn CodeEditor>> {
        self.current_group()?.current_code_editor()
    }

    pub fn current_editor(&self) -> Option<Rc<dyn CodeEditor>> {
        self.current_group()?.current_editor()
    }

    pub fn grid_root(&self) -> Option<GridNodeId> {
        self.inner.grid.borrow().as_ref().map(Grid::root)
    }

    /// Groups in grid order (depth-first, left to right).
    pub fn grid_groups(&self) -> Vec<EditorGroup> {
        self.inner
            .grid
            .borrow()
            .as_ref()
            .map(|grid| grid.items().map(|(_, group)| group.clone()).collect())
            .unwrap_or_default()
    }

    /// Runs `f` against the grid, if one has been built.
    pub fn with_grid<R>(&self, f: impl FnOnce(&Grid<EditorGroup>) -> R) -> Option<R> {
        self.inner.grid.borrow().as_ref().map(f)
    }

    /// Resizes a split and re-layouts every group under it.
    pub fn resize_split(&self, split: GridNodeId, weights: Vec<f64>) -> Result<(), GridError> {
        let leaves = {
            let mut grid = self.inner.grid.borrow_mut();
            let grid = grid.as_mut().ok_or(GridError::InvalidNodeId)?;
            grid.set_weights(split, weights)?;
            grid.leaves_under(split)
        };
        for node in leaves {
            self.inner.events.grid_resize.fire(&GridResize { node });
        }
        self.inner.save_state();
        Ok(())
    }

    /// Serializable snapshot of the current layout.
    pub fn grid_state(&self) -> Option<GridState<GroupSnapshot>> {
        self.inner.grid_state()
    }

    pub fn save_state(&self) {
        self.inner.save_state();
    }

    pub async fn restore_state(&self) {
        persistence::restore(&self.inner).await;
    }
}

impl WorkbenchInner {
    fn host(&self) -> Weak<dyn GroupHost> {
        self.this.clone()
    }

    fn generate_group_name(&self) -> CompactString {
        let mut rng = rand::thread_rng();
        loop {
            let name: CompactString = (0..GROUP_NAME_LEN)
                .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
                .collect();
            if !self.groups.borrow().iter().any(|group| group.name() == name.as_str()) {
                return name;
            }
        }
    }

    fn create_group(&self) -> EditorGroup {
        let name = self.generate_group_name();
        let group = EditorGroup::new(
            name.clone(),
            self.host(),
            self.services.clone(),
            Rc::clone(&self.events),
        );
        self.groups.borrow_mut().push(group.clone());

        let this = self.this.clone();
        let persist = group.on_state_change(move |_| {
            if let Some(inner) = this.upgrade() {
                inner.save_state();
            }
        });
        let this = self.this.clone();
        let name_for_cursor = name.clone();
        let cursor = group.on_cursor_change(move |status| {
            let Some(inner) = this.upgrade() else {
                return;
            };
            let is_current = inner
                .current
                .borrow()
                .as_ref()
                .is_some_and(|current| current.name() == name_for_cursor.as_str());
            if is_current {
                inner.events.cursor_changed.fire(status);
            }
        });
        self.group_subscriptions
            .borrow_mut()
            .insert(name.clone(), vec![persist, cursor]);

        tracing::debug!(group = %name, "created editor group");
        self.events.group_created.fire(&group);
        group
    }

    fn remove_group(&self, group: &EditorGroup) {
        let index = {
            let mut groups = self.groups.borrow_mut();
            let Some(index) = groups.iter().position(|g| g == group) else {
                return;
            };
            groups.remove(index);
            index
        };
        let subscriptions = self.group_subscriptions.borrow_mut().remove(group.name());
        drop(subscriptions);

        let was_current = self.current.borrow().as_ref() == Some(group);
        if was_current {
            let first = self.groups.borrow().first().cloned();
            match first {
                Some(first) => self.set_current_group(&first),
                None => *self.current.borrow_mut() = None,
            }
        }

        let remaining = self.groups.borrow().clone();
        for (i, group) in remaining.into_iter().enumerate().skip(index) {
            self.events
                .group_index_changed
                .fire(&GroupIndexChanged { group, index: i });
        }
    }

    fn set_current_group(&self, group: &EditorGroup) {
        if self.current.borrow().as_ref() == Some(group) {
            return;
        }
        *self.current.borrow_mut() = Some(group.clone());
        self.events
            .active_resource_changed
            .fire(&group.current_resource());
    }

    fn grid_state(&self) -> Option<GridState<GroupSnapshot>> {
        self.grid
            .borrow()
            .as_ref()
            .map(|grid| grid.serialize(EditorGroup::snapshot))
    }

    fn save_state(&self) {
        persistence::save(self);
    }
}

impl GroupHost for WorkbenchInner {
    fn groups(&self) -> Vec<EditorGroup> {
        self.groups.borrow().clone()
    }

    fn is_current_group(&self, group: &EditorGroup) -> bool {
        self.current.borrow().as_ref() == Some(group)
    }

    fn set_current_group(&self, group: &EditorGroup) {
        WorkbenchInner::set_current_group(self, group);
    }

    fn split_group(
        &self,
        anchor: &EditorGroup,
        direction: SplitDirection,
        before: bool,
    ) -> Result<EditorGroup, GridError> {
        let node = anchor.grid_node().ok_or(GridError::InvalidNodeId)?;
        let group = self.create_group();
        let placed = {
            let mut grid = self.grid.borrow_mut();
            match grid.as_mut() {
                Some(grid) => grid.split(node, direction, group.clone(), before),
                None => Err(GridError::InvalidNodeId),
            }
        };
        match placed {
            Ok(leaf) => {
                group.set_grid_node(leaf);
                Ok(group)
            }
            Err(e) => {
                self.remove_group(&group);
                group.release();
                Err(e)
            }
        }
    }

    fn is_sole_group(&self, group: &EditorGroup) -> bool {
        let Some(node) = group.grid_node() else {
            return true;
        };
        self.grid
            .borrow()
            .as_ref()
            .map(|grid| grid.is_sole_leaf(node))
            .unwrap_or(true)
    }

    fn detach_group(&self, group: &EditorGroup) {
        if let Some(node) = group.grid_node() {
            let removed = self.grid.borrow_mut().as_mut().map(|grid| grid.remove(node));
            if let Some(Err(e)) = removed {
                tracing::warn!(group = %group.name(), error = %e, "group leaf not detached");
            }
        }
        self.remove_group(group);
        self.save_state();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/workbench.rs"]
mod tests;
