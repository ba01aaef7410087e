//! Grid snapshot persistence through the `Storage` port.

use super::{GroupSnapshot, WorkbenchInner};
use crate::kernel::services::ports::StorageError;
use crate::models::{Grid, GridState};

type Snapshot = GridState<GroupSnapshot>;

pub(super) fn save(inner: &WorkbenchInner) {
    if inner.restoring.get() {
        return;
    }
    let Some(state) = inner.grid_state() else {
        return;
    };
    let config = &inner.services.config;
    let result = serde_json::to_string(&state)
        .map_err(StorageError::from)
        .and_then(|json| {
            inner
                .services
                .storage
                .set(&config.storage_namespace, &config.grid_key, &json)
        });
    if let Err(e) = result {
        tracing::error!(error = %e, "failed to persist workbench layout");
    }
}

/// Reads the persisted grid. Anything unreadable yields the default
/// single empty group.
pub(super) fn load(inner: &WorkbenchInner) -> Snapshot {
    let config = &inner.services.config;
    if !config.restore_on_startup {
        return Snapshot::default();
    }
    let fallback = serde_json::to_string(&Snapshot::default()).unwrap_or_default();
    let raw = inner
        .services
        .storage
        .get(&config.storage_namespace, &config.grid_key, &fallback);
    match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "persisted workbench layout is malformed");
            Snapshot::default()
        }
    }
}

/// Rebuilds groups and grid from storage. Writes triggered while the
/// groups replay their tabs are suppressed.
pub(super) async fn restore(inner: &WorkbenchInner) {
    inner.restoring.set(true);

    let previous: Vec<_> = inner.groups.borrow_mut().drain(..).collect();
    inner.group_subscriptions.borrow_mut().clear();
    *inner.current.borrow_mut() = None;
    for group in previous {
        group.release();
    }

    let state = load(inner);
    let mut pending = Vec::new();
    let grid = Grid::from_state(state, |snapshot| {
        let group = inner.create_group();
        pending.push((group.clone(), snapshot));
        group
    });
    for (node, group) in grid.items() {
        group.set_grid_node(node);
    }
    *inner.grid.borrow_mut() = Some(grid);

    let first = inner.groups.borrow().first().cloned();
    if let Some(first) = first {
        inner.set_current_group(&first);
    }

    for (group, snapshot) in pending {
        group.restore_state(snapshot).await;
    }
    inner.restoring.set(false);
    tracing::debug!(groups = inner.groups.borrow().len(), "restored workbench layout");
}
