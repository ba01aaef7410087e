use rustc_hash::FxHashSet;
use std::rc::Rc;

use super::{DragOverPosition, EditorGroup, OpenOptions};
use crate::kernel::services::ports::LocalBoxFuture;
use crate::models::{Resource, Uri};

impl EditorGroup {
    /// Closes one tab. Returns `false` when the tab is absent or the
    /// resource provider declined.
    ///
    /// Closing the current tab activates the tab now at the same index, or
    /// the last one, and waits for that open to finish. An emptied group
    /// that is not the only one left disposes itself.
    pub fn close<'a>(&'a self, uri: &'a Uri) -> LocalBoxFuture<'a, bool> {
        Box::pin(async move {
            let Some(resource) = self.find_resource(uri) else {
                return false;
            };
            if !self.should_close(&resource).await {
                tracing::debug!(group = %self.name(), uri = %uri, "close declined");
                return false;
            }

            let (was_current, next) = {
                let mut state = self.inner.state.borrow_mut();
                let Some(index) = state.position(uri) else {
                    return false;
                };
                let was_current = state.is_current(uri);
                state.resources.remove(index);
                state.forget_component_resource(uri);
                let next = if was_current && !state.resources.is_empty() {
                    let at = index.min(state.resources.len() - 1);
                    Some(state.resources[at].uri.clone())
                } else {
                    None
                };
                (was_current, next)
            };

            if was_current {
                self.set_current_state(None);
            } else {
                self.notify_state_changed();
            }
            if let Some(next) = next {
                self.open(&next, OpenOptions::default()).await;
            }
            if self.is_empty() && !self.is_sole_group() {
                self.dispose();
            }
            true
        })
    }

    /// Closes every tab once all of them are confirmed, then disposes the
    /// group unless it is the last one.
    pub async fn close_all(&self) -> bool {
        for resource in self.resources() {
            if !self.should_close(&resource).await {
                tracing::debug!(group = %self.name(), uri = %resource.uri, "close all declined");
                return false;
            }
        }
        {
            let mut state = self.inner.state.borrow_mut();
            state.resources.clear();
            state.active_components.clear();
        }
        self.set_current_state(None);
        if !self.is_sole_group() {
            self.dispose();
        }
        true
    }

    pub async fn close_to_right(&self, uri: &Uri) -> bool {
        let resources = self.resources();
        let Some(index) = resources.iter().position(|r| r.uri == *uri) else {
            return false;
        };
        self.close_subset(uri, resources[index + 1..].to_vec())
            .await
    }

    pub async fn close_others(&self, uri: &Uri) -> bool {
        let resources = self.resources();
        if !resources.iter().any(|r| r.uri == *uri) {
            return false;
        }
        let others = resources.into_iter().filter(|r| r.uri != *uri).collect();
        self.close_subset(uri, others).await
    }

    /// Confirms then removes `to_close`, and reactivates `anchor`.
    async fn close_subset(&self, anchor: &Uri, to_close: Vec<Rc<Resource>>) -> bool {
        for resource in &to_close {
            if !self.should_close(resource).await {
                tracing::debug!(group = %self.name(), uri = %resource.uri, "close declined");
                return false;
            }
        }

        let closing: FxHashSet<&Uri> = to_close.iter().map(|r| &r.uri).collect();
        let current_closed = {
            let mut state = self.inner.state.borrow_mut();
            state.resources.retain(|r| !closing.contains(&r.uri));
            for uri in &closing {
                state.forget_component_resource(uri);
            }
            state
                .current
                .as_ref()
                .is_some_and(|current| closing.contains(&current.resource.uri))
        };

        if current_closed {
            self.set_current_state(None);
        } else {
            self.notify_state_changed();
        }
        self.open(anchor, OpenOptions::default()).await;
        true
    }

    /// Drag-and-drop of `uri` onto this group.
    ///
    /// Edge positions split. A center drop onto `target` inserts the URI at
    /// the target's index, or moves an existing tab there. When the drag
    /// came from another group, that group closes the URI afterwards.
    pub async fn drop_uri(
        &self,
        uri: &Uri,
        position: DragOverPosition,
        source: Option<&EditorGroup>,
        target: Option<&Uri>,
    ) {
        if let Some(action) = position.split_action() {
            self.split(action, uri, OpenOptions::default()).await;
        } else {
            let target_index = target.and_then(|target| self.inner.state.borrow().position(target));
            match target_index {
                None => {
                    self.open(uri, OpenOptions::default()).await;
                }
                Some(target_index) => {
                    let source_index = self.inner.state.borrow().position(uri);
                    match source_index {
                        None => {
                            self.open(uri, OpenOptions::at_index(target_index)).await;
                        }
                        Some(source_index) if source_index != target_index => {
                            {
                                let mut state = self.inner.state.borrow_mut();
                                let moved = state.resources.remove(source_index);
                                state.resources.insert(target_index, moved);
                            }
                            self.notify_state_changed();
                            self.open(uri, OpenOptions::default()).await;
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        if let Some(source) = source {
            if source != self {
                source.close(uri).await;
            }
        }
    }

    async fn should_close(&self, resource: &Resource) -> bool {
        let open_lists: Vec<Vec<Rc<Resource>>> = match self.host() {
            Ok(host) => host.groups().iter().map(EditorGroup::resources).collect(),
            Err(_) => vec![self.resources()],
        };
        self.inner
            .services
            .resources
            .should_close_resource(resource, &open_lists)
            .await
    }
}
