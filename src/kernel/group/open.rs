use std::rc::Rc;

use super::{CurrentState, EditorError, EditorGroup, GroupOpened, GroupSnapshot, OpenOptions};
use super::{OpenedResource, SplitAction};
use crate::kernel::services::ports::{
    CursorStatus, LocalBoxFuture, RenderMode, EXPLORER_LOCATION, OPEN_EXTERNAL,
};
use crate::models::{find_suitable_open_type, OpenType, Resource, Uri};

impl EditorGroup {
    /// Opens `uri` in this group, or in a new sibling when `options.split`
    /// is set.
    ///
    /// Concurrent calls for the same URI share one in-flight open. Failures
    /// are logged and resolve to `None`.
    pub fn open<'a>(
        &'a self,
        uri: &'a Uri,
        mut options: OpenOptions,
    ) -> LocalBoxFuture<'a, Option<OpenedResource>> {
        Box::pin(async move {
            if let Some(action) = options.split.take() {
                return self.split(action, uri, options).await;
            }

            let key = uri.as_str().to_string();
            let pending = Rc::clone(self.inner.opening.borrow_mut().entry(key.clone()).or_default());
            let result = pending
                .get_or_init(|| self.open_logged(uri, options))
                .await
                .clone();

            let mut opening = self.inner.opening.borrow_mut();
            if opening
                .get(&key)
                .is_some_and(|entry| Rc::ptr_eq(entry, &pending))
            {
                opening.remove(&key);
            }
            result
        })
    }

    /// Opens each URI in turn, waiting for one before starting the next.
    pub async fn open_uris(&self, uris: &[Uri]) {
        for uri in uris {
            self.open(uri, OpenOptions::default()).await;
        }
    }

    /// Creates a group beside this one and opens `uri` there.
    pub fn split<'a>(
        &'a self,
        action: SplitAction,
        uri: &'a Uri,
        options: OpenOptions,
    ) -> LocalBoxFuture<'a, Option<OpenedResource>> {
        Box::pin(async move {
            let created = self.host().and_then(|host| {
                host.split_group(self, action.direction(), action.before())
                    .map_err(EditorError::from)
            });
            match created {
                Ok(group) => group.open(uri, options).await,
                Err(e) => {
                    tracing::error!(group = %self.name(), uri = %uri, error = %e, "split failed");
                    None
                }
            }
        })
    }

    /// Re-displays the current resource with `open_type` unless the current
    /// type is already similar to it.
    pub async fn change_open_type(&self, open_type: OpenType) {
        let Some(current) = self.current_state() else {
            return;
        };
        if open_type.is_similar(&current.open_type) {
            return;
        }
        let options = OpenOptions {
            force_open_type: Some(open_type),
            ..OpenOptions::default()
        };
        if let Err(e) = self.display(current.resource, &options).await {
            tracing::error!(group = %self.name(), error = %e, "change open type failed");
        }
    }

    /// Adds every persisted tab without displaying it, then activates the
    /// persisted current tab (or the last one).
    pub async fn restore_state(&self, snapshot: GroupSnapshot) {
        let options = OpenOptions::default().without_navigate();
        for uri in &snapshot.uris {
            if let Err(e) = self.open_resource(uri, &options, true).await {
                tracing::warn!(group = %self.name(), uri = %uri, error = %e, "dropped tab on restore");
            }
        }
        let current = snapshot.current.or_else(|| snapshot.uris.last().cloned());
        if let Some(uri) = current {
            self.open(&uri, OpenOptions::default()).await;
        }
    }

    async fn open_logged(&self, uri: &Uri, options: OpenOptions) -> Option<OpenedResource> {
        match self.open_resource(uri, &options, false).await {
            Ok(opened) => opened,
            Err(e) => {
                tracing::error!(group = %self.name(), uri = %uri, error = %e, "open failed");
                None
            }
        }
    }

    async fn open_resource(
        &self,
        uri: &Uri,
        options: &OpenOptions,
        only_add_tab: bool,
    ) -> Result<Option<OpenedResource>, EditorError> {
        let services = &self.inner.services;
        if uri.is_external() {
            services.commands.execute_command(OPEN_EXTERNAL, Some(uri));
            return Ok(None);
        }
        if !options.disable_navigate && services.config.navigate_on_open {
            services.commands.execute_command(EXPLORER_LOCATION, Some(uri));
        }

        if let Some(current) = self.current_resource() {
            if current.uri == *uri {
                return Ok(Some(OpenedResource {
                    group: self.clone(),
                    resource: current,
                }));
            }
        }

        let resource = match self.find_resource(uri) {
            Some(resource) => resource,
            None => {
                let resolved = services
                    .resources
                    .get_resource(uri)
                    .await
                    .ok_or_else(|| EditorError::Unresolvable(uri.clone()))?;
                let added = self.insert_resource(resolved, options.index);
                self.notify_state_changed();
                added
            }
        };
        if only_add_tab {
            return Ok(None);
        }

        self.display(Rc::clone(&resource), options).await?;
        self.inner.events.group_opened.fire(&GroupOpened {
            group: self.clone(),
            resource: Rc::clone(&resource),
        });
        Ok(Some(OpenedResource {
            group: self.clone(),
            resource,
        }))
    }

    /// Adds a freshly resolved resource unless one with the same URI landed
    /// while it was being resolved.
    fn insert_resource(&self, resolved: Resource, index: Option<usize>) -> Rc<Resource> {
        let mut state = self.inner.state.borrow_mut();
        if let Some(existing) = state.find(&resolved.uri) {
            return existing;
        }
        let resource = Rc::new(resolved);
        match index {
            Some(index) if index < state.resources.len() => {
                state.resources.insert(index, Rc::clone(&resource));
            }
            _ => state.resources.push(Rc::clone(&resource)),
        }
        resource
    }

    async fn resolve_open_type(
        &self,
        resource: &Resource,
        options: &OpenOptions,
    ) -> Result<(OpenType, Vec<OpenType>), EditorError> {
        let key = resource.uri.as_str();
        let cached = self.inner.state.borrow().cached_open_types.get(key).cloned();
        let open_types = match cached {
            Some(open_types) => open_types,
            None => {
                self.inner
                    .services
                    .components
                    .resolve_editor_component(resource)
                    .await
            }
        };

        let mut state = self.inner.state.borrow_mut();
        let active = find_suitable_open_type(
            &open_types,
            state.cached_active.get(key),
            options.force_open_type.as_ref(),
        );
        state
            .cached_open_types
            .insert(key.to_string(), open_types.clone());
        let active = active.ok_or_else(|| EditorError::NoOpenType(resource.uri.clone()))?;
        Ok((active, open_types))
    }

    /// Renders `resource` with its resolved open type and makes it current.
    pub(super) async fn display(
        &self,
        resource: Rc<Resource>,
        options: &OpenOptions,
    ) -> Result<(), EditorError> {
        let (active, open_types) = self.resolve_open_type(&resource, options).await?;
        self.inner.state.borrow_mut().available_open_types = open_types;

        match &active {
            OpenType::Code => {
                self.inner.code_editor_ready.wait().await;
                let editor = self
                    .inner
                    .code_editor
                    .borrow()
                    .clone()
                    .ok_or(EditorError::EditorNotAttached)?;
                editor.open(&resource.uri, options.range).await;
                if options.preserve_focus {
                    editor.focus();
                }
            }
            OpenType::Diff => {
                let (original, modified) = resource
                    .diff_sides()
                    .ok_or_else(|| EditorError::MissingDiffMetadata(resource.uri.clone()))?;
                self.inner.diff_editor_ready.wait().await;
                let editor = self
                    .inner
                    .diff_editor
                    .borrow()
                    .clone()
                    .ok_or(EditorError::EditorNotAttached)?;
                editor.compare(original, modified).await;
            }
            OpenType::Component { component_id } => {
                self.display_component(component_id, &resource).await?;
                self.inner.cursor_changed.fire(&CursorStatus::default());
            }
            OpenType::Other { kind } => {
                tracing::debug!(group = %self.name(), kind = %kind, "open type not rendered");
                return Ok(());
            }
        }

        self.set_current_state(Some(CurrentState {
            resource: Rc::clone(&resource),
            open_type: active.clone(),
        }));
        self.inner
            .state
            .borrow_mut()
            .cached_active
            .insert(resource.uri.as_str().to_string(), active);
        Ok(())
    }

    async fn display_component(
        &self,
        component_id: &str,
        resource: &Rc<Resource>,
    ) -> Result<(), EditorError> {
        let component = self
            .inner
            .services
            .components
            .get_editor_component(component_id)
            .ok_or_else(|| EditorError::UnknownComponent(component_id.to_string()))?;

        match component.render_mode {
            RenderMode::OnePerResource => {
                let mut state = self.inner.state.borrow_mut();
                let assigned = state
                    .active_components
                    .entry(component.id)
                    .or_default();
                if !assigned.iter().any(|r| r.uri == resource.uri) {
                    assigned.push(Rc::clone(resource));
                }
            }
            RenderMode::OnePerGroup => {
                self.inner
                    .state
                    .borrow_mut()
                    .active_components
                    .insert(component.id, vec![Rc::clone(resource)]);
            }
            RenderMode::OnePerWorkbench => {
                let others: Vec<EditorGroup> = self
                    .host()?
                    .groups()
                    .into_iter()
                    .filter(|group| group != self && group.find_resource(&resource.uri).is_some())
                    .collect();
                for other in others {
                    if !other.close(&resource.uri).await {
                        tracing::warn!(
                            group = %other.name(),
                            uri = %resource.uri,
                            "group kept a one-per-workbench resource"
                        );
                    }
                }
                self.inner
                    .state
                    .borrow_mut()
                    .active_components
                    .insert(component.id, vec![Rc::clone(resource)]);
            }
        }
        Ok(())
    }
}
