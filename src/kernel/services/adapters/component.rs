use rustc_hash::FxHashMap;

use crate::kernel::services::ports::{ComponentRegistry, EditorComponent, LocalBoxFuture};
use crate::models::{OpenType, Resource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentMatch {
    Scheme(String),
    Extension(String),
}

impl ComponentMatch {
    fn matches(&self, resource: &Resource) -> bool {
        match self {
            ComponentMatch::Scheme(scheme) => resource.uri.scheme() == scheme,
            ComponentMatch::Extension(ext) => resource
                .uri
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case(ext)),
        }
    }
}

/// Registry with a fixed rule set:
/// diff resources render as `diff`, `file` resources offer `code` first,
/// then every registered component whose matcher accepts the resource.
#[derive(Debug, Default)]
pub struct StaticComponentRegistry {
    components: FxHashMap<String, EditorComponent>,
    matchers: Vec<(String, ComponentMatch)>,
}

impl StaticComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, component: EditorComponent, matcher: ComponentMatch) {
        self.matchers.push((component.id.clone(), matcher));
        self.components.insert(component.id.clone(), component);
    }

    pub fn open_types_for(&self, resource: &Resource) -> Vec<OpenType> {
        if resource.diff_sides().is_some() {
            return vec![OpenType::Diff];
        }
        let mut out = Vec::new();
        if resource.uri.scheme() == "file" {
            out.push(OpenType::Code);
        }
        for (id, matcher) in &self.matchers {
            if matcher.matches(resource) {
                out.push(OpenType::component(id.clone()));
            }
        }
        out
    }
}

impl ComponentRegistry for StaticComponentRegistry {
    fn resolve_editor_component<'a>(
        &'a self,
        resource: &'a Resource,
    ) -> LocalBoxFuture<'a, Vec<OpenType>> {
        let types = self.open_types_for(resource);
        Box::pin(async move { types })
    }

    fn get_editor_component(&self, id: &str) -> Option<EditorComponent> {
        self.components.get(id).cloned()
    }
}
