use super::runtime::LocalBoxFuture;
use crate::models::{OpenType, Resource};

/// How many groups or resources may claim one custom component at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    OnePerResource,
    OnePerGroup,
    OnePerWorkbench,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorComponent {
    pub id: String,
    pub render_mode: RenderMode,
}

impl EditorComponent {
    pub fn new(id: impl Into<String>, render_mode: RenderMode) -> Self {
        Self {
            id: id.into(),
            render_mode,
        }
    }
}

pub trait ComponentRegistry {
    /// Every open type able to render `resource`, preferred first.
    fn resolve_editor_component<'a>(
        &'a self,
        resource: &'a Resource,
    ) -> LocalBoxFuture<'a, Vec<OpenType>>;

    fn get_editor_component(&self, id: &str) -> Option<EditorComponent>;
}
