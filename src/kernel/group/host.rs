use super::EditorGroup;
use crate::models::{GridError, SplitDirection};

/// What a group needs from the engine that owns it.
pub trait GroupHost {
    fn groups(&self) -> Vec<EditorGroup>;

    fn is_current_group(&self, group: &EditorGroup) -> bool;

    fn set_current_group(&self, group: &EditorGroup);

    /// Creates a group and places its leaf beside `anchor`.
    fn split_group(
        &self,
        anchor: &EditorGroup,
        direction: SplitDirection,
        before: bool,
    ) -> Result<EditorGroup, GridError>;

    fn is_sole_group(&self, group: &EditorGroup) -> bool;

    /// Removes the group's leaf and unregisters it.
    fn detach_group(&self, group: &EditorGroup);
}
