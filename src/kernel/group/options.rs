use crate::kernel::services::ports::TextRange;
use crate::models::{OpenType, SplitDirection};

/// Where a split places the new group relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAction {
    Left,
    Right,
    Top,
    Bottom,
}

impl SplitAction {
    pub fn direction(self) -> SplitDirection {
        match self {
            SplitAction::Left | SplitAction::Right => SplitDirection::Horizontal,
            SplitAction::Top | SplitAction::Bottom => SplitDirection::Vertical,
        }
    }

    pub fn before(self) -> bool {
        matches!(self, SplitAction::Left | SplitAction::Top)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOverPosition {
    Center,
    Left,
    Right,
    Top,
    Bottom,
}

impl DragOverPosition {
    /// Edge drops split; a center drop stays in the group.
    pub fn split_action(self) -> Option<SplitAction> {
        match self {
            DragOverPosition::Center => None,
            DragOverPosition::Left => Some(SplitAction::Left),
            DragOverPosition::Right => Some(SplitAction::Right),
            DragOverPosition::Top => Some(SplitAction::Top),
            DragOverPosition::Bottom => Some(SplitAction::Bottom),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Tab position for a newly added resource; out of range appends.
    pub index: Option<usize>,
    pub split: Option<SplitAction>,
    /// Target group by position. At or past the group count the current
    /// group is split to the right instead.
    pub group_index: Option<usize>,
    pub range: Option<TextRange>,
    pub preserve_focus: bool,
    pub disable_navigate: bool,
    pub force_open_type: Option<OpenType>,
}

impl OpenOptions {
    pub fn at_index(index: usize) -> Self {
        Self {
            index: Some(index),
            ..Self::default()
        }
    }

    pub fn split(action: SplitAction) -> Self {
        Self {
            split: Some(action),
            ..Self::default()
        }
    }

    pub fn in_group(index: usize) -> Self {
        Self {
            group_index: Some(index),
            ..Self::default()
        }
    }

    pub fn without_navigate(mut self) -> Self {
        self.disable_navigate = true;
        self
    }
}
