use std::fmt;

use crate::models::{GridError, Uri};

#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    /// The resource provider returned nothing for this URI.
    Unresolvable(Uri),
    /// The registry offered no open type for this URI.
    NoOpenType(Uri),
    UnknownComponent(String),
    MissingDiffMetadata(Uri),
    EditorNotAttached,
    Grid(GridError),
    /// The owning workbench has been dropped.
    Detached,
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::Unresolvable(uri) => write!(f, "this uri cannot be opened: {}", uri),
            EditorError::NoOpenType(uri) => write!(f, "no editor can render: {}", uri),
            EditorError::UnknownComponent(id) => {
                write!(f, "cannot find editor component with id: {}", id)
            }
            EditorError::MissingDiffMetadata(uri) => {
                write!(f, "diff resource has no original/modified sides: {}", uri)
            }
            EditorError::EditorNotAttached => write!(f, "editor handle is not attached"),
            EditorError::Grid(e) => write!(f, "grid: {}", e),
            EditorError::Detached => write!(f, "editor group is detached from its workbench"),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditorError::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for EditorError {
    fn from(e: GridError) -> Self {
        EditorError::Grid(e)
    }
}
