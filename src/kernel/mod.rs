//! Headless engine core: editor groups and the services they run against.

pub mod group;
pub mod services;

pub use group::{
    DragOverPosition, EditorError, EditorGroup, EditorKind, GroupSnapshot, OpenOptions,
    OpenedResource, SplitAction, WorkbenchEvents,
};
pub use services::WorkbenchServices;
