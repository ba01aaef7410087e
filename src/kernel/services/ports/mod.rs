//! Service ports: traits + data contracts for the engine's collaborators.

pub mod command;
pub mod component;
pub mod config;
pub mod editor;
pub mod resource;
pub mod runtime;
pub mod settings;
pub mod storage;
pub mod workspace;

pub use command::{CommandService, EXPLORER_LOCATION, OPEN_EXTERNAL};
pub use component::{ComponentRegistry, EditorComponent, RenderMode};
pub use config::WorkbenchConfig;
pub use editor::{CodeEditor, CursorStatus, DiffEditor, Position, SelectionChange, TextRange};
pub use resource::ResourceProvider;
pub use runtime::LocalBoxFuture;
pub use settings::Settings;
pub use storage::{Storage, StorageError};
pub use workspace::WorkspaceService;
