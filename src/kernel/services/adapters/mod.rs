//! Service adapters: OS/runtime specific implementations of the ports.

pub mod command;
pub mod component;
pub mod editor;
pub mod paths;
pub mod resource;
pub mod settings;
pub mod storage;
pub mod workspace;

pub use command::LoggingCommandService;
pub use component::{ComponentMatch, StaticComponentRegistry};
pub use editor::{HeadlessCodeEditor, HeadlessDiffEditor};
pub use paths::{ensure_log_dir, state_file_path};
pub use resource::LocalResourceProvider;
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
pub use storage::{JsonFileStorage, MemoryStorage};
pub use workspace::RecentFiles;
