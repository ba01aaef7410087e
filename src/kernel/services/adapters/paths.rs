//! Where the binary keeps per-user files: one layout state per workspace
//! root under `state/`, rolling logs under `logs/`.

use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "workbench";
const STATE_DIR: &str = "state";
const LOG_DIR: &str = "logs";

/// `$XDG_DATA_HOME/workbench`, `~/.local/share/workbench`,
/// `~/Library/Application Support/workbench` or `%APPDATA%\workbench`.
fn data_root() -> Option<PathBuf> {
    let var = |name: &str| std::env::var_os(name).map(PathBuf::from);
    let base = if cfg!(target_os = "windows") {
        var("APPDATA")?
    } else if cfg!(target_os = "macos") {
        var("HOME")?.join("Library/Application Support")
    } else {
        var("XDG_DATA_HOME").or_else(|| var("HOME").map(|home| home.join(".local/share")))?
    };
    Some(base.join(APP_NAME))
}

/// Stable file stem for a workspace root.
fn workspace_key(root: &Path) -> String {
    let mut hasher = FxHasher::default();
    root.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Layout state file for the workspace rooted at `workspace_root`; relative
/// roots resolve against the current directory.
pub fn state_file_path(workspace_root: &Path) -> Option<PathBuf> {
    let root = if workspace_root.is_absolute() {
        workspace_root.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(workspace_root)
    };
    let file = format!("{}.json", workspace_key(&root));
    Some(data_root()?.join(STATE_DIR).join(file))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = data_root()
        .map(|root| root.join(LOG_DIR))
        .ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no per-user data directory")
        })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
