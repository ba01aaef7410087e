use serde::{Deserialize, Serialize};

pub const DEFAULT_STORAGE_NAMESPACE: &str = "workbench";
pub const DEFAULT_GRID_KEY: &str = "grid";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkbenchConfig {
    pub storage_namespace: String,
    pub grid_key: String,
    pub navigate_on_open: bool,
    pub restore_on_startup: bool,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            storage_namespace: DEFAULT_STORAGE_NAMESPACE.to_string(),
            grid_key: DEFAULT_GRID_KEY.to_string(),
            navigate_on_open: true,
            restore_on_startup: true,
        }
    }
}
