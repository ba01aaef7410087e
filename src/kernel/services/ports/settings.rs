use serde::{Deserialize, Serialize};

use super::config::WorkbenchConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub workbench: WorkbenchConfig,
}
