use std::rc::Rc;

use super::ports::{
    CommandService, ComponentRegistry, ResourceProvider, Storage, WorkbenchConfig,
    WorkspaceService,
};

/// Collaborators handed down from the composition root to the workbench and
/// every group it creates.
#[derive(Clone)]
pub struct WorkbenchServices {
    pub resources: Rc<dyn ResourceProvider>,
    pub components: Rc<dyn ComponentRegistry>,
    pub storage: Rc<dyn Storage>,
    pub commands: Rc<dyn CommandService>,
    pub workspace: Rc<dyn WorkspaceService>,
    pub config: Rc<WorkbenchConfig>,
}

impl WorkbenchServices {
    pub fn new(
        resources: Rc<dyn ResourceProvider>,
        components: Rc<dyn ComponentRegistry>,
        storage: Rc<dyn Storage>,
        commands: Rc<dyn CommandService>,
        workspace: Rc<dyn WorkspaceService>,
    ) -> Self {
        Self {
            resources,
            components,
            storage,
            commands,
            workspace,
            config: Rc::new(WorkbenchConfig::default()),
        }
    }

    pub fn with_config(mut self, config: WorkbenchConfig) -> Self {
        self.config = Rc::new(config);
        self
    }
}
