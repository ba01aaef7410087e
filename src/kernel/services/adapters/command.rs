use std::cell::RefCell;

use crate::kernel::services::ports::CommandService;
use crate::models::Uri;

/// Command sink for headless runs: records and logs every dispatch.
#[derive(Debug, Default)]
pub struct LoggingCommandService {
    history: RefCell<Vec<(String, Option<Uri>)>>,
}

impl LoggingCommandService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<(String, Option<Uri>)> {
        self.history.borrow().clone()
    }
}

impl CommandService for LoggingCommandService {
    fn execute_command(&self, command: &str, uri: Option<&Uri>) {
        match uri {
            Some(uri) => tracing::info!(command, uri = %uri, "execute command"),
            None => tracing::info!(command, "execute command"),
        }
        self.history
            .borrow_mut()
            .push((command.to_string(), uri.cloned()));
    }
}
