use crate::models::Uri;

/// Reveals a resource in the file explorer.
pub const EXPLORER_LOCATION: &str = "explorer.location";
/// Hands an `http`/`https` URI to the host.
pub const OPEN_EXTERNAL: &str = "workbench.openExternal";

pub trait CommandService {
    fn execute_command(&self, command: &str, uri: Option<&Uri>);
}
