//! Plain data models: resource identity, open types and the layout grid.

pub mod grid;
pub mod open_type;
pub mod resource;
pub mod uri;

pub use grid::{Grid, GridError, GridNodeId, GridState, SplitDirection};
pub use open_type::{find_suitable_open_type, OpenType};
pub use resource::{Resource, ResourceMetadata};
pub use uri::{Uri, UriError};
