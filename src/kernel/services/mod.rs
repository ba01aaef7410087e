//! Services layer (ports + adapters).
//!
//! - `ports`: contracts for the engine's external collaborators.
//! - `adapters`: concrete implementations (file storage, local resources, ...).

pub mod adapters;
pub mod host;
pub mod ports;

pub use host::WorkbenchServices;
