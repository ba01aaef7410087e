//! workbench - editor-group engine
//!
//! Module layout:
//! - core: framework primitives (Emitter, Subscription, Gate)
//! - models: plain data (Uri, Resource, OpenType, Grid)
//! - kernel: editor groups plus service ports and adapters
//! - app: the workbench engine and the activator bar

pub mod app;
pub mod core;
pub mod kernel;
pub mod models;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
