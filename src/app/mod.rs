//! Application layer: the workbench engine and the activator bar.

pub mod activator_bar;
pub mod workbench;

pub use activator_bar::{ActivatorBar, PanelInfo, Side};
pub use workbench::{WeakWorkbench, Workbench};
