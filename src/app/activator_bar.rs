//! Side-panel registry for the activator bar.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use crate::kernel::services::ports::CommandService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelInfo {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

impl PanelInfo {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

pub struct ActivatorBar {
    commands: Rc<dyn CommandService>,
    left_panels: Vec<PanelInfo>,
    right_panels: Vec<PanelInfo>,
}

impl ActivatorBar {
    pub fn new(commands: Rc<dyn CommandService>) -> Self {
        Self {
            commands,
            left_panels: Vec::new(),
            right_panels: Vec::new(),
        }
    }

    pub fn append(&mut self, info: PanelInfo, side: Side) {
        tracing::debug!(panel = %info.id, side = %side, "append panel");
        match side {
            Side::Left => self.left_panels.push(info),
            Side::Right => self.right_panels.push(info),
        }
    }

    pub fn panels(&self, side: Side) -> &[PanelInfo] {
        match side {
            Side::Left => &self.left_panels,
            Side::Right => &self.right_panels,
        }
    }

    pub fn show_panel(&self, side: Side) {
        self.commands
            .execute_command(&format!("main-layout.{}-panel.show", side), None);
    }

    pub fn hide_panel(&self, side: Side) {
        self.commands
            .execute_command(&format!("main-layout.{}-panel.hide", side), None);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/activator_bar.rs"]
mod tests;
