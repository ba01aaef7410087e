use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::models::{OpenType, Resource, Uri};

/// Persisted form of one group: its tabs and the active one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    #[serde(default)]
    pub uris: Vec<Uri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<Uri>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentState {
    pub resource: Rc<Resource>,
    pub open_type: OpenType,
}

#[derive(Default)]
pub(super) struct GroupState {
    pub resources: Vec<Rc<Resource>>,
    pub current: Option<CurrentState>,
    /// Candidates per URI, filled on first display.
    pub cached_open_types: FxHashMap<String, Vec<OpenType>>,
    /// Last active open type per URI.
    pub cached_active: FxHashMap<String, OpenType>,
    pub available_open_types: Vec<OpenType>,
    /// Component id -> resources it currently renders in this group.
    pub active_components: FxHashMap<String, Vec<Rc<Resource>>>,
}

impl GroupState {
    pub fn position(&self, uri: &Uri) -> Option<usize> {
        self.resources.iter().position(|r| r.uri == *uri)
    }

    pub fn find(&self, uri: &Uri) -> Option<Rc<Resource>> {
        self.resources.iter().find(|r| r.uri == *uri).cloned()
    }

    pub fn is_current(&self, uri: &Uri) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| current.resource.uri == *uri)
    }

    pub fn forget_component_resource(&mut self, uri: &Uri) {
        for resources in self.active_components.values_mut() {
            resources.retain(|r| r.uri != *uri);
        }
    }

    pub fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot {
            uris: self.resources.iter().map(|r| r.uri.clone()).collect(),
            current: self.current.as_ref().map(|c| c.resource.uri.clone()),
        }
    }
}
