use std::cell::RefCell;
use std::collections::VecDeque;

use crate::kernel::services::ports::WorkspaceService;
use crate::models::Uri;

const DEFAULT_CAPACITY: usize = 20;

/// Most-recently-opened list, newest first, without duplicates.
#[derive(Debug)]
pub struct RecentFiles {
    capacity: usize,
    entries: RefCell<VecDeque<Uri>>,
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl RecentFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: RefCell::new(VecDeque::new()),
        }
    }

    pub fn entries(&self) -> Vec<Uri> {
        self.entries.borrow().iter().cloned().collect()
    }

    pub fn most_recent(&self) -> Option<Uri> {
        self.entries.borrow().front().cloned()
    }
}

impl WorkspaceService for RecentFiles {
    fn set_most_recently_opened_file(&self, uri: &Uri) {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|existing| existing != uri);
        entries.push_front(uri.clone());
        entries.truncate(self.capacity);
    }
}
