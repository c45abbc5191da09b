// Result Set - most recent successfully fetched page

use crate::domain::job::{Job, JobId};

/// One page of jobs plus the server-reported total across all pages.
///
/// Replaced wholesale on every successful fetch, never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub items: Vec<Job>,
    pub total: u64,
}

impl ResultSet {
    pub fn new(items: Vec<Job>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn find(&self, id: &JobId) -> Option<&Job> {
        self.items.iter().find(|job| &job.id == id)
    }

    pub fn contains(&self, id: &JobId) -> bool {
        self.find(id).is_some()
    }
}
