// Selection State - at most one job inspected in detail

use crate::domain::job::{Job, JobId};
use crate::domain::result_set::ResultSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<JobId>,
}

impl SelectionState {
    /// Select a job; re-selecting the same id changes nothing.
    /// Returns whether the selection changed.
    pub fn select(&mut self, id: JobId) -> bool {
        if self.selected.as_ref() == Some(&id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn dismiss(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&JobId> {
        self.selected.as_ref()
    }

    /// The selected job, if it is on the current page
    pub fn resolve<'a>(&self, results: &'a ResultSet) -> Option<&'a Job> {
        self.selected.as_ref().and_then(|id| results.find(id))
    }

    /// Drop the selection if it no longer resolves against `results`
    pub fn retain_in(&mut self, results: &ResultSet) {
        if let Some(id) = &self.selected {
            if !results.contains(id) {
                self.selected = None;
            }
        }
    }
}
