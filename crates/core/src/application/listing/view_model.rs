// Read-only view model handed to presentation

use crate::application::fetch::FetchFailure;
use crate::domain::{Job, LocationFilter};

/// Which top-level branch presentation should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Loading,
    /// Nothing to show and the last fetch failed
    Error,
    Empty,
    Ready,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub jobs: Vec<Job>,
    pub total: u64,
    pub loading: bool,
    pub error: Option<FetchFailure>,
    pub page: u32,
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
    pub selected_job: Option<Job>,
    /// Draft values currently in the search controls
    pub search_text: String,
    pub location: LocationFilter,
}

impl ViewModel {
    pub fn status(&self) -> ListingStatus {
        if self.loading {
            ListingStatus::Loading
        } else if self.jobs.is_empty() && self.error.is_some() {
            ListingStatus::Error
        } else if self.jobs.is_empty() {
            ListingStatus::Empty
        } else {
            ListingStatus::Ready
        }
    }

    /// Pagination controls are only worth showing with more than one page
    pub fn shows_pagination(&self) -> bool {
        self.total_pages > 1
    }

    pub fn is_detail_open(&self) -> bool {
        self.selected_job.is_some()
    }
}
