// Listing intents and navigation boundary input

use crate::application::fetch::RequestTicket;
use crate::domain::{JobId, LocationFilter, QueryDescriptor};

/// Every way the user can change listing state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Edit the search box (draft, no fetch)
    SetSearchText(String),
    /// Edit the location picker (draft, no fetch)
    SetLocationType(LocationFilter),
    /// Commit drafts, back to page 1, fetch
    Search,
    GoToPage(u32),
    NextPage,
    PreviousPage,
    /// Refetch current filters
    Reload,
    Select(JobId),
    Dismiss,
}

/// Starting values supplied by the navigation layer at mount time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialFilters {
    pub search: Option<String>,
    pub location_type: Option<String>,
    pub page: Option<u32>,
}

impl InitialFilters {
    pub fn new(search: Option<String>, location_type: Option<String>) -> Self {
        Self {
            search,
            location_type,
            page: None,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// A fetch the controller wants issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: RequestTicket,
    pub query: QueryDescriptor,
}
