// Query Builder - Filter State -> server-facing query descriptor

use serde::Serialize;

use crate::constants::{PAGE_SIZE, SORT_BY_SCORE};
use crate::domain::filter::FilterState;
use crate::domain::job::LocationType;

/// Normalized request for one page of the listing.
///
/// Built fresh from [`FilterState`] for every fetch. Serializes straight into
/// the endpoint's query string (absent filters are left out entirely).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
    pub page: u32,
    pub page_size: u32,
    pub sort: &'static str,
}

impl QueryDescriptor {
    /// Default recommended listing: no filters, first page
    pub fn recommended() -> Self {
        build_query(&FilterState::default())
    }
}

/// Map filter state to a query descriptor (pure)
pub fn build_query(filters: &FilterState) -> QueryDescriptor {
    let search = filters.search_text.trim();

    QueryDescriptor {
        search: (!search.is_empty()).then(|| search.to_string()),
        location_type: filters.location.location_type(),
        page: filters.page(),
        page_size: PAGE_SIZE,
        sort: SORT_BY_SCORE,
    }
}
