// Filter State - user-controlled inputs that drive what is fetched

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

use crate::domain::error::{DomainError, Result};
use crate::domain::job::LocationType;

/// Location-type filter (`Any` = no filter)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationFilter {
    #[default]
    Any,
    Remote,
    Hybrid,
    Onsite,
}

impl LocationFilter {
    /// Parse a value handed over by the navigation layer.
    ///
    /// Missing, empty, `any`/`all` and unrecognised values all mean "no filter".
    pub fn from_navigation(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse::<LocationType>().ok())
            .map(Self::from)
            .unwrap_or_default()
    }

    /// The job location type this filter restricts to, if any
    pub fn location_type(&self) -> Option<LocationType> {
        match self {
            LocationFilter::Any => None,
            LocationFilter::Remote => Some(LocationType::Remote),
            LocationFilter::Hybrid => Some(LocationType::Hybrid),
            LocationFilter::Onsite => Some(LocationType::Onsite),
        }
    }

    pub fn label(&self) -> &'static str {
        self.location_type()
            .map_or("All Locations", |t| t.label())
    }
}

impl From<LocationType> for LocationFilter {
    fn from(t: LocationType) -> Self {
        match t {
            LocationType::Remote => LocationFilter::Remote,
            LocationType::Hybrid => LocationFilter::Hybrid,
            LocationType::Onsite => LocationFilter::Onsite,
            LocationType::Unspecified => LocationFilter::Any,
        }
    }
}

impl fmt::Display for LocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location_type() {
            Some(t) => f.write_str(t.as_str()),
            None => f.write_str("any"),
        }
    }
}

impl std::str::FromStr for LocationFilter {
    type Err = DomainError;

    /// Strict parse (CLI flags): unknown values are an error
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "any" | "all" => Ok(LocationFilter::Any),
            other => other.parse::<LocationType>().map(Self::from),
        }
    }
}

/// Committed search/filter/page state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub location: LocationFilter,
    page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            location: LocationFilter::Any,
            page: 1,
        }
    }
}

impl FilterState {
    pub fn new(search_text: impl Into<String>, location: LocationFilter) -> Self {
        Self {
            search_text: search_text.into(),
            location,
            page: 1,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Set the page; pages are 1-based
    pub fn set_page(&mut self, page: u32) -> Result<()> {
        let page = NonZeroU32::new(page).ok_or(DomainError::InvalidPage(page))?;
        self.go_to_page(page);
        Ok(())
    }

    pub fn go_to_page(&mut self, page: NonZeroU32) {
        self.page = page.get();
    }

    pub fn with_page(mut self, page: u32) -> Result<Self> {
        self.set_page(page)?;
        Ok(self)
    }

    /// Replace text and location and go back to the first page
    pub fn commit_search(&mut self, search_text: impl Into<String>, location: LocationFilter) {
        self.search_text = search_text.into();
        self.location = location;
        self.page = 1;
    }
}
