// Port Layer - Interfaces for external dependencies

pub mod listing_endpoint;
pub mod time_provider; // For deterministic formatting

// Re-exports
pub use listing_endpoint::{FailureCategory, FetchError, ListingEndpoint, ListingPage};
pub use time_provider::{FixedTimeProvider, SystemTimeProvider, TimeProvider};
