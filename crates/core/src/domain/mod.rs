// Domain Layer - Pure listing state and derivations

pub mod error;
pub mod filter;
pub mod job;
pub mod pagination;
pub mod query;
pub mod result_set;
pub mod selection;

// Re-exports
pub use error::DomainError;
pub use filter::{FilterState, LocationFilter};
pub use job::{Company, Job, JobId, LocationType, MatchScore};
pub use pagination::Pagination;
pub use query::{build_query, QueryDescriptor};
pub use result_set::ResultSet;
pub use selection::SelectionState;
