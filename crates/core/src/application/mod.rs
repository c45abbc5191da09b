// Application Layer - Listing use cases

pub mod fetch;
pub mod listing;
pub mod session;

// Re-exports
pub use fetch::{Completion, FetchFailure, FetchLifecycle, FetchState, RequestTicket};
pub use listing::{
    FetchRequest, InitialFilters, Intent, Landed, ListingController, ListingStatus, ViewModel,
};
pub use session::{
    shutdown_channel, ListingSession, SessionHandle, ShutdownSender, ShutdownToken, StopReason,
};
