// Fetch Lifecycle Manager
//
// Every issued query gets a sequence number. Only the completion carrying the
// latest issued number may touch state; anything older is dropped on arrival.

use tracing::{debug, info, warn};

use crate::domain::{QueryDescriptor, ResultSet};
use crate::port::{FailureCategory, FetchError, ListingEndpoint, ListingPage};

/// Load lifecycle of the listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl std::fmt::Display for FetchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchState::Idle => write!(f, "IDLE"),
            FetchState::Loading => write!(f, "LOADING"),
            FetchState::Succeeded => write!(f, "SUCCEEDED"),
            FetchState::Failed => write!(f, "FAILED"),
        }
    }
}

/// Tag identifying one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Record of the latest failed fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub sequence: u64,
    pub category: FailureCategory,
    pub message: String,
}

/// What a completion did to the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Latest request succeeded; results replaced
    Applied,
    /// Latest request failed; previous results kept
    Failed,
    /// Superseded (or already settled) request; nothing changed
    Discarded,
}

#[derive(Debug, Default)]
pub struct FetchLifecycle {
    state: FetchState,
    latest_sequence: u64,
    outstanding: bool,
    results: ResultSet,
    failure: Option<FetchFailure>,
}

impl FetchLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new request: enter Loading and hand out its ticket
    pub fn begin(&mut self) -> RequestTicket {
        self.latest_sequence += 1;
        self.outstanding = true;
        self.state = FetchState::Loading;
        debug!(sequence = self.latest_sequence, "Fetch issued");
        RequestTicket(self.latest_sequence)
    }

    /// Land a completed request
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<ListingPage, FetchError>,
    ) -> Completion {
        if ticket.0 != self.latest_sequence || !self.outstanding {
            debug!(
                sequence = ticket.0,
                latest = self.latest_sequence,
                "Discarding stale fetch completion"
            );
            return Completion::Discarded;
        }
        self.outstanding = false;

        match outcome {
            Ok(page) => {
                self.results = ResultSet::from(page);
                self.failure = None;
                self.state = FetchState::Succeeded;
                info!(
                    sequence = ticket.0,
                    items = self.results.len(),
                    total = self.results.total,
                    "Listing page loaded"
                );
                Completion::Applied
            }
            Err(e) => {
                warn!(
                    sequence = ticket.0,
                    category = %e.category(),
                    error = %e,
                    "Listing fetch failed, keeping previous results"
                );
                self.failure = Some(FetchFailure {
                    sequence: ticket.0,
                    category: e.category(),
                    message: e.to_string(),
                });
                self.state = FetchState::Failed;
                Completion::Failed
            }
        }
    }

    /// Issue `query` against `endpoint` and land the outcome.
    ///
    /// Holds `&mut self` across the await, so only one request is in flight;
    /// use `begin`/`complete` directly to overlap requests.
    pub async fn execute(
        &mut self,
        endpoint: &dyn ListingEndpoint,
        query: &QueryDescriptor,
    ) -> Completion {
        let ticket = self.begin();
        let outcome = endpoint.fetch(query).await;
        self.complete(ticket, outcome)
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        self.failure.as_ref()
    }

    pub fn latest_sequence(&self) -> u64 {
        self.latest_sequence
    }
}
