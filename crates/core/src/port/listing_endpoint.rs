// Listing Endpoint Port (Interface)

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Job, QueryDescriptor, ResultSet};

/// Errors raised while fetching one listing page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Endpoint returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Failure taxonomy kept in the failure record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Endpoint unreachable or non-success status
    Transport,
    /// Body missing required structure with no safe default
    MalformedResponse,
}

impl FetchError {
    pub fn category(&self) -> FailureCategory {
        match self {
            FetchError::Transport(_) | FetchError::Status { .. } => FailureCategory::Transport,
            FetchError::MalformedResponse(_) => FailureCategory::MalformedResponse,
        }
    }
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureCategory::Transport => write!(f, "TRANSPORT"),
            FailureCategory::MalformedResponse => write!(f, "MALFORMED_RESPONSE"),
        }
    }
}

/// Decoded endpoint response: `{ results: Job[], count: int }`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPage {
    pub results: Vec<Job>,
    pub count: u64,
}

impl ListingPage {
    pub fn new(results: Vec<Job>, count: u64) -> Self {
        Self { results, count }
    }

    /// Decode a response body.
    ///
    /// Defaulting rules:
    /// - missing or `null` `results` -> empty page
    /// - missing or `null` `count` -> 0
    /// - `results` not an array, an item without identity, or `count` not a
    ///   non-negative integer -> `MalformedResponse`
    pub fn from_json(value: serde_json::Value) -> Result<Self, FetchError> {
        let serde_json::Value::Object(mut body) = value else {
            return Err(FetchError::MalformedResponse(
                "response body is not an object".to_string(),
            ));
        };

        let results = match body.remove("results") {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(serde_json::Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    serde_json::from_value::<Job>(item).map_err(|e| {
                        FetchError::MalformedResponse(format!("results[{index}]: {e}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(FetchError::MalformedResponse(format!(
                    "`results` is not a sequence: {other}"
                )))
            }
        };

        let count = match body.remove("count") {
            None | Some(serde_json::Value::Null) => 0,
            Some(serde_json::Value::Number(n)) => n.as_u64().ok_or_else(|| {
                FetchError::MalformedResponse(format!("`count` is not a non-negative integer: {n}"))
            })?,
            Some(other) => {
                return Err(FetchError::MalformedResponse(format!(
                    "`count` is not a number: {other}"
                )))
            }
        };

        Ok(Self { results, count })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, FetchError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| FetchError::MalformedResponse(format!("invalid JSON: {e}")))?;
        Self::from_json(value)
    }
}

impl From<ListingPage> for ResultSet {
    fn from(page: ListingPage) -> Self {
        ResultSet::new(page.results, page.count)
    }
}

/// Remote job-listing endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingEndpoint: Send + Sync {
    /// Fetch one page for `query`
    ///
    /// # Errors
    /// - `FetchError::Transport` / `FetchError::Status` when the endpoint is
    ///   unreachable or answers with a non-success status
    /// - `FetchError::MalformedResponse` when the body cannot be decoded
    async fn fetch(&self, query: &QueryDescriptor) -> Result<ListingPage, FetchError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use tokio::sync::{oneshot, Notify};

    /// Endpoint that answers from a queue of scripted results.
    ///
    /// An exhausted script answers with an empty page.
    #[derive(Clone, Default)]
    pub struct ScriptedListingEndpoint {
        script: Arc<Mutex<VecDeque<Result<ListingPage, FetchError>>>>,
        queries: Arc<Mutex<Vec<QueryDescriptor>>>,
    }

    impl ScriptedListingEndpoint {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_ok(&self, page: ListingPage) -> &Self {
            self.script.lock().unwrap().push_back(Ok(page));
            self
        }

        pub fn push_err(&self, err: FetchError) -> &Self {
            self.script.lock().unwrap().push_back(Err(err));
            self
        }

        pub fn call_count(&self) -> usize {
            self.queries.lock().unwrap().len()
        }

        pub fn queries(&self) -> Vec<QueryDescriptor> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ListingEndpoint for ScriptedListingEndpoint {
        async fn fetch(&self, query: &QueryDescriptor) -> Result<ListingPage, FetchError> {
            self.queries.lock().unwrap().push(query.clone());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ListingPage::default()))
        }
    }

    /// Endpoint whose calls stay pending until the test releases them,
    /// in any order.
    #[derive(Clone, Default)]
    pub struct GatedListingEndpoint {
        gates: Arc<Mutex<Vec<Option<oneshot::Sender<Result<ListingPage, FetchError>>>>>>,
        queries: Arc<Mutex<Vec<QueryDescriptor>>>,
        arrived: Arc<Notify>,
    }

    impl GatedListingEndpoint {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn call_count(&self) -> usize {
            self.queries.lock().unwrap().len()
        }

        pub fn queries(&self) -> Vec<QueryDescriptor> {
            self.queries.lock().unwrap().clone()
        }

        /// Wait until at least `n` calls have been made
        pub async fn wait_for_calls(&self, n: usize) {
            loop {
                let notified = self.arrived.notified();
                if self.call_count() >= n {
                    return;
                }
                notified.await;
            }
        }

        /// Complete call number `index` (0-based). Returns false if the call
        /// does not exist or was already released.
        pub fn release(&self, index: usize, result: Result<ListingPage, FetchError>) -> bool {
            let sender = self
                .gates
                .lock()
                .unwrap()
                .get_mut(index)
                .and_then(Option::take);
            match sender {
                Some(tx) => tx.send(result).is_ok(),
                None => false,
            }
        }
    }

    #[async_trait]
    impl ListingEndpoint for GatedListingEndpoint {
        async fn fetch(&self, query: &QueryDescriptor) -> Result<ListingPage, FetchError> {
            let (tx, rx) = oneshot::channel();
            {
                self.gates.lock().unwrap().push(Some(tx));
                self.queries.lock().unwrap().push(query.clone());
            }
            self.arrived.notify_waiters();

            rx.await
                .unwrap_or_else(|_| Err(FetchError::Transport("gate dropped".to_string())))
        }
    }
}
