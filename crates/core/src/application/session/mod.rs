// Listing Session - drives a controller against a live endpoint
//
// Single task owns the controller. Intents arrive over an mpsc channel,
// fetches run concurrently in a FuturesUnordered, completions land through
// the controller's sequence rule, and every visible change is published on
// a watch channel.

mod shutdown;

pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken, StopReason};

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::application::fetch::{Completion, RequestTicket};
use crate::application::listing::{FetchRequest, Intent, ListingController, ViewModel};
use crate::constants::INTENT_CHANNEL_CAPACITY;
use crate::error::{AppError, Result};
use crate::port::{FetchError, ListingEndpoint, ListingPage};

type InFlight = BoxFuture<'static, (RequestTicket, std::result::Result<ListingPage, FetchError>)>;

/// Client side of a running session
#[derive(Clone)]
pub struct SessionHandle {
    intents: mpsc::Sender<Intent>,
    views: watch::Receiver<ViewModel>,
}

impl SessionHandle {
    /// Queue an intent for the session
    pub async fn send(&self, intent: Intent) -> Result<()> {
        self.intents
            .send(intent)
            .await
            .map_err(|_| AppError::SessionClosed)
    }

    /// Latest published view model
    pub fn current(&self) -> ViewModel {
        self.views.borrow().clone()
    }

    /// Wait until the published view model satisfies `predicate`
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&ViewModel) -> bool,
    ) -> Result<ViewModel> {
        self.views
            .wait_for(predicate)
            .await
            .map(|vm| vm.clone())
            .map_err(|_| AppError::SessionClosed)
    }

    /// Wait for the next published view model
    pub async fn changed(&mut self) -> Result<ViewModel> {
        self.views
            .changed()
            .await
            .map_err(|_| AppError::SessionClosed)?;
        Ok(self.views.borrow_and_update().clone())
    }
}

/// Listing session driver
pub struct ListingSession {
    controller: ListingController,
    endpoint: Arc<dyn ListingEndpoint>,
    intents: mpsc::Receiver<Intent>,
    views: watch::Sender<ViewModel>,
    initial: FetchRequest,
}

impl ListingSession {
    /// Mounts `controller`; the first published view is already loading.
    pub fn new(
        mut controller: ListingController,
        endpoint: Arc<dyn ListingEndpoint>,
    ) -> (Self, SessionHandle) {
        let initial = controller.mount();
        let (intent_tx, intent_rx) = mpsc::channel(INTENT_CHANNEL_CAPACITY);
        let (view_tx, view_rx) = watch::channel(controller.view_model());

        let session = Self {
            controller,
            endpoint,
            intents: intent_rx,
            views: view_tx,
            initial,
        };
        let handle = SessionHandle {
            intents: intent_tx,
            views: view_rx,
        };
        (session, handle)
    }

    /// Run until shutdown, or until every handle is dropped and the
    /// outstanding fetches have landed. Returns the final view model.
    pub async fn run(self, mut shutdown: ShutdownToken) -> Result<ViewModel> {
        let ListingSession {
            mut controller,
            endpoint,
            mut intents,
            views,
            initial,
        } = self;

        let mut in_flight: FuturesUnordered<InFlight> = FuturesUnordered::new();
        let mut intents_open = true;

        in_flight.push(start_fetch(&endpoint, initial));
        info!("Listing session started");

        loop {
            if shutdown.is_shutdown() {
                info!("Listing session shutting down");
                break;
            }
            if !intents_open && in_flight.is_empty() {
                info!("All handles dropped, listing session finished");
                break;
            }

            tokio::select! {
                intent = intents.recv(), if intents_open => match intent {
                    Some(intent) => {
                        debug!(?intent, "Intent received");
                        if let Some(request) = controller.dispatch(intent) {
                            in_flight.push(start_fetch(&endpoint, request));
                        }
                        views.send_replace(controller.view_model());
                    }
                    None => intents_open = false,
                },
                Some((ticket, outcome)) = in_flight.next(), if !in_flight.is_empty() => {
                    let landed = controller.complete(ticket, outcome);
                    if let Some(request) = landed.follow_up {
                        in_flight.push(start_fetch(&endpoint, request));
                    }
                    if landed.completion != Completion::Discarded {
                        views.send_replace(controller.view_model());
                    }
                },
                reason = shutdown.wait() => {
                    info!(?reason, "Listing session interrupted");
                    break;
                }
            }
        }

        // In-flight requests are not cancelled remotely; their results are dropped
        if !in_flight.is_empty() {
            debug!(abandoned = in_flight.len(), "Dropping outstanding fetches");
        }
        Ok(controller.view_model())
    }
}

fn start_fetch(endpoint: &Arc<dyn ListingEndpoint>, request: FetchRequest) -> InFlight {
    let endpoint = Arc::clone(endpoint);
    async move {
        let outcome = endpoint.fetch(&request.query).await;
        (request.ticket, outcome)
    }
    .boxed()
}
