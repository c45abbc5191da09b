// Session stop signal

use tokio::sync::watch;

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `ShutdownSender::shutdown` was called
    Requested,
    /// The sender went away without signalling; treated as a stop
    SenderDropped,
}

/// Receiving side of a session stop signal
#[derive(Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once a stop is requested or the sender is dropped.
    /// A request made before the call resolves immediately.
    pub async fn wait(&mut self) -> StopReason {
        match self.rx.wait_for(|stop| *stop).await {
            Ok(_) => StopReason::Requested,
            Err(_) => StopReason::SenderDropped,
        }
    }
}

/// Sending side; dropping it also stops every session holding a token
pub struct ShutdownSender {
    tx: watch::Sender<bool>,
}

impl ShutdownSender {
    pub fn shutdown(&self) {
        self.tx.send_replace(true);
    }
}

pub fn shutdown_channel() -> (ShutdownSender, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownSender { tx }, ShutdownToken { rx })
}
