//! The HTTP facility: off-thread dispatch, same-thread completion delivery.
//!
//! [`HttpFacility::dispatch`] hands a request to a tokio worker task and
//! returns immediately. Exactly one [`Completion`] per dispatch is queued
//! when the exchange finishes, and completions are only ever handed out
//! from [`HttpFacility::drain`] / [`HttpFacility::next_completion`] — so
//! handlers always run on the draining (main) thread and need no
//! synchronisation of their own.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::mpsc;
use tracing::debug;

use crate::request::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Routing identity a dispatching component is bound by.
///
/// The binding is weak: the facility never holds the component itself, only
/// this id. Whoever drains completions decides whether a matching component
/// is still alive; a completion for a dead handler is simply dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub u64);

impl HandlerId {
    /// The null / invalid handler sentinel.
    pub const INVALID: HandlerId = HandlerId(0);

    /// Returns `true` if this is a valid (non-zero) handler.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// The outcome of one dispatched request.
#[derive(Debug)]
pub struct Completion {
    /// The handler the originating component was bound with.
    pub handler: HandlerId,
    /// The originating request descriptor, returned for diagnostics.
    pub request: HttpRequest,
    /// The response, when the exchange produced one.
    pub response: Option<HttpResponse>,
    /// Whether the facility considers the exchange successful. Any HTTP
    /// status counts; only transport-level failures clear this flag.
    pub success: bool,
}

/// Process-wide HTTP facility.
///
/// Each dispatched request holds one facility slot from dispatch until its
/// completion is drained; [`HttpFacility::pending`] reports the slot count.
#[derive(Debug)]
pub struct HttpFacility {
    transport: Arc<dyn Transport>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: AtomicUsize,
}

impl HttpFacility {
    /// Create a facility over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            transport,
            completion_tx,
            completion_rx,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Hand a request to the facility.
    ///
    /// Returns immediately; the exchange runs on a tokio task and exactly
    /// one [`Completion`] bound to `handler` is queued when it finishes.
    /// Construction errors (malformed URL) are absorbed by the transport
    /// and surface as a failure completion, never synchronously.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, handler: HandlerId, request: HttpRequest) {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        debug!(request_id = %request.id, url = %request.url, "dispatching request");

        let future = self.transport.execute(request.clone());
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let completion = match future.await {
                Ok(response) => Completion {
                    handler,
                    request,
                    response: Some(response),
                    success: true,
                },
                Err(err) => {
                    debug!(request_id = %request.id, error = %err, "transport reported failure");
                    Completion {
                        handler,
                        request,
                        response: None,
                        success: false,
                    }
                }
            };
            // The receiver lives as long as the facility; if it is gone the
            // completion has no home and is dropped with it.
            let _ = tx.send(completion);
        });
    }

    /// Remove and return every queued completion without blocking.
    pub fn drain(&mut self) -> Vec<Completion> {
        let mut out = Vec::new();
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            out.push(completion);
        }
        out
    }

    /// Wait for the next completion.
    ///
    /// Resolves `None` only if every sender is gone, which cannot happen
    /// while the facility itself is alive.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        let completion = self.completion_rx.recv().await;
        if completion.is_some() {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
        }
        completion
    }

    /// Number of requests dispatched but not yet drained.
    ///
    /// While this is non-zero, a completion is guaranteed to eventually
    /// arrive on the queue.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }
}
