//! The wire seam between the facility and the network.
//!
//! [`Transport`] executes a single exchange. The facility holds it behind
//! `Arc<dyn Transport>` so tests and offline demos can substitute the
//! deterministic [`ScriptedTransport`] for the production
//! [`ReqwestTransport`].

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use futures::future::BoxFuture;

use crate::error::HttpError;
use crate::request::{HttpRequest, HttpResponse};

/// Executes a single HTTP exchange.
///
/// Any exchange that produces a response — regardless of HTTP status —
/// resolves `Ok`. Only transport-level failures (unreachable host, malformed
/// URL, broken connection) resolve `Err`.
pub trait Transport: std::fmt::Debug + Send + Sync + 'static {
    /// Execute the request and resolve to its response.
    fn execute(&self, request: HttpRequest) -> BoxFuture<'static, Result<HttpResponse, HttpError>>;
}

/// Production transport backed by a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the client's default settings (the host's
    /// default timeouts apply; none are configured here).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'static, Result<HttpResponse, HttpError>> {
        let client = self.client.clone();
        Box::pin(async move {
            let url = reqwest::Url::parse(&request.url).map_err(|e| HttpError::InvalidUrl {
                url: request.url.clone(),
                reason: e.to_string(),
            })?;
            let response = client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, request.content_type.as_str())
                .body(request.body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();
            Ok(HttpResponse { status, body })
        })
    }
}

/// Deterministic in-memory transport for tests and offline demos.
///
/// Replies are queued up front and consumed in FIFO order; every executed
/// request is recorded, in dispatch order, for later inspection. A request
/// with no queued reply resolves to [`HttpError::NoScriptedReply`], which
/// the facility reports as a failure completion.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    /// Create a transport with no replies queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply with the given status and body.
    pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(HttpResponse {
                status,
                body: body.into(),
            }));
    }

    /// Queue a transport-level failure.
    pub fn push_failure(&self, reason: impl Into<String>) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(HttpError::Connection(reason.into())));
    }

    /// All requests executed so far, in dispatch order.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of replies still queued.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'static, Result<HttpResponse, HttpError>> {
        // Record at execute time so the log reflects dispatch order even
        // when completions are raced.
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(HttpError::NoScriptedReply {
                    url: request.url.clone(),
                })
            });

        Box::pin(async move { reply })
    }
}
