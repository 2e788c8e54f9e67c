//! HTTP-facility error types.

/// Errors that can occur while executing a request.
///
/// These never reach the dispatching caller synchronously — the facility
/// absorbs them and reports a failure completion instead.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The request URL could not be parsed.
    #[error("invalid request URL `{url}`: {reason}")]
    InvalidUrl {
        /// The URL as supplied by the caller.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The underlying HTTP client failed to complete the exchange.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A connection-level failure reported without a client error value.
    #[error("connection error: {0}")]
    Connection(String),

    /// A scripted transport had no reply queued for the request.
    #[error("no scripted reply queued for `{url}`")]
    NoScriptedReply {
        /// The URL of the unmatched request.
        url: String,
    },
}
