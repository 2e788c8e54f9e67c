//! # sim_http
//!
//! HTTP facility for the simulation client host runtime.
//!
//! This crate provides:
//!
//! - [`request`] — transient request and response descriptors.
//! - [`transport`] — the wire seam, with a production [`ReqwestTransport`]
//!   and a deterministic [`ScriptedTransport`] for tests and offline demos.
//! - [`facility`] — off-thread dispatch with completions delivered back on
//!   the draining thread.
//! - [`error`] — facility error types.

pub mod error;
pub mod facility;
pub mod request;
pub mod transport;

pub use error::HttpError;
pub use facility::{Completion, HandlerId, HttpFacility};
pub use request::{CONTENT_TYPE_JSON, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, ScriptedTransport, Transport};
