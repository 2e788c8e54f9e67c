//! Transient request and response descriptors.

use uuid::Uuid;

/// MIME type attached to every body this client emits.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// An outbound request descriptor.
///
/// Created per call and owned by the facility until the matching completion
/// is delivered; the completion carries it back for diagnostics.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Unique request id, for log correlation.
    pub id: Uuid,
    /// Fully qualified target URL.
    pub url: String,
    /// Request body, transmitted as-is.
    pub body: String,
    /// `Content-Type` header value.
    pub content_type: String,
}

impl HttpRequest {
    /// Build a POST request carrying a JSON body.
    ///
    /// POST is the only method this system emits, so the constructor fixes
    /// the content type to [`CONTENT_TYPE_JSON`].
    #[must_use]
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            body: body.into(),
            content_type: CONTENT_TYPE_JSON.to_string(),
        }
    }
}

/// A response as observed by the facility.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code of the exchange.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
