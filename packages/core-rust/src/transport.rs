//! Value types exchanged with the transport collaborator.
//!
//! The core never performs I/O itself; it only builds [`ApiRequest`] values
//! and inspects the status code and `reason` field of a [`TransportError`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header carrying the session api key.
pub const API_KEY_HEADER: &str = "APIKEY";

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// HTTP verb used by a catalog operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully composed request ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Absolute URL, query string included.
    pub url: String,
    /// Sent as the [`API_KEY_HEADER`] header when present.
    pub api_key: Option<String>,
    /// Extra headers, in insertion order.
    pub headers: Vec<(String, String)>,
    /// `application/x-www-form-urlencoded` body fields. Empty means no body.
    pub form: Vec<(String, String)>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            api_key: None,
            headers: Vec::new(),
            form: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_form_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((name.into(), value.into()));
        self
    }
}

/// Successful transport response. The payload is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }
}

// ---------------------------------------------------------------------------
// TransportError
// ---------------------------------------------------------------------------

/// Transport-level failure tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The request did not complete within the transport's deadline.
    RequestTimeout,
    /// The connection could not be established.
    Connect,
    /// Any other I/O or protocol failure.
    Network,
}

impl TransportErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TransportErrorKind::RequestTimeout => "request-timeout",
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Network => "network",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed transport call: an error status with an optional body, or an
/// I/O failure tagged with a [`TransportErrorKind`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("transport error{}: {message}", describe(.status_code, .kind))]
pub struct TransportError {
    pub status_code: Option<u16>,
    pub body: Option<Value>,
    pub kind: Option<TransportErrorKind>,
    pub message: String,
}

#[allow(clippy::ref_option)]
fn describe(status_code: &Option<u16>, kind: &Option<TransportErrorKind>) -> String {
    match (status_code, kind) {
        (Some(code), Some(kind)) => format!(" [{code}, {kind}]"),
        (Some(code), None) => format!(" [{code}]"),
        (None, Some(kind)) => format!(" [{kind}]"),
        (None, None) => String::new(),
    }
}

impl TransportError {
    /// An error status returned by the backend.
    #[must_use]
    pub fn status(status_code: u16, body: Option<Value>) -> Self {
        Self {
            status_code: Some(status_code),
            body,
            kind: None,
            message: format!("backend responded with status {status_code}"),
        }
    }

    /// A failure that never produced a status.
    #[must_use]
    pub fn with_kind(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            body: None,
            kind: Some(kind),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::with_kind(TransportErrorKind::RequestTimeout, message)
    }

    /// Tags an existing error, keeping its status and body.
    #[must_use]
    pub fn tagged(mut self, kind: TransportErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// The backend's `reason` field, when the body is an object carrying one.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.body.as_ref()?.get("reason")?.as_str()
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.kind == Some(TransportErrorKind::RequestTimeout)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reason_reads_string_field_from_object_body() {
        let err = TransportError::status(601, Some(json!({ "reason": "BAN" })));
        assert_eq!(err.reason(), Some("BAN"));
    }

    #[test]
    fn reason_absent_for_missing_or_non_string_field() {
        assert_eq!(TransportError::status(601, None).reason(), None);
        assert_eq!(
            TransportError::status(601, Some(json!({ "reason": 4 }))).reason(),
            None
        );
        assert_eq!(
            TransportError::status(601, Some(json!("BAN"))).reason(),
            None
        );
    }

    #[test]
    fn timeout_tag_is_detected() {
        assert!(TransportError::timeout("slow").is_timeout());
        assert!(!TransportError::status(500, None).is_timeout());
        assert!(TransportError::status(603, None)
            .tagged(TransportErrorKind::RequestTimeout)
            .is_timeout());
    }

    #[test]
    fn display_mentions_status_and_kind() {
        let err = TransportError::status(603, None).tagged(TransportErrorKind::RequestTimeout);
        assert_eq!(
            err.to_string(),
            "transport error [603, request-timeout]: backend responded with status 603"
        );
        assert_eq!(
            TransportError::with_kind(TransportErrorKind::Connect, "refused").to_string(),
            "transport error [connect]: refused"
        );
    }

    #[test]
    fn request_builder_accumulates_fields() {
        let req = ApiRequest::post("https://haapi.ankama.com/x")
            .with_api_key("key")
            .with_header("Accept-Language", "fr")
            .with_form_field("game", "1");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.api_key.as_deref(), Some("key"));
        assert_eq!(req.headers, vec![("Accept-Language".into(), "fr".into())]);
        assert_eq!(req.form, vec![("game".into(), "1".into())]);
    }
}
