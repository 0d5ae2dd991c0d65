//! reqwest-backed [`Transport`].

use async_trait::async_trait;
use haapi_core::{
    ApiRequest, ApiResponse, HttpMethod, TransportError, TransportErrorKind, API_KEY_HEADER,
};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Method, StatusCode};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::dispatch::ClientConfig;
use crate::traits::Transport;

/// HTTPS transport to the HAAPI backend.
///
/// Error statuses (including the backend's 6xx codes) are returned as
/// `TransportError` with the parsed body; reqwest timeouts are tagged
/// `request-timeout` so the dispatcher can retry them.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client with the configured deadlines and user agent.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error (e.g. TLS backend initialisation).
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self { client })
    }

}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

fn header_map(request: &ApiRequest) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    let api_key = request.api_key.as_deref().map(|key| (API_KEY_HEADER, key));
    let extra = request.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    for (name, value) in api_key.into_iter().chain(extra) {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            TransportError::with_kind(
                TransportErrorKind::Network,
                format!("invalid header name {name:?}: {e}"),
            )
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            TransportError::with_kind(
                TransportErrorKind::Network,
                format!("invalid value for header {}: {e}", name.as_str()),
            )
        })?;
        headers.append(name, value);
    }
    Ok(headers)
}

/// Map a reqwest failure onto the transport error tags.
fn classify_reqwest_error(err: &reqwest::Error) -> TransportError {
    let kind = if err.is_timeout() {
        TransportErrorKind::RequestTimeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Network
    };
    let mut error = TransportError::with_kind(kind, err.to_string());
    error.status_code = err.status().map(|s| s.as_u16());
    error
}

/// A body-read failure after an error status keeps that status, so a 603
/// whose body never arrives still reaches the logout path.
fn body_read_failure(mut error: TransportError, status: StatusCode) -> TransportError {
    if !status.is_success() {
        error.status_code = Some(status.as_u16());
    }
    error
}

/// Decode a body as JSON; non-JSON text is kept as a JSON string, empty as `null`.
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        debug!(method = %request.method, url = %request.url, "performing request");

        let headers = header_map(&request)?;
        let mut builder = self
            .client
            .request(method(request.method), &request.url)
            .headers(headers);
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }

        let response = builder.send().await.map_err(|e| classify_reqwest_error(&e))?;
        let status: StatusCode = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| body_read_failure(classify_reqwest_error(&e), status))?;
        let body = decode_body(&text);

        if status.is_success() {
            Ok(ApiResponse::new(status.as_u16(), body))
        } else {
            Err(TransportError::status(status.as_u16(), Some(body)))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_body_variants() {
        assert_eq!(decode_body(""), Value::Null);
        assert_eq!(decode_body("  \n"), Value::Null);
        assert_eq!(decode_body(r#"{"reason":"BAN"}"#), json!({ "reason": "BAN" }));
        assert_eq!(decode_body("Bad Gateway"), json!("Bad Gateway"));
    }

    #[test]
    fn header_map_includes_api_key_and_extras() {
        let request = ApiRequest::get("https://haapi.test/x")
            .with_api_key("secret")
            .with_header("Accept-Language", "fr");
        let headers = header_map(&request).unwrap();
        assert_eq!(headers.get("apikey").unwrap(), "secret");
        assert_eq!(headers.get("accept-language").unwrap(), "fr");
    }

    #[test]
    fn header_map_rejects_invalid_value() {
        let request = ApiRequest::get("https://haapi.test/x").with_api_key("bad\nkey");
        let err = header_map(&request).unwrap_err();
        assert_eq!(err.kind, Some(TransportErrorKind::Network));
        assert!(err.message.contains("apikey"), "{}", err.message);
    }

    #[test]
    fn body_read_failure_keeps_error_status() {
        let err = body_read_failure(
            TransportError::timeout("body read timed out"),
            StatusCode::from_u16(603).unwrap(),
        );
        assert_eq!(err.status_code, Some(603));
        assert!(err.is_timeout());

        let classification = crate::dispatch::classify(&err, 1, 3);
        assert!(classification.logout);

        let err = body_read_failure(TransportError::timeout("slow"), StatusCode::OK);
        assert_eq!(err.status_code, None);
    }

    #[test]
    fn verbs_map_to_reqwest_methods() {
        assert_eq!(method(HttpMethod::Get), Method::GET);
        assert_eq!(method(HttpMethod::Post), Method::POST);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error_without_status() {
        let config = ClientConfig {
            connect_timeout: std::time::Duration::from_millis(200),
            request_timeout: std::time::Duration::from_millis(500),
            ..ClientConfig::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        // Port 9 (discard) on localhost is closed on CI machines.
        let err = transport
            .perform(ApiRequest::get("http://127.0.0.1:9/json"))
            .await
            .unwrap_err();
        assert!(err.status_code.is_none());
        assert!(err.kind.is_some());
    }
}
