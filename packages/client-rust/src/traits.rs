use async_trait::async_trait;
use haapi_core::{ApiRequest, ApiResponse, TransportError};

/// Request-performing capability the dispatcher drives.
/// Implementations: reqwest over HTTPS, scripted fakes (tests).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request. Error statuses and I/O failures both come back
    /// as `TransportError`; the transport owns any per-request deadline and
    /// reports an expiry as `TransportErrorKind::RequestTimeout`.
    async fn perform(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Session capability: the current api key and its teardown.
///
/// `logout` is fire-and-forget: the dispatcher calls it while classifying a
/// failure and never waits on it. It must be idempotent and safe to call from
/// several in-flight dispatches at once. After it returns, `api_key` must no
/// longer yield the revoked key.
pub trait SessionAuth: Send + Sync {
    /// Key used by operations whose caller did not pass one. `None` when
    /// logged out or when the session does not hold keys.
    fn api_key(&self) -> Option<String> {
        None
    }

    fn logout(&self);
}
