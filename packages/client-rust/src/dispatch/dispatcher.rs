//! The public dispatch entry point: name lookup, retry loop, and failure
//! classification around a single operation call.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use haapi_core::{ApiResponse, DomainError, Endpoint, InvokeError, TransportError, UrlBuilder};
use tower::Service;
use tracing::{debug, error, warn};

use super::classify::{classify, Verdict};
use super::config::ClientConfig;
use super::context::DispatchContext;
use super::operation::{ApiCall, CallArgs};
use super::registry::OperationRegistry;
use super::retry::{retry, AttemptError};
use crate::catalog::register_catalog;
use crate::traits::SessionAuth;
use crate::transport::HttpTransport;

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

struct Inner {
    ctx: DispatchContext,
    registry: OperationRegistry,
    call_id_counter: AtomicU64,
}

/// Invokes registered operations by name.
///
/// Cheap to clone; clones share the registry and collaborators. Concurrent
/// dispatches are independent: the only shared state is read-only apart from
/// the call-id counter.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(ctx: DispatchContext, registry: OperationRegistry) -> Self {
        Self {
            inner: Arc::new(Inner {
                ctx,
                registry,
                call_id_counter: AtomicU64::new(1),
            }),
        }
    }

    /// A dispatcher over the full HAAPI catalog and a reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `config` fails validation, or an error if the
    /// HTTP client cannot be built.
    pub fn connect(config: &ClientConfig, auth: Arc<dyn SessionAuth>) -> anyhow::Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config)?;
        let ctx = DispatchContext::new(
            Arc::new(transport),
            auth,
            UrlBuilder::new(config.base_url.clone()),
            config.retry,
        );
        let mut registry = OperationRegistry::new();
        register_catalog(&mut registry);
        Ok(Self::new(ctx, registry))
    }

    #[must_use]
    pub fn context(&self) -> &DispatchContext {
        &self.inner.ctx
    }

    #[must_use]
    pub fn registry(&self) -> &OperationRegistry {
        &self.inner.registry
    }

    /// Absolute URL for `endpoint`, with `query` appended when non-empty.
    #[must_use]
    pub fn build_url<K, V>(&self, endpoint: Endpoint, query: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.inner.ctx.urls.build_url(endpoint, query)
    }

    fn next_call_id(&self) -> u64 {
        self.inner.call_id_counter.fetch_add(1, Ordering::Relaxed)
    }

    /// Invoke the operation registered under `name`.
    ///
    /// An unknown name fails at once with `API_NOT_FOUND` and performs no
    /// transport I/O. Otherwise the operation runs under the retry policy and
    /// every transport failure is classified:
    ///
    /// - 601: `BAD_CREDENTIALS` with the mapped reason key, never retried
    /// - 603: the session is logged out (the failure is still classified below)
    /// - request timeout within the retry budget: retried after a delay
    /// - anything else: the transport error is returned unchanged
    ///
    /// # Errors
    ///
    /// Returns `InvokeError::Domain` for translated failures and
    /// `InvokeError::Transport` for pass-through transport failures.
    pub async fn invoke(&self, name: &str, args: CallArgs) -> Result<ApiResponse, InvokeError> {
        let Some(operation) = self.inner.registry.lookup(name) else {
            error!(operation = name, "api operation not found");
            return Err(DomainError::api_not_found(name).into());
        };

        let call_id = self.next_call_id();
        let ctx = &self.inner.ctx;
        let args = &args;
        let operation = &operation;

        retry(&ctx.retry, |attempt| async move {
            debug!(operation = name, call_id, attempt, "invoking operation");
            match operation.call(ctx, args).await {
                Ok(response) => Ok(response),
                Err(InvokeError::Transport(err)) => {
                    Err(self.on_transport_failure(name, call_id, attempt, err))
                }
                Err(other) => Err(AttemptError::Abort(other)),
            }
        })
        .await
    }

    /// Apply the classification of one failed attempt: trigger side effects
    /// and tell the retry controller what to do next.
    fn on_transport_failure(
        &self,
        name: &str,
        call_id: u64,
        attempt: u32,
        err: TransportError,
    ) -> AttemptError<InvokeError> {
        let ctx = &self.inner.ctx;
        let classification = classify(&err, attempt, ctx.retry.max_retries);

        if classification.logout {
            warn!(
                operation = name,
                call_id,
                status = err.status_code,
                "session revoked by backend, logging out"
            );
            ctx.auth.logout();
        }

        match classification.verdict {
            Verdict::BadCredentials(domain) => {
                error!(
                    operation = name,
                    call_id,
                    reason = err.reason(),
                    message_key = %domain.message,
                    "backend rejected credentials"
                );
                AttemptError::Abort(domain.into())
            }
            Verdict::Retry => {
                warn!(
                    operation = name,
                    call_id,
                    attempt,
                    max_attempts = ctx.retry.max_attempts(),
                    "request timed out, retrying"
                );
                AttemptError::Retry(err.into())
            }
            Verdict::Surface => AttemptError::Abort(err.into()),
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("ctx", &self.inner.ctx)
            .field("operations", &self.inner.registry.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// tower::Service
// ---------------------------------------------------------------------------

impl Service<ApiCall> for Dispatcher {
    type Response = ApiResponse;
    type Error = InvokeError;
    type Future = Pin<Box<dyn Future<Output = Result<ApiResponse, InvokeError>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, call: ApiCall) -> Self::Future {
        let dispatcher = self.clone();
        Box::pin(async move { dispatcher.invoke(&call.name, call.args).await })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
