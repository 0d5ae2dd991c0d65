//! Metrics middleware for dispatched calls.
//!
//! Wraps each call in a `tracing` span carrying its duration and outcome, and
//! records a call counter and duration histogram through the `metrics` facade.
//! With no recorder installed the `metrics` calls are no-ops.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use haapi_core::{ApiResponse, InvokeError};
use tower::{Layer, Service};
use tracing::{info_span, Instrument};

use crate::dispatch::operation::ApiCall;

/// Counter of finished calls, labelled by `operation` and `outcome`.
pub const CALLS_TOTAL: &str = "haapi_calls_total";

/// Histogram of call durations in seconds, labelled by `operation`.
pub const CALL_DURATION_SECONDS: &str = "haapi_call_duration_seconds";

// ---------------------------------------------------------------------------
// MetricsLayer
// ---------------------------------------------------------------------------

/// Tower layer that instruments calls with timing and outcome.
#[derive(Debug, Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService { inner }
    }
}

// ---------------------------------------------------------------------------
// MetricsService
// ---------------------------------------------------------------------------

/// Service wrapper that records call duration and outcome.
#[derive(Debug, Clone)]
pub struct MetricsService<S> {
    inner: S,
}

/// Outcome label: `ok`, the domain kind name, or `transport`.
#[must_use]
pub fn outcome_label(result: &Result<ApiResponse, InvokeError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(InvokeError::Domain(err)) => err.kind.name(),
        Err(InvokeError::Transport(_)) => "transport",
    }
}

impl<S> Service<ApiCall> for MetricsService<S>
where
    S: Service<ApiCall, Response = ApiResponse, Error = InvokeError> + Send,
    S::Future: Send + 'static,
{
    type Response = ApiResponse;
    type Error = InvokeError;
    type Future = Pin<Box<dyn Future<Output = Result<ApiResponse, InvokeError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, call: ApiCall) -> Self::Future {
        let operation = call.name.clone();

        let span = info_span!(
            "api_call",
            operation = %operation,
            duration_ms = tracing::field::Empty,
            outcome = tracing::field::Empty,
        );

        let fut = self.inner.call(call);

        Box::pin(
            async move {
                let start = Instant::now();
                let result = fut.await;
                let elapsed = start.elapsed();
                let outcome = outcome_label(&result);

                #[allow(clippy::cast_possible_truncation)]
                let duration_ms = elapsed.as_millis() as u64;
                tracing::Span::current().record("duration_ms", duration_ms);
                tracing::Span::current().record("outcome", outcome);

                metrics::counter!(
                    CALLS_TOTAL,
                    "operation" => operation.clone(),
                    "outcome" => outcome
                )
                .increment(1);
                metrics::histogram!(CALL_DURATION_SECONDS, "operation" => operation)
                    .record(elapsed.as_secs_f64());

                tracing::info!(duration_ms, outcome, "api call complete");

                result
            }
            .instrument(span),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
