//! Pipeline composition: wraps the dispatcher in the middleware stack.

use haapi_core::{ApiResponse, InvokeError};
use tower::ServiceBuilder;

use super::metrics::MetricsLayer;
use crate::dispatch::dispatcher::Dispatcher;
use crate::dispatch::operation::ApiCall;

/// Build the dispatch pipeline by wrapping the `Dispatcher` with middleware.
///
/// Retries live inside the dispatcher, so the metrics span covers a whole
/// call including every attempt and inter-attempt delay.
#[must_use]
pub fn build_dispatch_pipeline(
    dispatcher: Dispatcher,
) -> impl tower::Service<ApiCall, Response = ApiResponse, Error = InvokeError> + Clone {
    ServiceBuilder::new().layer(MetricsLayer).service(dispatcher)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use haapi_core::{ErrorKind, TransportError};
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::call_args;
    use crate::dispatch::registry::OperationRegistry;
    use crate::dispatch::testing::{context, PassThrough};

    #[tokio::test]
    async fn pipeline_routes_through_dispatcher() {
        let harness = context(vec![Ok(ApiResponse::ok(json!({ "status": "ok" })))]);
        let mut registry = OperationRegistry::new();
        registry.register(PassThrough("test.op"));

        let svc = build_dispatch_pipeline(Dispatcher::new(harness.ctx.clone(), registry));
        let resp = svc
            .oneshot(ApiCall::new("test.op", call_args![]))
            .await
            .unwrap();
        assert_eq!(resp.body, json!({ "status": "ok" }));
        assert_eq!(harness.transport.request_count(), 1);
    }

    #[tokio::test]
    async fn pipeline_preserves_error_classification() {
        let harness = context(vec![Err(TransportError::status(601, None))]);
        let mut registry = OperationRegistry::new();
        registry.register(PassThrough("test.op"));

        let svc = build_dispatch_pipeline(Dispatcher::new(harness.ctx.clone(), registry));
        let err = svc
            .clone()
            .oneshot(ApiCall::new("test.op", call_args![]))
            .await
            .unwrap_err();
        assert_eq!(err.domain_kind(), Some(ErrorKind::BadCredentials));

        let err = svc
            .oneshot(ApiCall::new("test.unknown", call_args![]))
            .await
            .unwrap_err();
        assert_eq!(err.domain_kind(), Some(ErrorKind::ApiNotFound));
    }
}
