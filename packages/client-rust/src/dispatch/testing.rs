//! Test doubles shared by the dispatch unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use haapi_core::{ApiRequest, ApiResponse, InvokeError, TransportError, UrlBuilder};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::time::Instant;

use super::context::DispatchContext;
use super::operation::{ApiOperation, CallArgs};
use super::retry::RetryPolicy;
use crate::traits::{SessionAuth, Transport};

pub(crate) const TEST_BASE_URL: &str = "https://haapi.test/";

type Scripted = Result<ApiResponse, TransportError>;

/// Transport that replays a script of outcomes and records every request.
///
/// Once the script is drained it keeps answering with `fallback`, or an
/// empty 200 when there is none.
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    fallback: Option<Scripted>,
    requests: Mutex<Vec<(Instant, ApiRequest)>>,
}

impl ScriptedTransport {
    pub(crate) fn new(script: Vec<Scripted>, fallback: Option<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().iter().map(|(_, r)| r.clone()).collect()
    }

    pub(crate) fn request_times(&self) -> Vec<Instant> {
        self.requests.lock().iter().map(|(t, _)| *t).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn perform(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().push((Instant::now(), request));
        let next = self.script.lock().pop_front();
        next.or_else(|| self.fallback.clone())
            .unwrap_or_else(|| Ok(ApiResponse::ok(Value::Null)))
    }
}

/// Auth collaborator that only counts logouts.
#[derive(Default)]
pub(crate) struct CountingAuth {
    logouts: AtomicU32,
}

impl CountingAuth {
    pub(crate) fn logouts(&self) -> u32 {
        self.logouts.load(Ordering::SeqCst)
    }
}

impl SessionAuth for CountingAuth {
    fn logout(&self) {
        self.logouts.fetch_add(1, Ordering::SeqCst);
    }
}

/// Operation that forwards a bare GET to the transport.
pub(crate) struct PassThrough(pub &'static str);

#[async_trait]
impl ApiOperation for PassThrough {
    fn name(&self) -> &'static str {
        self.0
    }

    async fn call(
        &self,
        ctx: &DispatchContext,
        _args: &CallArgs,
    ) -> Result<ApiResponse, InvokeError> {
        let request = ApiRequest::get(format!("{}test", ctx.urls.base_url()));
        Ok(ctx.transport.perform(request).await?)
    }
}

pub(crate) struct Harness {
    pub ctx: DispatchContext,
    pub transport: Arc<ScriptedTransport>,
    pub auth: Arc<CountingAuth>,
}

pub(crate) fn context_with(
    script: Vec<Scripted>,
    fallback: Option<Scripted>,
    retry: RetryPolicy,
) -> Harness {
    let transport = Arc::new(ScriptedTransport::new(script, fallback));
    let auth = Arc::new(CountingAuth::default());
    let ctx = DispatchContext::new(
        transport.clone(),
        auth.clone(),
        UrlBuilder::new(TEST_BASE_URL),
        retry,
    );
    Harness {
        ctx,
        transport,
        auth,
    }
}

pub(crate) fn context(script: Vec<Scripted>) -> Harness {
    context_with(script, None, RetryPolicy::NONE)
}
