use std::fmt;
use std::sync::Arc;

use haapi_core::UrlBuilder;

use super::retry::RetryPolicy;
use crate::traits::{SessionAuth, Transport};

/// Collaborators shared by the dispatcher and every operation.
///
/// Built once, before the dispatcher, and passed explicitly: operations reach
/// the transport and URL builder through it rather than through globals.
#[derive(Clone)]
pub struct DispatchContext {
    pub transport: Arc<dyn Transport>,
    pub auth: Arc<dyn SessionAuth>,
    pub urls: UrlBuilder,
    pub retry: RetryPolicy,
}

impl DispatchContext {
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        auth: Arc<dyn SessionAuth>,
        urls: UrlBuilder,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            auth,
            urls,
            retry,
        }
    }
}

impl fmt::Debug for DispatchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchContext")
            .field("base_url", &self.urls.base_url())
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
