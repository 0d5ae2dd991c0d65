//! Operation dispatch framework.
//!
//! This module implements the call pipeline:
//!
//! 1. **Registry** (`registry`): operation name -> `ApiOperation`
//! 2. **Retry** (`retry`): bounded attempts with a randomized delay window
//! 3. **Classification** (`classify`): transport failure -> verdict + logout
//! 4. **Dispatcher** (`dispatcher`): lookup, retry loop, classification
//! 5. **Middleware** (`middleware`): Tower layers over the dispatcher

pub mod classify;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod middleware;
pub mod operation;
pub mod registry;
pub mod retry;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types for convenient access.
pub use classify::{classify, Classification, Verdict};
pub use config::{ClientConfig, ConfigError, DEFAULT_BASE_URL};
pub use context::DispatchContext;
pub use dispatcher::Dispatcher;
pub use middleware::{build_dispatch_pipeline, MetricsLayer};
pub use operation::{ApiCall, ApiOperation, CallArgs};
pub use registry::OperationRegistry;
pub use retry::{retry, AttemptError, RetryPolicy};
