//! Tower middleware layers for the dispatch pipeline.
//!
//! - [`metrics`]: Call timing and outcome via `tracing` spans and `metrics`
//! - [`pipeline`]: Composes the layers over a [`Dispatcher`](crate::dispatch::Dispatcher)

pub mod metrics;
pub mod pipeline;

pub use self::metrics::MetricsLayer;
pub use pipeline::build_dispatch_pipeline;
