//! HAAPI client: a name-addressed operation dispatcher for the Ankama
//! backend, with bounded retries, failure classification, and a reqwest
//! transport.

pub mod catalog;
pub mod dispatch;
pub mod session;
pub mod telemetry;
pub mod traits;
pub mod transport;

pub use catalog::{register_catalog, EndpointOperation, Param, Placement, CATALOG};
pub use dispatch::{
    build_dispatch_pipeline, ApiCall, ApiOperation, CallArgs, ClientConfig, ConfigError,
    DispatchContext, Dispatcher, OperationRegistry, RetryPolicy,
};
pub use haapi_core::{
    ApiRequest, ApiResponse, DomainError, Endpoint, ErrorKind, InvokeError, TransportError,
    TransportErrorKind,
};
pub use session::ApiKeySession;
pub use telemetry::{init_tracing, LogFormat};
pub use traits::{SessionAuth, Transport};
pub use transport::HttpTransport;

#[doc(hidden)]
pub use serde_json as __serde_json;
