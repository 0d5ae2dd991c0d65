//! HAAPI core: error taxonomy, auth-reason map, endpoint table, URL builder,
//! and the transport value types shared with the dispatcher.

pub mod auth_reasons;
pub mod endpoint;
pub mod error;
pub mod transport;
pub mod url_builder;

pub use auth_reasons::{message_key, resolve_message_key, UNKNOWN_REASON_KEY};
pub use endpoint::{Endpoint, UnknownEndpoint};
pub use error::{DomainError, ErrorKind, InvokeError};
pub use transport::{
    ApiRequest, ApiResponse, HttpMethod, TransportError, TransportErrorKind, API_KEY_HEADER,
};
pub use url_builder::UrlBuilder;
