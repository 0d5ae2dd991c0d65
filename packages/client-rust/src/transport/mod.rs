//! Transport implementations.

pub mod http;

pub use self::http::HttpTransport;
