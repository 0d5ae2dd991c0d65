//! Domain error taxonomy shared by every HAAPI caller.
//!
//! A dispatch either settles with a response, a [`DomainError`] (a failure
//! the dispatcher recognised and translated), or the raw [`TransportError`]
//! it could not classify. [`InvokeError`] keeps the two apart so callers
//! never handle the same failure twice.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transport::TransportError;

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Fixed set of domain error kinds with stable numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The requested operation name is not registered. Never retried.
    ApiNotFound,
    /// The backend rejected the session or credentials (status 601).
    BadCredentials,
    /// A catalog operation received a missing or ill-typed argument.
    InvalidArgument,
}

impl ErrorKind {
    /// Every kind, in code order.
    pub const ALL: [ErrorKind; 3] = [
        ErrorKind::ApiNotFound,
        ErrorKind::BadCredentials,
        ErrorKind::InvalidArgument,
    ];

    /// Stable numeric code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            ErrorKind::ApiNotFound => 1,
            ErrorKind::BadCredentials => 2,
            ErrorKind::InvalidArgument => 3,
        }
    }

    /// Stable symbolic name, e.g. `"API_NOT_FOUND"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ErrorKind::ApiNotFound => "API_NOT_FOUND",
            ErrorKind::BadCredentials => "BAD_CREDENTIALS",
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// DomainError
// ---------------------------------------------------------------------------

/// A failure translated into the domain taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} ({code}): {message}", code = .kind.code())]
pub struct DomainError {
    pub kind: ErrorKind,
    pub message: String,
}

impl DomainError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn api_not_found(name: &str) -> Self {
        Self::new(
            ErrorKind::ApiNotFound,
            format!("api operation `{name}` is not registered"),
        )
    }

    #[must_use]
    pub fn bad_credentials(message_key: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadCredentials, message_key)
    }

    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }
}

// ---------------------------------------------------------------------------
// InvokeError
// ---------------------------------------------------------------------------

/// Terminal failure of a single dispatch.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvokeError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl InvokeError {
    /// The taxonomy kind, or `None` for a pass-through transport error.
    #[must_use]
    pub fn domain_kind(&self) -> Option<ErrorKind> {
        match self {
            InvokeError::Domain(err) => Some(err.kind),
            InvokeError::Transport(_) => None,
        }
    }

    #[must_use]
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            InvokeError::Transport(err) => Some(err),
            InvokeError::Domain(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportErrorKind;

    #[test]
    fn codes_are_stable_and_unique() {
        let codes: Vec<u16> = ErrorKind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes, vec![1, 2, 3]);
    }

    #[test]
    fn kind_serializes_as_symbolic_name() {
        let json = serde_json::to_string(&ErrorKind::BadCredentials).unwrap();
        assert_eq!(json, "\"BAD_CREDENTIALS\"");
        assert_eq!(ErrorKind::ApiNotFound.to_string(), "API_NOT_FOUND");
    }

    #[test]
    fn domain_error_display_includes_kind_and_code() {
        let err = DomainError::api_not_found("ankama.nope");
        assert_eq!(
            err.to_string(),
            "API_NOT_FOUND (1): api operation `ankama.nope` is not registered"
        );
    }

    #[test]
    fn invoke_error_distinguishes_domain_from_transport() {
        let domain: InvokeError = DomainError::bad_credentials("auth.error.banned").into();
        assert_eq!(domain.domain_kind(), Some(ErrorKind::BadCredentials));
        assert!(domain.as_transport().is_none());

        let transport: InvokeError =
            TransportError::with_kind(TransportErrorKind::RequestTimeout, "timed out").into();
        assert_eq!(transport.domain_kind(), None);
        assert!(transport.as_transport().unwrap().is_timeout());
    }
}
