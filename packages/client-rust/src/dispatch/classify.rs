//! Failure classification: maps a transport failure observed on one attempt
//! to a verdict (translate, retry, surface) plus the logout side effect.

use haapi_core::{resolve_message_key, DomainError, TransportError};

/// Backend status for rejected credentials.
pub const STATUS_BAD_CREDENTIALS: u16 = 601;

/// Backend status requiring the local session to be torn down.
pub const STATUS_SESSION_REVOKED: u16 = 603;

/// What the dispatcher should do with a failed attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Terminal: surface a translated domain error.
    BadCredentials(DomainError),
    /// Transient: schedule another attempt.
    Retry,
    /// Terminal: surface the transport error unchanged.
    Surface,
}

/// Classification of one failed attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub verdict: Verdict,
    /// Whether the session must be logged out. Independent of `verdict`.
    pub logout: bool,
}

/// Classify a transport failure seen on the 1-based `attempt`.
///
/// Rules, first match wins for the verdict:
/// 1. status 601 -> `BadCredentials` with the message key mapped from the
///    body's `reason`; nothing else is evaluated.
/// 2. status 603 -> `logout`, and evaluation continues.
/// 3. kind `request-timeout` and `attempt <= max_retries` -> `Retry`.
/// 4. otherwise -> `Surface`.
#[must_use]
pub fn classify(error: &TransportError, attempt: u32, max_retries: u32) -> Classification {
    if error.status_code == Some(STATUS_BAD_CREDENTIALS) {
        let message_key = resolve_message_key(error.reason());
        return Classification {
            verdict: Verdict::BadCredentials(DomainError::bad_credentials(message_key)),
            logout: false,
        };
    }

    let logout = error.status_code == Some(STATUS_SESSION_REVOKED);

    let verdict = if error.is_timeout() && attempt <= max_retries {
        Verdict::Retry
    } else {
        Verdict::Surface
    };

    Classification { verdict, logout }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use haapi_core::{ErrorKind, TransportErrorKind, UNKNOWN_REASON_KEY};
    use serde_json::json;

    use super::*;

    #[test]
    fn bad_credentials_maps_reason() {
        let err = TransportError::status(601, Some(json!({ "reason": "BAN" })));
        let c = classify(&err, 1, 3);
        assert!(!c.logout);
        match c.verdict {
            Verdict::BadCredentials(domain) => {
                assert_eq!(domain.kind, ErrorKind::BadCredentials);
                assert_eq!(domain.message, "auth.error.banned");
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
    }

    #[test]
    fn bad_credentials_with_unmapped_reason_uses_fallback_key() {
        let err = TransportError::status(601, Some(json!({ "reason": "NEW_REASON" })));
        assert_eq!(
            classify(&err, 1, 3).verdict,
            Verdict::BadCredentials(DomainError::bad_credentials(UNKNOWN_REASON_KEY))
        );

        let no_body = TransportError::status(601, None);
        assert_eq!(
            classify(&no_body, 1, 3).verdict,
            Verdict::BadCredentials(DomainError::bad_credentials(UNKNOWN_REASON_KEY))
        );
    }

    #[test]
    fn bad_credentials_is_never_retried_even_if_tagged_timeout() {
        let err = TransportError::status(601, None).tagged(TransportErrorKind::RequestTimeout);
        assert!(matches!(
            classify(&err, 1, 3).verdict,
            Verdict::BadCredentials(_)
        ));
    }

    #[test]
    fn session_revoked_requests_logout_and_surfaces() {
        let err = TransportError::status(603, None);
        let c = classify(&err, 1, 3);
        assert!(c.logout);
        assert_eq!(c.verdict, Verdict::Surface);
    }

    #[test]
    fn session_revoked_does_not_block_timeout_retry() {
        let err = TransportError::status(603, None).tagged(TransportErrorKind::RequestTimeout);
        let c = classify(&err, 2, 3);
        assert!(c.logout);
        assert_eq!(c.verdict, Verdict::Retry);
    }

    #[test]
    fn timeout_retries_up_to_max_retries_inclusive() {
        let err = TransportError::timeout("slow");
        assert_eq!(classify(&err, 1, 3).verdict, Verdict::Retry);
        assert_eq!(classify(&err, 3, 3).verdict, Verdict::Retry);
        assert_eq!(classify(&err, 4, 3).verdict, Verdict::Surface);
        assert_eq!(classify(&err, 1, 0).verdict, Verdict::Surface);
    }

    #[test]
    fn other_failures_surface_unchanged() {
        for err in [
            TransportError::status(500, Some(json!({ "reason": "BAN" }))),
            TransportError::status(404, None),
            TransportError::with_kind(TransportErrorKind::Connect, "refused"),
        ] {
            let c = classify(&err, 1, 3);
            assert_eq!(c.verdict, Verdict::Surface);
            assert!(!c.logout);
        }
    }
}
