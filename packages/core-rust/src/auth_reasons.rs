//! Backend credential-rejection reasons -> user-facing message keys.
//!
//! When the backend answers with the bad-credentials status it puts a short
//! `reason` code in the body. The launcher UI shows a translated message
//! selected by the key returned here.

/// Message key used when the backend sends no reason, or one not in the map.
pub const UNKNOWN_REASON_KEY: &str = "auth.error.unknown";

/// `(backend reason, message key)` pairs. Reasons are matched exactly.
pub const AUTH_REASONS: &[(&str, &str)] = &[
    ("BAN", "auth.error.banned"),
    ("BLACKLIST", "auth.error.blacklisted"),
    ("LOCKED", "auth.error.locked"),
    ("DELETED", "auth.error.deleted"),
    ("RESETANKAMA", "auth.error.resetAnkama"),
    ("OTPTIMEFAILED", "auth.error.otpTimeFailed"),
    ("SECURITYCARD", "auth.error.securityCard"),
    ("BRUTEFORCE", "auth.error.bruteforce"),
    ("FAILED", "auth.error.failed"),
    ("PARTNER", "auth.error.partner"),
    ("MAILNOVALID", "auth.error.mailNotValidated"),
    ("BETACLOSED", "auth.error.betaClosed"),
    ("NOACCOUNT", "auth.error.noAccount"),
    ("ACCOUNT_LINKED", "auth.error.accountLinked"),
    ("ACCOUNT_INVALID", "auth.error.accountInvalid"),
    ("ACCOUNT_SHIELDED", "auth.error.accountShielded"),
];

/// Message key for `reason`, if the reason is known.
#[must_use]
pub fn message_key(reason: &str) -> Option<&'static str> {
    AUTH_REASONS
        .iter()
        .find(|(known, _)| *known == reason)
        .map(|(_, key)| *key)
}

/// Message key for an optional reason, falling back to [`UNKNOWN_REASON_KEY`].
#[must_use]
pub fn resolve_message_key(reason: Option<&str>) -> &'static str {
    reason.and_then(message_key).unwrap_or(UNKNOWN_REASON_KEY)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ban_maps_to_banned_key() {
        assert_eq!(message_key("BAN"), Some("auth.error.banned"));
    }

    #[test]
    fn reasons_are_case_sensitive() {
        assert_eq!(message_key("ban"), None);
    }

    #[test]
    fn unmapped_or_missing_reason_falls_back() {
        assert_eq!(resolve_message_key(Some("SOMETHING_NEW")), UNKNOWN_REASON_KEY);
        assert_eq!(resolve_message_key(None), UNKNOWN_REASON_KEY);
        assert_eq!(resolve_message_key(Some("LOCKED")), "auth.error.locked");
    }

    #[test]
    fn reasons_are_unique() {
        let reasons: HashSet<_> = AUTH_REASONS.iter().map(|(r, _)| *r).collect();
        assert_eq!(reasons.len(), AUTH_REASONS.len());
        assert!(AUTH_REASONS.iter().all(|(_, key)| *key != UNKNOWN_REASON_KEY));
    }
}
