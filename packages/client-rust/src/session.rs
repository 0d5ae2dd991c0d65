//! Session state shared by the dispatcher and the application.
//!
//! [`ApiKeySession`] holds the current api key behind an `ArcSwapOption` so
//! reads never block, and publishes the logged-out state on a `watch`
//! channel. It is the default [`SessionAuth`] collaborator: catalog
//! operations fall back to its key, so a logout stops the key being sent.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tokio::sync::watch;
use tracing::info;

use crate::traits::SessionAuth;

/// Api key holder with a logout signal.
///
/// State machine: `LoggedIn(key)` -> `LoggedOut`. A new key may be stored
/// after logout, which re-arms the signal.
#[derive(Debug)]
pub struct ApiKeySession {
    api_key: ArcSwapOption<String>,
    logged_out: watch::Sender<bool>,
}

impl ApiKeySession {
    /// Session with no api key yet.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            api_key: ArcSwapOption::empty(),
            logged_out: tx,
        }
    }

    /// Session already holding `api_key`.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_api_key(api_key);
        session
    }

    /// Store a new api key and clear the logged-out flag.
    pub fn set_api_key(&self, api_key: impl Into<String>) {
        self.api_key.store(Some(Arc::new(api_key.into())));
        self.logged_out.send_replace(false);
    }

    #[must_use]
    pub fn is_logged_out(&self) -> bool {
        *self.logged_out.borrow()
    }

    /// Receiver that flips to `true` when the backend revokes the session.
    #[must_use]
    pub fn logout_receiver(&self) -> watch::Receiver<bool> {
        self.logged_out.subscribe()
    }
}

impl Default for ApiKeySession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionAuth for ApiKeySession {
    fn api_key(&self) -> Option<String> {
        self.api_key.load_full().map(|key| key.as_str().to_owned())
    }

    fn logout(&self) {
        let previous = self.api_key.swap(None);
        let was_logged_out = self.logged_out.send_replace(true);
        if previous.is_some() || !was_logged_out {
            info!("session logged out");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
