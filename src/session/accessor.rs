//! Session token accessor.
//!
//! Lifecycle per token: absent, present and valid, present and expired,
//! absent again. The last transition happens lazily on the next read, which
//! purges the stored value. Decode failures purge the same way and are never
//! surfaced to callers.

#[cfg(test)]
#[path = "accessor_test.rs"]
mod accessor_test;

use std::rc::Rc;

use super::claims::{DisplayIdentity, RoleHint, UntrustedClaims};
use super::clock::Clock;
use super::store::TokenStore;
use crate::config::{PROFILE_KEY, TOKEN_KEY};
use crate::models::usuario::UserProfile;

/// Handle on the persisted session. Clones share the same store and clock.
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn TokenStore>,
    clock: Rc<dyn Clock>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    pub fn new(store: Rc<dyn TokenStore>, clock: Rc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Session over `window.localStorage` and `Date.now()`.
    #[cfg(feature = "csr")]
    #[must_use]
    pub fn browser() -> Self {
        Self::new(Rc::new(super::store::BrowserStore), Rc::new(super::clock::SystemClock))
    }

    /// The stored token if it decodes and has not expired; purges it otherwise.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.valid_token().map(|(token, _)| token)
    }

    pub fn set_token(&self, token: &str) {
        self.store.set(TOKEN_KEY, token);
    }

    pub fn remove_token(&self) {
        self.store.remove(TOKEN_KEY);
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Role claim of a valid token. A UX hint, never an authorization check.
    #[must_use]
    pub fn user_role(&self) -> Option<RoleHint> {
        self.valid_token().and_then(|(_, claims)| claims.role_hint())
    }

    #[must_use]
    pub fn current_user(&self) -> Option<DisplayIdentity> {
        self.valid_token()
            .map(|(_, claims)| claims.display_identity())
    }

    /// Persist the profile returned by login alongside the token.
    pub fn store_profile(&self, profile: &UserProfile) {
        match serde_json::to_string(profile) {
            Ok(raw) => self.store.set(PROFILE_KEY, &raw),
            Err(e) => log::warn!("failed to serialize user profile: {e}"),
        }
    }

    /// Stored profile, only while the token is still valid.
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        if !self.is_authenticated() {
            return None;
        }
        let raw = self.store.get(PROFILE_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    /// Drop every session artifact (token and profile).
    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(PROFILE_KEY);
    }

    fn valid_token(&self) -> Option<(String, UntrustedClaims)> {
        let token = self.store.get(TOKEN_KEY)?;
        let claims = match UntrustedClaims::decode(&token) {
            Ok(claims) => claims,
            Err(e) => {
                log::warn!("discarding malformed session token: {e}");
                self.clear();
                return None;
            }
        };
        if claims.is_expired_at(self.clock.now_ms()) {
            log::info!("session token expired");
            self.clear();
            return None;
        }
        Some((token, claims))
    }
}
