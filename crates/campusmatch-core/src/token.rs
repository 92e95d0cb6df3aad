//! Session token storage and token-derived identity.
//!
//! The bearer token is the entire client-side session: set on login,
//! cleared on logout or expiry detection, absent initially, and never
//! persisted across restarts. The store is injected into whoever needs
//! it (constructor injection, not ambient module state), so tests can
//! run multiple independent sessions.

use std::sync::RwLock;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use secrecy::{ExposeSecret, SecretString};

use campusmatch_types::user::UserId;

/// Holds the current bearer token and derives the caller's own id from it.
///
/// The token is wrapped in [`secrecy::SecretString`]: it is exposed only
/// while building the Authorization header or decoding the claims, and
/// there is no `Debug` impl to leak it through.
pub struct TokenStore {
    token: RwLock<Option<SecretString>>,
}

impl TokenStore {
    /// Create an empty store (no session).
    pub fn new() -> Self {
        Self {
            token: RwLock::new(None),
        }
    }

    /// Replace the current token unconditionally.
    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(SecretString::from(token.into()));
        }
    }

    /// Clear the token. Idempotent.
    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    /// Whether a token is currently set.
    pub fn is_authenticated(&self) -> bool {
        self.token.read().map(|t| t.is_some()).unwrap_or(false)
    }

    /// A handle to the current token, if any. Side-effect-free.
    ///
    /// Callers expose the secret only at header-build time.
    pub fn token(&self) -> Option<SecretString> {
        let guard = self.token.read().ok()?;
        guard
            .as_ref()
            .map(|token| SecretString::from(token.expose_secret().to_owned()))
    }

    /// The caller's own user id, derived from the token's payload claims.
    ///
    /// Recomputed on every call -- never cached, so it can't go stale
    /// across a token change. Returns `None` for: no token, wrong segment
    /// count, undecodable payload, or a missing/non-numeric `sub` claim.
    /// Callers must treat `None` as "cannot attribute messages" and
    /// classify everything as foreign.
    ///
    /// The claim is read without verifying the token's signature;
    /// verification is the server's job, and nothing on the client trusts
    /// this id for anything but display attribution.
    pub fn own_identity(&self) -> Option<UserId> {
        let guard = self.token.read().ok()?;
        let token = guard.as_ref()?;
        decode_subject(token.expose_secret())
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the `sub` claim from a JWT-shaped token.
///
/// Accepts both a numeric claim and the stringified number the service
/// actually emits. Every failure mode collapses to `None`.
fn decode_subject(token: &str) -> Option<UserId> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return None,
    };

    let raw = URL_SAFE_NO_PAD.decode(payload.as_bytes()).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&raw).ok()?;

    match claims.get("sub")? {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Number(n) => n.as_i64().map(UserId),
        _ => None,
    }
}
