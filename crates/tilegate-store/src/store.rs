//! The token store: the single source of truth for who is logged in.
//!
//! # Concurrency note
//!
//! `TokenStore` is NOT thread-safe by itself — it uses a plain
//! `HashMap`, not a concurrent one. This is intentional: the store is
//! owned by the server and shared through a mutex at a higher level
//! (see the `tilegate` facade). Every operation reads and writes store
//! state in one uninterrupted call, so whoever holds the lock observes
//! a consistent snapshot.

use std::collections::HashMap;
use std::time::Instant;

use rand::TryRngCore;
use rand::rngs::OsRng;
use tilegate_token::{DecodedCredential, SessionVerdict, TokenIdentity, codec};

use crate::{StoreConfig, StoreError};

/// The authoritative mapping of live login tokens to their expiry.
///
/// ## Lifecycle
///
/// ```text
/// issue() ──→ [live] ──→ revoke()            (explicit logout)
///                │
///                └─────→ sweep()             (expiry elapsed)
/// ```
///
/// A token is created only by [`issue`](Self::issue), never mutated
/// (its expiry is fixed at creation), and destroyed either by
/// [`revoke`](Self::revoke) or by [`sweep`](Self::sweep). Presence in
/// the map *is* the definition of "logged in"; absence is
/// indistinguishable between never-issued, revoked, and swept.
pub struct TokenStore {
    /// Live tokens, keyed by identity, valued by expiry instant.
    ///
    /// Keyed on the full `(username, token_id)` pair because one player
    /// may hold several live tokens (one per device).
    tokens: HashMap<TokenIdentity, Instant>,

    /// Configuration (token lifetime).
    config: StoreConfig,
}

impl TokenStore {
    /// Creates a new, empty store with the given config.
    ///
    /// The config is run through [`StoreConfig::validated`] so a wild
    /// lifetime cannot overflow expiry arithmetic later.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            tokens: HashMap::new(),
            config: config.validated(),
        }
    }

    /// Issues a fresh login token for an already-authenticated username.
    ///
    /// Generates a 128-bit token id from the OS entropy source, records
    /// the expiry as `now + token_lifetime`, and returns the identity
    /// together with its encoded credential string. On the vanishingly
    /// unlikely chance the generated identity already exists, the insert
    /// overwrites in place.
    ///
    /// # Errors
    /// Returns [`StoreError::RandomSource`] if the entropy source fails.
    /// There is no fallback generator.
    pub fn issue(
        &mut self,
        username: &str,
    ) -> Result<(TokenIdentity, String), StoreError> {
        let identity = TokenIdentity {
            username: username.to_owned(),
            token_id: generate_token_id()?,
        };
        let expires_at = Instant::now() + self.config.token_lifetime;
        self.tokens.insert(identity.clone(), expires_at);

        tracing::info!(%username, "login token issued");

        let credential = codec::encode(&identity);
        Ok((identity, credential))
    }

    /// Validates a credential string against the live tokens.
    ///
    /// Equivalent to [`validate_at`](Self::validate_at) with the current
    /// instant.
    pub fn validate(&self, credential: &str) -> SessionVerdict {
        self.validate_at(credential, Instant::now())
    }

    /// Validates a credential string as of a given instant.
    ///
    /// The verdict is `authenticated` only when the credential decodes,
    /// the identity is present, and `now` has not passed its expiry.
    /// The expiry check is done here as well as in the sweep: an expired
    /// token that the sweeper has not yet evicted must not validate, so
    /// there is no window where staleness depends on the sweep cadence.
    ///
    /// Malformed, unknown, and expired credentials all produce the same
    /// negative verdict.
    pub fn validate_at(&self, credential: &str, now: Instant) -> SessionVerdict {
        let identity = match codec::decode(credential) {
            DecodedCredential::WellFormed(identity) => identity,
            DecodedCredential::Malformed { username } => {
                return SessionVerdict::denied(username);
            }
        };
        let authenticated = match self.tokens.get(&identity) {
            Some(&expires_at) => now <= expires_at,
            None => false,
        };
        SessionVerdict {
            username: identity.username,
            authenticated,
        }
    }

    /// Revokes the token named by a credential string (logout).
    ///
    /// Idempotent silent no-op when the credential is malformed or the
    /// token is absent — a caller cannot distinguish "already logged
    /// out" from "never logged in" through this call.
    pub fn revoke(&mut self, credential: &str) {
        if let DecodedCredential::WellFormed(identity) = codec::decode(credential) {
            if self.tokens.remove(&identity).is_some() {
                tracing::info!(username = %identity.username, "login token revoked");
            }
        }
    }

    /// Removes every token whose expiry lies strictly before `now`.
    ///
    /// Returns the number of tokens removed, for observability. Tokens
    /// that have not expired are untouched.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.tokens.len();
        self.tokens.retain(|_, expires_at| *expires_at >= now);
        before - self.tokens.len()
    }

    /// Returns the number of live tokens (including any not yet swept).
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no tokens are live.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Draws a token id uniformly from the full 128-bit space.
///
/// The OS entropy source is the only generator used; if it fails, so
/// does issuance.
fn generate_token_id() -> Result<u128, StoreError> {
    let mut bytes = [0u8; 16];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| StoreError::RandomSource(e.to_string()))?;
    Ok(u128::from_le_bytes(bytes))
}

// =========================================================================
// Tests
// =========================================================================
