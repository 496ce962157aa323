//! `SessionAuthority`: the one handle the request layer talks to.
//!
//! Ties the store and the sweeper together: the store lives behind an
//! `Arc<tokio::sync::Mutex<_>>` shared between request handlers and the
//! background sweep task. The store itself is single-owner and
//! unsynchronized; all cross-task coordination happens here.

use std::sync::Arc;
use std::time::Duration;

use tilegate_store::{StoreConfig, StoreError, TokenStore};
use tilegate_sweep::{ExpirySweeper, SweepConfig, SweeperState};
use tilegate_token::SessionVerdict;
use tokio::sync::Mutex;

/// Builder for configuring and starting a [`SessionAuthority`].
pub struct SessionAuthorityBuilder {
    store: StoreConfig,
    sweep: SweepConfig,
}

impl SessionAuthorityBuilder {
    /// Creates a new builder with default settings (7-day tokens,
    /// hourly sweep that runs once immediately).
    pub fn new() -> Self {
        Self {
            store: StoreConfig::default(),
            sweep: SweepConfig::default(),
        }
    }

    /// Sets how long an issued token stays valid.
    pub fn token_lifetime(mut self, lifetime: Duration) -> Self {
        self.store.token_lifetime = lifetime;
        self
    }

    /// Sets the pause between expiry sweeps.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep.interval = interval;
        self
    }

    /// Whether the first sweep runs immediately on start.
    pub fn sweep_at_start(mut self, run_at_start: bool) -> Self {
        self.sweep.run_at_start = run_at_start;
        self
    }

    /// Builds the authority and spawns its sweeper.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> SessionAuthority {
        let store = Arc::new(Mutex::new(TokenStore::new(self.store)));
        let sweeper = ExpirySweeper::spawn(Arc::clone(&store), self.sweep);
        tracing::info!("session authority started");
        SessionAuthority { store, sweeper }
    }
}

impl Default for SessionAuthorityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running session token authority.
///
/// Cheap to share by reference from every request handler; all methods
/// take `&self` and lock the store internally for the duration of one
/// operation.
pub struct SessionAuthority {
    store: Arc<Mutex<TokenStore>>,
    sweeper: ExpirySweeper,
}

impl SessionAuthority {
    /// Creates a new builder.
    pub fn builder() -> SessionAuthorityBuilder {
        SessionAuthorityBuilder::new()
    }

    /// Issues a login token for an already-authenticated username and
    /// returns the credential string to set as the client's cookie.
    ///
    /// # Errors
    /// Returns [`StoreError::RandomSource`] if the OS entropy source
    /// fails; there is no fallback.
    pub async fn log_in(&self, username: &str) -> Result<String, StoreError> {
        let (_, credential) = self.store.lock().await.issue(username)?;
        Ok(credential)
    }

    /// Checks whether a credential is currently valid.
    ///
    /// The verdict is a bare yes/no per username: malformed, unknown,
    /// revoked, and expired credentials are indistinguishable to the
    /// caller.
    pub async fn check(&self, credential: &str) -> SessionVerdict {
        self.store.lock().await.validate(credential)
    }

    /// Revokes the token named by a credential (logout). Idempotent.
    pub async fn log_out(&self, credential: &str) {
        self.store.lock().await.revoke(credential);
    }

    /// The number of tokens currently held in memory, swept or not.
    pub async fn active_tokens(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Where the background sweeper currently is in its schedule.
    pub fn sweeper_state(&self) -> SweeperState {
        self.sweeper.state()
    }

    /// A clone of the shared store handle, for request layers that want
    /// to drive the store directly.
    pub fn store_handle(&self) -> Arc<Mutex<TokenStore>> {
        Arc::clone(&self.store)
    }

    /// Stops the sweeper gracefully and tears the authority down.
    ///
    /// A sweep in progress finishes first. Outstanding tokens are simply
    /// dropped with the store — they were never going to survive the
    /// process anyway.
    pub async fn shutdown(self) {
        let sweeps = self.sweeper.stop().await;
        tracing::info!(sweeps, "session authority shut down");
    }
}
