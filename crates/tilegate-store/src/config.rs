//! Configuration for the token store.

use std::time::Duration;

use tracing::warn;

/// Configuration for [`TokenStore`](crate::TokenStore) behavior.
///
/// The lifetime is fixed per store: every token gets
/// `issued_at + token_lifetime` as its expiry at creation, and the
/// expiry never changes afterwards.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How long an issued token stays valid.
    ///
    /// Default: 7 days. Clamped to [`Self::MAX_LIFETIME`] by
    /// [`validated`](Self::validated).
    pub token_lifetime: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            token_lifetime: Duration::from_secs(7 * 24 * 60 * 60),
        }
    }
}

impl StoreConfig {
    /// Maximum supported token lifetime (100 years).
    ///
    /// Expiry instants are computed as `Instant::now() + token_lifetime`,
    /// and `Instant` addition panics on overflow. The cap keeps the sum
    /// far inside the representable range on every platform.
    pub const MAX_LIFETIME: Duration =
        Duration::from_secs(100 * 365 * 24 * 60 * 60);

    /// Create a config with a specific token lifetime.
    pub fn with_lifetime(token_lifetime: Duration) -> Self {
        Self { token_lifetime }
    }

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`TokenStore::new`](crate::TokenStore::new).
    pub fn validated(mut self) -> Self {
        if self.token_lifetime > Self::MAX_LIFETIME {
            warn!(
                lifetime_secs = self.token_lifetime.as_secs(),
                max_secs = Self::MAX_LIFETIME.as_secs(),
                "token lifetime exceeds maximum — clamping"
            );
            self.token_lifetime = Self::MAX_LIFETIME;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_clamps_absurd_lifetime() {
        let cfg = StoreConfig::with_lifetime(Duration::MAX).validated();
        assert_eq!(cfg.token_lifetime, StoreConfig::MAX_LIFETIME);
    }

    #[test]
    fn test_validated_keeps_sane_lifetime() {
        let cfg = StoreConfig::default().validated();
        assert_eq!(cfg.token_lifetime, Duration::from_secs(7 * 24 * 60 * 60));
    }
}
