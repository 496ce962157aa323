//! Error types for the store layer.
//!
//! Note how little is here: malformed credentials and unknown or expired
//! tokens are *not* errors — they fold into a negative
//! [`SessionVerdict`](tilegate_token::SessionVerdict) (or a silent no-op
//! for revocation) so the caller cannot tell the failure modes apart.
//! The only hard failure in this layer is the entropy source.

/// Errors that can occur in the token store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The OS entropy source failed while minting a token id.
    ///
    /// This is fatal for the issue operation: falling back to a
    /// non-cryptographic generator would make token ids guessable, so
    /// the failure propagates instead.
    #[error("secure random source unavailable: {0}")]
    RandomSource(String),
}
