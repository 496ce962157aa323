//! The authoritative in-memory login token store for Tilegate.
//!
//! This crate owns every live login token:
//!
//! 1. **Issuance** — minting a fresh 128-bit token for an authenticated
//!    username ([`TokenStore::issue`])
//! 2. **Validation** — answering "is this credential currently valid"
//!    ([`TokenStore::validate`])
//! 3. **Revocation** — logout ([`TokenStore::revoke`])
//! 4. **Eviction** — dropping expired tokens ([`TokenStore::sweep`],
//!    driven on a cadence by `tilegate-sweep`)
//!
//! State is process-memory only by design: tokens do not survive a
//! restart, and nothing here touches disk or network.

mod config;
mod error;
mod store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use store::TokenStore;
