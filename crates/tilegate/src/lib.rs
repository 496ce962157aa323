//! # Tilegate
//!
//! Session token authority for webtiles-style game servers.
//!
//! Tilegate issues, validates, and revokes the login tokens a
//! long-running game server hands to its browser clients, and runs a
//! background sweep that evicts expired tokens from memory. Everything
//! is process-memory only: tokens do not survive a restart, and there
//! is no shared state between server instances.
//!
//! The request layer (HTTP cookies, WebSocket handshake fields) and the
//! password-verification step live outside tilegate — callers hand in an
//! already-authenticated username and get back an opaque credential
//! string to carry on whatever transport they use.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use tilegate::SessionAuthority;
//!
//! # #[tokio::main] async fn main() -> Result<(), tilegate::StoreError> {
//! let authority = SessionAuthority::builder()
//!     .token_lifetime(Duration::from_secs(7 * 24 * 60 * 60))
//!     .sweep_interval(Duration::from_secs(60 * 60))
//!     .start();
//!
//! let cookie = authority.log_in("bob").await?;
//! assert!(authority.check(&cookie).await.authenticated);
//! authority.log_out(&cookie).await;
//! authority.shutdown().await;
//! # Ok(()) }
//! ```

mod authority;

pub use authority::{SessionAuthority, SessionAuthorityBuilder};
pub use tilegate_store::{StoreConfig, StoreError, TokenStore};
pub use tilegate_sweep::{ExpirySweeper, SweepConfig, SweeperState};
pub use tilegate_token::{DecodedCredential, SessionVerdict, TokenIdentity, codec};
