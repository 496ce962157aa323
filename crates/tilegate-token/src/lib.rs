//! Login token identity types and wire codec for Tilegate.
//!
//! This crate defines the "language" of login credentials:
//!
//! - **Types** ([`TokenIdentity`], [`DecodedCredential`],
//!   [`SessionVerdict`]) — the values that cross the boundary between
//!   the request layer and the token store.
//! - **Codec** ([`codec::encode`], [`codec::decode`]) — the conversion
//!   between a [`TokenIdentity`] and its credential-string wire form.
//!
//! # Architecture
//!
//! The token layer sits below the store: it knows nothing about which
//! tokens are live, when they expire, or who is logged in. It only knows
//! how to represent and (de)serialize a token identity.
//!
//! ```text
//! Request layer (cookies / handshake fields)
//!     ↕  credential strings
//! Token layer (this crate)
//!     ↕  TokenIdentity
//! Store layer (tilegate-store)
//! ```

pub mod codec;
mod identity;

pub use identity::{DecodedCredential, SessionVerdict, TokenIdentity};
