//! The value types that represent a login token and its validation result.

use serde::{Deserialize, Serialize};

/// The identity of one issued login token: who it belongs to and which
/// of their tokens it is.
///
/// A player may hold several live tokens at once (one per device or
/// browser), so the store is keyed on the full pair, not the username.
/// Two identities are equal iff both fields match.
///
/// `token_id` spans the full 128-bit space and is drawn from the OS
/// entropy source at issue time. The width is a security property:
/// guessing a live id is as hard as guessing a 128-bit key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenIdentity {
    pub username: String,
    pub token_id: u128,
}

/// The result of parsing a credential string.
///
/// Malformed input is an expected case, not an exceptional one —
/// credentials arrive from untrusted client cookies. The `Malformed`
/// variant keeps whatever username fragment was recovered before the
/// parse failed, so callers can still log or report the offending user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedCredential {
    /// The credential parsed into a full identity.
    WellFormed(TokenIdentity),
    /// The token-id field was missing or not an integer.
    Malformed { username: String },
}

impl DecodedCredential {
    /// The username fragment, whole or recovered.
    pub fn username(&self) -> &str {
        match self {
            Self::WellFormed(identity) => &identity.username,
            Self::Malformed { username } => username,
        }
    }
}

/// The answer to "is this credential currently valid".
///
/// This is the *only* thing the store ever tells a caller about a
/// credential. It carries no token id and does not distinguish a
/// malformed credential from a well-formed but unknown or expired one —
/// every failure mode collapses to `authenticated: false` so that the
/// outcome leaks nothing about which check failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionVerdict {
    pub username: String,
    pub authenticated: bool,
}

impl SessionVerdict {
    /// A negative verdict for the given username.
    pub fn denied(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            authenticated: false,
        }
    }
}
