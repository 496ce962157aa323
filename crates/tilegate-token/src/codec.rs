//! Conversion between a [`TokenIdentity`] and its credential-string
//! wire form.
//!
//! The wire format is `"<username>%20<token_id>"`. The `%20` is a
//! *literal* field separator inherited from the cookie format — it is
//! not URL-encoding, and nothing here escapes or unescapes anything.
//! A username containing the literal sequence `%20` would corrupt
//! parsing; disallowing that is the job of the identity-validation
//! boundary upstream of this crate.
//!
//! Both directions are total. `encode` cannot fail, and `decode` folds
//! every parse failure into [`DecodedCredential::Malformed`] rather than
//! returning an error — credentials come straight out of untrusted
//! client cookies, so "doesn't parse" is ordinary input, not a fault.

use crate::{DecodedCredential, TokenIdentity};

/// The literal separator between the username and token-id fields.
pub const FIELD_SEPARATOR: &str = "%20";

/// Renders an identity as a credential string.
///
/// The token id is written in base 10, matching what [`decode`] parses.
pub fn encode(identity: &TokenIdentity) -> String {
    format!(
        "{}{FIELD_SEPARATOR}{}",
        identity.username, identity.token_id
    )
}

/// Parses a credential string.
///
/// Splits on the *first* `%20`, so a token-id field that itself contains
/// `%20` simply fails the integer parse. Policy for input with no
/// separator at all: nothing was recovered before the split point, so
/// the malformed result carries an empty username.
pub fn decode(credential: &str) -> DecodedCredential {
    let Some((username, raw_id)) = credential.split_once(FIELD_SEPARATOR) else {
        return DecodedCredential::Malformed {
            username: String::new(),
        };
    };
    match raw_id.parse::<u128>() {
        Ok(token_id) => DecodedCredential::WellFormed(TokenIdentity {
            username: username.to_owned(),
            token_id,
        }),
        Err(_) => DecodedCredential::Malformed {
            username: username.to_owned(),
        },
    }
}
