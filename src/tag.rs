//! Tag canonicalization.
//!
//! Player, clan, and tournament tags arrive in whatever shape users type
//! them: with or without the `#`, lowercased, padded, or with the letter `O`
//! where the service only ever issues the digit `0`. Every tag passes
//! through [`normalize`] exactly once, during route construction, and is
//! never persisted.

use crate::error::Error;

/// Canonicalize a raw tag.
///
/// Trims surrounding whitespace, uppercases, removes the first `#` wherever
/// it occurs, and replaces every letter `O` with the digit `0`. The result
/// carries no `#`; route construction re-prepends it before the segment is
/// percent-encoded.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase().replacen('#', "", 1).replace('O', "0")
}

/// Allowed-alphabet check, applied to an already normalized tag when the
/// client was configured with `validate_tags`. Fails fast, before any
/// network call is attempted.
pub(crate) fn validate(tag: &str) -> Result<(), Error> {
    match tag
        .chars()
        .find(|c| !c.is_ascii_digit() && !c.is_ascii_uppercase())
    {
        Some(found) => Err(Error::TagValidation {
            tag: tag.to_string(),
            found,
        }),
        None => Ok(()),
    }
}
