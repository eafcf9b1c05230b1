//! Duration-token parsing for the `-t/--time` flag.
//!
//! Tokens look like `30s`, `2m` or `1h`: a whole number followed by a
//! single unit letter. Parsing happens during configuration validation,
//! before any command is launched.

use thiserror::Error;

/// Error for a malformed duration token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid duration {0:?}: expected a whole number followed by s, m, or h")]
pub struct InvalidDuration(pub String);

/// Parses a duration token into whole seconds.
///
/// `"<n>s"` yields `n`, `"<n>m"` yields `n * 60`, `"<n>h"` yields
/// `n * 3600`. `"0s"` is valid and means an effectively instant timeout.
///
/// # Errors
///
/// Returns [`InvalidDuration`] when the token is empty, the numeric part
/// is missing or not a non-negative integer, the unit letter is unknown,
/// or the value overflows when converted to seconds.
pub fn parse(token: &str) -> Result<u64, InvalidDuration> {
    let err = || InvalidDuration(token.to_string());

    let unit = token.chars().last().ok_or_else(err)?;
    let digits = &token[..token.len() - unit.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    let value: u64 = digits.parse().map_err(|_| err())?;

    let seconds = match unit {
        's' => Some(value),
        'm' => value.checked_mul(60),
        'h' => value.checked_mul(3600),
        _ => None,
    };
    seconds.ok_or_else(err)
}
