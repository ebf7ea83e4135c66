//! Codepoint validation - hex-string well-formedness for the `cp` attribute
//!
//! Codepoints are stored as the hex strings found in the source document
//! (e.g. `0041`, `1F600`). Validation pads to an even digit count, then
//! requires the whole string to decode as hex bytes.

use crate::{Error, Result};

/// Pad a hex string with one leading zero when its length is odd.
///
/// `"1"` becomes `"01"`; even-length input is returned unchanged.
pub fn pad_even(cp: &str) -> String {
    if cp.len() % 2 == 1 {
        format!("0{}", cp)
    } else {
        cp.to_string()
    }
}

/// Validate a `cp` attribute value as a well-formed hex byte string.
///
/// The empty string is valid (it decodes to zero bytes). The original,
/// unpadded value is what gets stored; padding exists only for validation.
pub fn validate(cp: &str) -> Result<()> {
    let padded = pad_even(cp);
    if padded.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(Error::InvalidCodepoint(cp.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_even() {
        assert_eq!(pad_even("1"), "01");
        assert_eq!(pad_even("0041"), "0041");
        assert_eq!(pad_even("1F600"), "01F600");
        assert_eq!(pad_even(""), "");
    }

    #[test]
    fn test_valid_codepoints() {
        assert!(validate("0041").is_ok());
        assert!(validate("1").is_ok());
        assert!(validate("abcdef").is_ok());
        assert!(validate("1F600").is_ok());
    }

    #[test]
    fn test_invalid_codepoints() {
        assert!(validate("1G").is_err());
        assert!(validate("0x41").is_err());
        assert!(validate("00 41").is_err());
    }

    #[test]
    fn test_invalid_error_carries_value() {
        match validate("1G") {
            Err(Error::InvalidCodepoint(cp)) => assert_eq!(cp, "1G"),
            other => panic!("expected InvalidCodepoint, got {:?}", other),
        }
    }
}
