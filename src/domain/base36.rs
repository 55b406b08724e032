//! Base36 digit mapping
//!
//! CaskMark identifiers use the Base36 alphabet `{0-9, A-Z}`. This module
//! provides the bidirectional character/value mapping used by the checksum
//! calculator and the serial allocator. Lowercase input is accepted and
//! normalized to uppercase before lookup.

use thiserror::Error;

/// Number of symbols in the Base36 alphabet
pub const RADIX: u8 = 36;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Base36Error {
    #[error("Invalid Base36 character: '{0}' (expected 0-9 or A-Z)")]
    InvalidCharacter(char),

    #[error("Base36 value out of range: {0} (expected 0-35)")]
    OutOfRange(u8),
}

/// Maps a Base36 character to its value (0-35)
pub fn to_value(c: char) -> Result<u8, Base36Error> {
    let upper = c.to_ascii_uppercase();
    match upper {
        '0'..='9' => Ok(upper as u8 - b'0'),
        'A'..='Z' => Ok(upper as u8 - b'A' + 10),
        _ => Err(Base36Error::InvalidCharacter(c)),
    }
}

/// Maps a value (0-35) to its Base36 character
pub fn to_char(value: u8) -> Result<char, Base36Error> {
    match value {
        0..=9 => Ok((b'0' + value) as char),
        10..=35 => Ok((b'A' + value - 10) as char),
        _ => Err(Base36Error::OutOfRange(value)),
    }
}

/// Returns true if the character belongs to the Base36 alphabet (uppercase)
pub fn is_base36(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_their_value() {
        assert_eq!(to_value('0'), Ok(0));
        assert_eq!(to_value('9'), Ok(9));
    }

    #[test]
    fn letters_map_above_ten() {
        assert_eq!(to_value('A'), Ok(10));
        assert_eq!(to_value('Z'), Ok(35));
    }

    #[test]
    fn lowercase_is_normalized() {
        assert_eq!(to_value('a'), Ok(10));
        assert_eq!(to_value('z'), Ok(35));
    }

    #[test]
    fn rejects_non_alphanumeric() {
        assert_eq!(to_value('-'), Err(Base36Error::InvalidCharacter('-')));
        assert_eq!(to_value(' '), Err(Base36Error::InvalidCharacter(' ')));
        assert_eq!(to_value('é'), Err(Base36Error::InvalidCharacter('é')));
    }

    #[test]
    fn to_char_covers_full_range() {
        assert_eq!(to_char(0), Ok('0'));
        assert_eq!(to_char(9), Ok('9'));
        assert_eq!(to_char(10), Ok('A'));
        assert_eq!(to_char(35), Ok('Z'));
    }

    #[test]
    fn to_char_rejects_out_of_range() {
        assert_eq!(to_char(36), Err(Base36Error::OutOfRange(36)));
        assert_eq!(to_char(255), Err(Base36Error::OutOfRange(255)));
    }

    #[test]
    fn round_trip_all_values() {
        for v in 0..RADIX {
            let c = to_char(v).unwrap();
            assert_eq!(to_value(c), Ok(v));
        }
    }
}
