//! Mod-10 check digit over Base36-encoded fields
//!
//! The check digit is a Luhn-style mod-10 sum computed over the identifier
//! payload (every field except the `CM` prefix and the check digit itself,
//! concatenated without delimiters). Weights alternate 2, 1, starting with 2
//! on the rightmost character; weight-2 values are doubled, and 9 is
//! subtracted when the doubled value exceeds 9. The resulting check digit is
//! always a decimal digit, never a letter.
//!
//! Like all mod-10 schemes this catches every single-digit substitution in
//! the decimal subspace and most adjacent transpositions; the classic 0/9
//! transposition blind spot remains (see the tests in `identifier`).

use thiserror::Error;

use super::base36;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChecksumError {
    #[error("Checksum payload is empty")]
    EmptyInput,

    #[error(transparent)]
    InvalidCharacter(#[from] base36::Base36Error),
}

/// Computes the check digit for a payload of Base36 characters.
///
/// The payload is the delimiter-free concatenation of the identifier fields
/// in canonical order. Returns a decimal digit character `'0'`-`'9'`.
pub fn check_digit(payload: &str) -> Result<char, ChecksumError> {
    if payload.is_empty() {
        return Err(ChecksumError::EmptyInput);
    }

    let mut sum: u32 = 0;

    // Weight 2 on the rightmost character, alternating leftwards.
    for (i, c) in payload.chars().rev().enumerate() {
        let value = u32::from(base36::to_value(c)?);

        let weighted = if i % 2 == 0 {
            let doubled = value * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        } else {
            value
        };

        sum += weighted;
    }

    let digit = ((10 - (sum % 10)) % 10) as u8;
    // digit is 0-9, so the mapping cannot fail
    Ok(base36::to_char(digit).expect("check digit is always 0-9"))
}

/// Verifies a supplied check digit against a recomputation.
///
/// Returns `false` on mismatch rather than erroring; an invalid payload
/// character also yields `false` since no check digit can be derived.
pub fn verify(payload: &str, supplied: char) -> bool {
    match check_digit(payload) {
        Ok(expected) => expected == supplied.to_ascii_uppercase(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concrete_vector() {
        // Payload for CM-GB-24-SC-G1-000001: weights from the right give
        // a sum of 102, so the check digit is (10 - 2) % 10 = 8.
        assert_eq!(check_digit("GB24SCG1000001"), Ok('8'));
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert_eq!(check_digit(""), Err(ChecksumError::EmptyInput));
    }

    #[test]
    fn invalid_character_propagates() {
        assert!(matches!(
            check_digit("GB-24"),
            Err(ChecksumError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn check_digit_is_always_decimal() {
        let payloads = ["A", "Z", "ZZZZZZ", "GB24SCG1000001", "00", "9999"];
        for payload in payloads {
            let digit = check_digit(payload).unwrap();
            assert!(digit.is_ascii_digit(), "non-decimal digit for {payload}");
        }
    }

    #[test]
    fn verify_accepts_correct_digit() {
        let payload = "GB24SCG1000001";
        let digit = check_digit(payload).unwrap();
        assert!(verify(payload, digit));
    }

    #[test]
    fn verify_rejects_wrong_digit() {
        let payload = "GB24SCG1000001";
        let digit = check_digit(payload).unwrap();
        for candidate in '0'..='9' {
            if candidate != digit {
                assert!(!verify(payload, candidate));
            }
        }
    }

    #[test]
    fn verify_is_case_insensitive_on_letters() {
        // A supplied lowercase character is normalized before comparison.
        // Check digits are decimal so this only matters for garbage input.
        assert!(!verify("GB24SCG1000001", 'x'));
    }

    #[test]
    fn verify_rejects_invalid_payload() {
        assert!(!verify("", '0'));
        assert!(!verify("G-B", '0'));
    }

    #[test]
    fn single_decimal_substitution_changes_digit() {
        // Luhn-family guarantee: within the decimal subspace, any single
        // digit substitution changes the check digit.
        let payload = "GB24SCG1000001";
        let original = check_digit(payload).unwrap();

        for (i, c) in payload.char_indices() {
            if !c.is_ascii_digit() {
                continue;
            }
            for replacement in '0'..='9' {
                if replacement == c {
                    continue;
                }
                let mut mutated = payload.to_string();
                mutated.replace_range(i..=i, &replacement.to_string());
                assert_ne!(
                    check_digit(&mutated).unwrap(),
                    original,
                    "undetected substitution {c}->{replacement} at {i}"
                );
            }
        }
    }
}
