//! CaskMark identifier codec
//!
//! ID Format: `CM-XX-YY-SS-DD-NNNNNN-C` (fixed 23 characters)
//! - `CM`: registry prefix, constant
//! - `XX`: 2-letter country code
//! - `YY`: 2-digit fill year (2000 + YY)
//! - `SS`: 2-letter spirit type code
//! - `DD`: 2-character distillery code
//! - `NNNNNN`: 6-character serial, unique per (distillery, fill year)
//! - `C`: mod-10 check digit over everything except the prefix
//!
//! Encoding and decoding are pure: no lookup against the registry happens
//! here. A decoded identifier is syntactically valid and checksum-clean, but
//! whether it names a registered cask is the storage layer's business.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{base36, checksum};

/// Registry prefix carried by every identifier
pub const PREFIX: &str = "CM";

/// Width of the serial segment
pub const SERIAL_WIDTH: usize = 6;

/// Total canonical length including delimiters
pub const CANONICAL_LEN: usize = 23;

const SEGMENT_COUNT: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

impl EncodeError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed identifier: expected {SEGMENT_COUNT} '-'-separated segments, found {0}")]
    SegmentCount(usize),

    #[error("Malformed identifier: segment {segment} does not match {expected}")]
    Malformed {
        segment: usize,
        expected: &'static str,
    },

    #[error("Checksum mismatch: well-formed identifier but the check digit does not verify")]
    ChecksumMismatch,
}

/// Spirit type, a closed set matching the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiritType {
    SingleMalt,
    Grain,
    Blend,
    Other,
}

impl SpiritType {
    /// All spirit types, in form order
    pub const ALL: [SpiritType; 4] = [
        SpiritType::SingleMalt,
        SpiritType::Grain,
        SpiritType::Blend,
        SpiritType::Other,
    ];

    /// The 2-letter code used inside identifiers
    pub fn code(&self) -> &'static str {
        match self {
            SpiritType::SingleMalt => "SC",
            SpiritType::Grain => "GR",
            SpiritType::Blend => "BL",
            SpiritType::Other => "OT",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SpiritType::SingleMalt => "Single Malt",
            SpiritType::Grain => "Grain",
            SpiritType::Blend => "Blend",
            SpiritType::Other => "Other",
        }
    }

    /// Looks up a spirit type by its identifier code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.to_ascii_uppercase();
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for SpiritType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpiritType {
    type Err = EncodeError;

    /// Accepts the identifier code (`SC`), the label (`Single Malt`), or a
    /// kebab/snake-case form (`single-malt`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "sc" | "singlemalt" => Ok(SpiritType::SingleMalt),
            "gr" | "grain" => Ok(SpiritType::Grain),
            "bl" | "blend" => Ok(SpiritType::Blend),
            "ot" | "other" => Ok(SpiritType::Other),
            _ => Err(EncodeError::invalid(
                "spirit type",
                format!("'{s}' is not one of SC, GR, BL, OT"),
            )),
        }
    }
}

/// A verified CaskMark identifier
///
/// Immutable once constructed: the check digit is derived in `new` and can
/// never be set independently. Serializes as its canonical string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaskmarkId {
    country: String,
    fill_year: u8,
    spirit_type: SpiritType,
    distillery: String,
    serial: String,
    check_digit: char,
}

impl CaskmarkId {
    /// Encodes validated attributes into an identifier.
    ///
    /// Fields are validated up front; no partial identifier is ever
    /// produced. Lowercase input is normalized to uppercase.
    pub fn new(
        country: &str,
        fill_year: u8,
        spirit_type: SpiritType,
        distillery: &str,
        serial: &str,
    ) -> Result<Self, EncodeError> {
        let country = country.trim().to_ascii_uppercase();
        let distillery = distillery.trim().to_ascii_uppercase();
        let serial = serial.trim().to_ascii_uppercase();

        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(EncodeError::invalid(
                "country code",
                format!("'{country}' does not match [A-Z]{{2}}"),
            ));
        }
        if fill_year > 99 {
            return Err(EncodeError::invalid(
                "fill year",
                format!("{fill_year} is not in 0-99"),
            ));
        }
        if distillery.len() != 2 || !distillery.chars().all(base36::is_base36) {
            return Err(EncodeError::invalid(
                "distillery code",
                format!("'{distillery}' does not match [A-Z0-9]{{2}}"),
            ));
        }
        if serial.len() != SERIAL_WIDTH || !serial.chars().all(base36::is_base36) {
            return Err(EncodeError::invalid(
                "serial number",
                format!("'{serial}' does not match [A-Z0-9]{{{SERIAL_WIDTH}}}"),
            ));
        }

        let payload = format!(
            "{country}{fill_year:02}{spirit}{distillery}{serial}",
            spirit = spirit_type.code()
        );
        // Fields are validated Base36 at this point, so this cannot fail
        let check_digit = checksum::check_digit(&payload)
            .expect("validated payload is non-empty Base36");

        Ok(Self {
            country,
            fill_year,
            spirit_type,
            distillery,
            serial,
            check_digit,
        })
    }

    /// Country code segment (`[A-Z]{2}`)
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Two-digit fill year (interpreted as 2000 + N)
    pub fn fill_year(&self) -> u8 {
        self.fill_year
    }

    /// Full calendar fill year (2000-2099)
    pub fn fill_year_full(&self) -> u16 {
        2000 + u16::from(self.fill_year)
    }

    pub fn spirit_type(&self) -> SpiritType {
        self.spirit_type
    }

    /// Distillery code segment (`[A-Z0-9]{2}`)
    pub fn distillery(&self) -> &str {
        &self.distillery
    }

    /// Serial segment, unique per (distillery, fill year)
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// The derived check digit (always `0`-`9`)
    pub fn check_digit(&self) -> char {
        self.check_digit
    }

    /// The checksum payload: all fields except prefix and check digit,
    /// concatenated without delimiters
    fn payload(&self) -> String {
        format!(
            "{}{:02}{}{}{}",
            self.country,
            self.fill_year,
            self.spirit_type.code(),
            self.distillery,
            self.serial
        )
    }
}

impl fmt::Display for CaskmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PREFIX}-{}-{:02}-{}-{}-{}-{}",
            self.country,
            self.fill_year,
            self.spirit_type.code(),
            self.distillery,
            self.serial,
            self.check_digit
        )
    }
}

impl FromStr for CaskmarkId {
    type Err = DecodeError;

    /// Decodes and validates a candidate string.
    ///
    /// Whitespace is stripped and the input uppercased before parsing, so
    /// scanned or hand-typed identifiers decode identically to canonical
    /// ones. Structure failures and checksum failures are reported as
    /// distinct errors: a [`DecodeError::ChecksumMismatch`] means "shaped
    /// like a CaskMark ID but possibly mistyped or forged".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();

        let segments: Vec<&str> = cleaned.split('-').collect();
        if segments.len() != SEGMENT_COUNT {
            return Err(DecodeError::SegmentCount(segments.len()));
        }

        if segments[0] != PREFIX {
            return Err(DecodeError::Malformed {
                segment: 0,
                expected: "the literal prefix CM",
            });
        }

        let country = segments[1];
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DecodeError::Malformed {
                segment: 1,
                expected: "[A-Z]{2}",
            });
        }

        let year = segments[2];
        if year.len() != 2 || !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(DecodeError::Malformed {
                segment: 2,
                expected: "[0-9]{2}",
            });
        }
        let fill_year: u8 = year.parse().expect("two ascii digits");

        let spirit_type = SpiritType::from_code(segments[3]).ok_or(DecodeError::Malformed {
            segment: 3,
            expected: "one of SC, GR, BL, OT",
        })?;

        let distillery = segments[4];
        if distillery.len() != 2 || !distillery.chars().all(base36::is_base36) {
            return Err(DecodeError::Malformed {
                segment: 4,
                expected: "[A-Z0-9]{2}",
            });
        }

        let serial = segments[5];
        if serial.len() != SERIAL_WIDTH || !serial.chars().all(base36::is_base36) {
            return Err(DecodeError::Malformed {
                segment: 5,
                expected: "[A-Z0-9]{6}",
            });
        }

        let check = segments[6];
        if check.len() != 1 || !check.chars().all(|c| c.is_ascii_digit()) {
            return Err(DecodeError::Malformed {
                segment: 6,
                expected: "[0-9]",
            });
        }
        let check_digit = check.chars().next().expect("one ascii digit");

        let payload = format!("{country}{year}{}{distillery}{serial}", spirit_type.code());
        if !checksum::verify(&payload, check_digit) {
            return Err(DecodeError::ChecksumMismatch);
        }

        Ok(Self {
            country: country.to_string(),
            fill_year,
            spirit_type,
            distillery: distillery.to_string(),
            serial: serial.to_string(),
            check_digit,
        })
    }
}

impl TryFrom<String> for CaskmarkId {
    type Error = DecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CaskmarkId> for String {
    fn from(id: CaskmarkId) -> Self {
        id.to_string()
    }
}

/// Pure syntactic/checksum validity check on a candidate string.
///
/// Performs no registry lookup; `true` means the string is a well-formed
/// identifier whose check digit verifies.
pub fn verify_checksum(candidate: &str) -> bool {
    candidate.parse::<CaskmarkId>().is_ok()
}

/// Maps a calendar fill date into the 2-digit year window (2000-2099)
pub fn fill_year_from_date(date: NaiveDate) -> Result<u8, EncodeError> {
    let year = date.year();
    if !(2000..=2099).contains(&year) {
        return Err(EncodeError::invalid(
            "fill year",
            format!("{year} is outside the registry window 2000-2099"),
        ));
    }
    Ok((year - 2000) as u8)
}

/// Interprets a serial segment as a Base36 integer (used by the allocator)
pub fn serial_index(serial: &str) -> Result<u64, EncodeError> {
    if serial.len() != SERIAL_WIDTH {
        return Err(EncodeError::invalid(
            "serial number",
            format!("'{serial}' does not match [A-Z0-9]{{{SERIAL_WIDTH}}}"),
        ));
    }
    let mut index: u64 = 0;
    for c in serial.chars() {
        let value = base36::to_value(c).map_err(|e| {
            EncodeError::invalid("serial number", e.to_string())
        })?;
        index = index * u64::from(base36::RADIX) + u64::from(value);
    }
    Ok(index)
}

/// Renders a Base36 integer as a fixed-width serial segment.
///
/// Returns `None` once the index exceeds the 6-character space (36^6 - 1),
/// which the allocator treats as serial exhaustion for the
/// (distillery, fill year) pair.
pub fn serial_for_index(index: u64) -> Option<String> {
    let radix = u64::from(base36::RADIX);
    if index >= radix.pow(SERIAL_WIDTH as u32) {
        return None;
    }
    let mut chars = ['0'; SERIAL_WIDTH];
    let mut rest = index;
    for slot in chars.iter_mut().rev() {
        *slot = base36::to_char((rest % radix) as u8).expect("remainder is 0-35");
        rest /= radix;
    }
    Some(chars.into_iter().collect())
}
