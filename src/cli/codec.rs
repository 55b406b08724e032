//! Pure codec commands: encode, decode, verify
//!
//! These commands never touch the registry. Whether an identifier names a
//! registered cask is `show`'s job; here we only deal in syntax and
//! checksums.

use anyhow::{bail, Result};
use chrono::NaiveDate;

use super::output::Output;
use crate::domain::{fill_year_from_date, CaskmarkId, SpiritType};

/// Arguments shared by `encode`
pub struct EncodeArgs {
    pub country: String,
    pub year: Option<u8>,
    pub fill_date: Option<NaiveDate>,
    pub spirit: SpiritType,
    pub distillery: String,
    pub serial: String,
}

pub fn encode(output: &Output, args: EncodeArgs) -> Result<()> {
    let fill_year = match (args.year, args.fill_date) {
        (Some(year), None) => year,
        (None, Some(date)) => fill_year_from_date(date)?,
        (Some(_), Some(_)) => bail!("Pass either --year or --fill-date, not both"),
        (None, None) => bail!("Pass either --year or --fill-date"),
    };

    let id = CaskmarkId::new(
        &args.country,
        fill_year,
        args.spirit,
        &args.distillery,
        &args.serial,
    )?;

    output.verbose_ctx("encode", &format!("payload checksum digit: {}", id.check_digit()));

    if output.is_json() {
        output.data(&id_fields(&id));
    } else {
        output.success(&id.to_string());
    }

    Ok(())
}

pub fn decode(output: &Output, candidate: &str) -> Result<()> {
    let id: CaskmarkId = candidate.parse().map_err(anyhow::Error::new)?;

    if output.is_json() {
        output.data(&id_fields(&id));
    } else {
        output.row(&["id", &id.to_string()]);
        output.row(&["country", id.country()]);
        output.row(&["fill year", &id.fill_year_full().to_string()]);
        output.row(&["spirit type", id.spirit_type().label()]);
        output.row(&["distillery", id.distillery()]);
        output.row(&["serial", id.serial()]);
        output.row(&["check digit", &id.check_digit().to_string()]);
    }

    Ok(())
}

pub fn verify(output: &Output, candidate: &str) -> Result<()> {
    match candidate.parse::<CaskmarkId>() {
        Ok(id) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "valid": true,
                    "id": id.to_string(),
                }));
            } else {
                output.success(&format!("{} is a valid CaskMark ID", id));
            }
            Ok(())
        }
        // A ChecksumMismatch message means "shaped like an identifier but
        // possibly mistyped or tampered", distinct from malformed input.
        Err(e) => Err(anyhow::Error::new(e)),
    }
}

fn id_fields(id: &CaskmarkId) -> serde_json::Value {
    serde_json::json!({
        "id": id.to_string(),
        "country": id.country(),
        "fill_year": id.fill_year_full(),
        "spirit_type": id.spirit_type().label(),
        "spirit_code": id.spirit_type().code(),
        "distillery": id.distillery(),
        "serial": id.serial(),
        "check_digit": id.check_digit().to_string(),
    })
}
