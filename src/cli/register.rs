//! Cask registration command

use anyhow::Result;
use chrono::NaiveDate;

use super::output::Output;
use crate::domain::{CaskType, SpiritType};
use crate::storage::{NewCask, Registry};

#[allow(clippy::too_many_arguments)]
pub fn run(
    output: &Output,
    distillery: String,
    spirit: SpiritType,
    cask_type: CaskType,
    fill_date: NaiveDate,
    abv: f64,
    volume: f64,
    country: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let registry = Registry::open_current()?;

    output.verbose_ctx(
        "register",
        &format!("distillery={distillery} spirit={spirit} fill_date={fill_date}"),
    );

    let record = registry.register(NewCask {
        country,
        distillery_code: distillery,
        spirit_type: spirit,
        cask_type,
        fill_date,
        original_fill_strength: abv,
        original_volume_litres: volume,
        notes,
    })?;

    if output.is_json() {
        output.data(&record);
    } else {
        output.success(&format!("Registered cask {}", record.id));
        output.row(&["distillery", &record.distillery_name]);
        output.row(&["cask type", record.cask_type.label()]);
        output.row(&["fill date", &record.fill_date.to_string()]);
        output.row(&["fingerprint", &record.fingerprint]);
    }

    Ok(())
}
