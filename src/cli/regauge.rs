//! Regauge entry command

use anyhow::Result;
use chrono::{NaiveDate, Utc};

use super::output::Output;
use crate::domain::{CaskmarkId, Regauge};
use crate::storage::Registry;

pub fn run(
    output: &Output,
    id: &CaskmarkId,
    volume: f64,
    abv: f64,
    date: Option<NaiveDate>,
    notes: Option<String>,
) -> Result<()> {
    let registry = Registry::open_current()?;

    let measured_at = date.unwrap_or_else(|| Utc::now().date_naive());

    let record = registry.add_regauge(
        id,
        Regauge {
            measured_at,
            volume_litres: volume,
            strength_abv: abv,
            notes,
        },
    )?;

    if output.is_json() {
        output.data(&record);
    } else {
        output.success(&format!(
            "Recorded regauge for {}: {:.1} L at {:.1}% ABV ({})",
            record.id, volume, abv, measured_at
        ));
    }

    Ok(())
}
