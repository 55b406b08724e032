//! Valuation entry command

use anyhow::Result;
use chrono::{NaiveDate, Utc};

use super::output::Output;
use crate::domain::{CaskmarkId, Valuation};
use crate::storage::Registry;

pub fn run(
    output: &Output,
    id: &CaskmarkId,
    amount: f64,
    date: Option<NaiveDate>,
    notes: Option<String>,
) -> Result<()> {
    let registry = Registry::open_current()?;

    let valued_at = date.unwrap_or_else(|| Utc::now().date_naive());

    let record = registry.add_valuation(
        id,
        Valuation {
            amount,
            valued_at,
            notes,
        },
    )?;

    if output.is_json() {
        output.data(&record);
    } else {
        output.success(&format!(
            "Recorded valuation for {}: {:.2} ({})",
            record.id, amount, valued_at
        ));
    }

    Ok(())
}
