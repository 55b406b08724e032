//! Ownership transfer command

use anyhow::Result;
use chrono::{NaiveDate, Utc};

use super::output::Output;
use crate::domain::{CaskmarkId, OwnershipChange};
use crate::storage::Registry;

pub fn run(
    output: &Output,
    id: &CaskmarkId,
    owner: String,
    date: Option<NaiveDate>,
    notes: Option<String>,
) -> Result<()> {
    let registry = Registry::open_current()?;

    let changed_at = date.unwrap_or_else(|| Utc::now().date_naive());

    let record = registry.transfer(
        id,
        OwnershipChange {
            owner: owner.clone(),
            changed_at,
            notes,
        },
    )?;

    if output.is_json() {
        output.data(&record);
    } else {
        output.success(&format!(
            "Transferred {} to {} ({})",
            record.id, owner, changed_at
        ));
    }

    Ok(())
}
