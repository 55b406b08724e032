//! Cask lookup commands: show a single record, list with filters

use anyhow::Result;

use super::output::Output;
use crate::domain::{CaskmarkId, SpiritType};
use crate::storage::{ListFilter, Registry, RegistryError};

pub fn show(output: &Output, id: &CaskmarkId) -> Result<()> {
    let registry = Registry::open_current()?;

    let record = registry
        .lookup(id)?
        .ok_or_else(|| RegistryError::UnknownCask(id.clone()))?;

    let intact = record.fingerprint_intact();

    if output.is_json() {
        output.data(&serde_json::json!({
            "record": record,
            "fingerprint_intact": intact,
        }));
        return Ok(());
    }

    output.row(&["id", &record.id.to_string()]);
    output.row(&["distillery", &record.distillery_name]);
    output.row(&["country", record.id.country()]);
    output.row(&["spirit type", record.spirit_type().label()]);
    output.row(&["cask type", record.cask_type.label()]);
    output.row(&["fill date", &record.fill_date.to_string()]);
    output.row(&[
        "original fill",
        &format!(
            "{:.1}% ABV, {:.1} L",
            record.original_fill_strength, record.original_volume_litres
        ),
    ]);
    output.row(&[
        "current",
        &format!(
            "{:.1}% ABV, {:.1} L",
            record.current_strength_abv(),
            record.current_volume_litres()
        ),
    ]);
    if let Some(notes) = &record.notes {
        output.row(&["notes", notes]);
    }
    if let Some(owner) = record.current_owner() {
        output.row(&["owner", &owner.owner]);
    }
    if let Some(valuation) = record.latest_valuation() {
        output.row(&[
            "valuation",
            &format!("{:.2} ({})", valuation.amount, valuation.valued_at),
        ]);
    }
    output.row(&["registered", &record.registered_at.to_rfc3339()]);
    output.row(&[
        "fingerprint",
        if intact { "intact" } else { "MISMATCH" },
    ]);

    if !record.regauges.is_empty() {
        output.blank();
        println!("Regauges:");
        println!("{:<12} {:>10} {:>8}  NOTES", "DATE", "VOLUME", "ABV");
        for regauge in &record.regauges {
            println!(
                "{:<12} {:>9.1}L {:>7.1}%  {}",
                regauge.measured_at.to_string(),
                regauge.volume_litres,
                regauge.strength_abv,
                regauge.notes.as_deref().unwrap_or("")
            );
        }
    }

    if !record.ownership_history.is_empty() {
        output.blank();
        println!("Ownership history:");
        println!("{:<12} OWNER", "DATE");
        for change in &record.ownership_history {
            println!("{:<12} {}", change.changed_at.to_string(), change.owner);
        }
    }

    if !record.valuations.is_empty() {
        output.blank();
        println!("Valuations:");
        println!("{:<12} {:>12}  NOTES", "DATE", "AMOUNT");
        for valuation in &record.valuations {
            println!(
                "{:<12} {:>12.2}  {}",
                valuation.valued_at.to_string(),
                valuation.amount,
                valuation.notes.as_deref().unwrap_or("")
            );
        }
    }

    Ok(())
}

pub fn list(
    output: &Output,
    distillery: Option<String>,
    year: Option<u8>,
    spirit: Option<SpiritType>,
) -> Result<()> {
    let registry = Registry::open_current()?;

    let filter = ListFilter {
        distillery,
        fill_year: year,
        spirit_type: spirit,
    };

    let records = registry.list(&filter)?;
    output.verbose_ctx("list", &format!("{} record(s) match", records.len()));

    if output.is_json() {
        output.data(&records);
        return Ok(());
    }

    if records.is_empty() {
        println!("No casks registered");
        return Ok(());
    }

    println!(
        "{:<24} {:<20} {:<12} {:<11} {:>8}",
        "ID", "DISTILLERY", "SPIRIT", "FILL DATE", "VOLUME"
    );
    println!("{}", "-".repeat(80));
    for record in &records {
        println!(
            "{:<24} {:<20} {:<12} {:<11} {:>7.1}L",
            record.id.to_string(),
            record.distillery_name,
            record.spirit_type().label(),
            record.fill_date.to_string(),
            record.current_volume_litres()
        );
    }
    println!();
    println!("{} cask(s)", records.len());

    Ok(())
}
