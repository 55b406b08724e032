//! Cask record domain model
//!
//! A cask record ties a CaskMark identifier to the physical facts captured
//! at registration (fill date, cask type, original strength and volume) and
//! accumulates related records over its life: regauge measurements,
//! ownership changes, and valuations. The record is sealed with a
//! fingerprint at registration; registration-time fields are never edited
//! afterwards, only related records are appended.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::fingerprint;
use super::identifier::{CaskmarkId, EncodeError, SpiritType};

/// Cask type, matching the registration form's closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaskType {
    Barrel,
    Hogshead,
    Butt,
    Puncheon,
    Other,
}

impl CaskType {
    pub fn label(&self) -> &'static str {
        match self {
            CaskType::Barrel => "Barrel",
            CaskType::Hogshead => "Hogshead",
            CaskType::Butt => "Butt",
            CaskType::Puncheon => "Puncheon",
            CaskType::Other => "Other",
        }
    }
}

impl fmt::Display for CaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CaskType {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "barrel" => Ok(CaskType::Barrel),
            "hogshead" => Ok(CaskType::Hogshead),
            "butt" => Ok(CaskType::Butt),
            "puncheon" => Ok(CaskType::Puncheon),
            "other" => Ok(CaskType::Other),
            _ => Err(EncodeError::InvalidField {
                field: "cask type",
                reason: format!("'{s}' is not one of barrel, hogshead, butt, puncheon, other"),
            }),
        }
    }
}

/// A re-measurement of volume and strength after the original fill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regauge {
    pub measured_at: NaiveDate,
    pub volume_litres: f64,
    pub strength_abv: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A change of ownership at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipChange {
    pub owner: String,
    pub changed_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A manual valuation of the cask
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub amount: f64,
    pub valued_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A registered cask
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaskRecord {
    pub id: CaskmarkId,
    pub distillery_name: String,
    pub cask_type: CaskType,
    pub fill_date: NaiveDate,
    pub original_fill_strength: f64,
    pub original_volume_litres: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub fingerprint: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regauges: Vec<Regauge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ownership_history: Vec<OwnershipChange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub valuations: Vec<Valuation>,
}

impl CaskRecord {
    /// Creates a sealed record at registration time
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CaskmarkId,
        distillery_name: String,
        cask_type: CaskType,
        fill_date: NaiveDate,
        original_fill_strength: f64,
        original_volume_litres: f64,
        notes: Option<String>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        let mut record = Self {
            id,
            distillery_name,
            cask_type,
            fill_date,
            original_fill_strength,
            original_volume_litres,
            notes,
            registered_at,
            fingerprint: String::new(),
            regauges: Vec::new(),
            ownership_history: Vec::new(),
            valuations: Vec::new(),
        };
        record.fingerprint = record.compute_fingerprint();
        record
    }

    /// The spirit type carried by the identifier
    pub fn spirit_type(&self) -> SpiritType {
        self.id.spirit_type()
    }

    /// Digest over the registration-time fields. Related records (regauges,
    /// ownership changes, valuations) are appended later and deliberately
    /// excluded.
    fn compute_fingerprint(&self) -> String {
        let id = self.id.to_string();
        let fill_date = self.fill_date.to_string();
        let strength = format!("{:.2}", self.original_fill_strength);
        let volume = format!("{:.2}", self.original_volume_litres);
        let registered_at = self.registered_at.to_rfc3339();

        fingerprint::seal(&[
            &id,
            &self.distillery_name,
            self.cask_type.label(),
            &fill_date,
            &strength,
            &volume,
            self.notes.as_deref().unwrap_or(""),
            &registered_at,
        ])
    }

    /// Re-derives the fingerprint and compares it to the stored one
    pub fn fingerprint_intact(&self) -> bool {
        self.compute_fingerprint() == self.fingerprint
    }

    /// Appends a regauge measurement
    pub fn add_regauge(&mut self, regauge: Regauge) {
        self.regauges.push(regauge);
    }

    /// The most recent regauge, if any
    pub fn latest_regauge(&self) -> Option<&Regauge> {
        self.regauges.iter().max_by_key(|r| r.measured_at)
    }

    /// Current volume: latest regauge if present, otherwise the original fill
    pub fn current_volume_litres(&self) -> f64 {
        self.latest_regauge()
            .map_or(self.original_volume_litres, |r| r.volume_litres)
    }

    /// Current strength: latest regauge if present, otherwise the original fill
    pub fn current_strength_abv(&self) -> f64 {
        self.latest_regauge()
            .map_or(self.original_fill_strength, |r| r.strength_abv)
    }

    /// Appends an ownership change
    pub fn add_ownership_change(&mut self, change: OwnershipChange) {
        self.ownership_history.push(change);
    }

    /// The most recent ownership change, if any
    pub fn current_owner(&self) -> Option<&OwnershipChange> {
        self.ownership_history.iter().max_by_key(|o| o.changed_at)
    }

    /// Appends a valuation
    pub fn add_valuation(&mut self, valuation: Valuation) {
        self.valuations.push(valuation);
    }

    /// The most recent valuation, if any
    pub fn latest_valuation(&self) -> Option<&Valuation> {
        self.valuations.iter().max_by_key(|v| v.valued_at)
    }
}
