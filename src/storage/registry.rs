//! Registry management
//!
//! The `Registry` is the facade over the local `.caskmark/` directory. It
//! owns the responsibilities the codec deliberately delegates: enforcing the
//! accepted country subset, resolving distillery codes against the
//! directory, allocating serial numbers unique per (distillery, fill year),
//! and persisting the resulting records.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use fs2::FileExt;
use thiserror::Error;

use crate::domain::{
    fill_year_from_date, serial_for_index, serial_index, CaskRecord, CaskType, CaskmarkId,
    OwnershipChange, Regauge, SpiritType, Valuation,
};

use super::config::{RegistryConfig, REGISTRY_DIR};
use super::jsonl::CaskStore;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Not in a caskmark registry. Run 'caskmark init' first.")]
    NotInRegistry,

    #[error("Unknown distillery code '{0}'. Add it with 'caskmark distillery add'.")]
    UnknownDistillery(String),

    #[error("Country code '{0}' is not accepted by this registry")]
    CountryNotAccepted(String),

    #[error("Serial space exhausted for distillery {distillery} in fill year {fill_year}")]
    SerialSpaceExhausted { distillery: String, fill_year: u8 },

    #[error("No cask registered under {0}")]
    UnknownCask(CaskmarkId),

    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),

    #[error("Invalid valuation: {0}")]
    InvalidValuation(String),
}

/// Attributes supplied by a registration, before the registry fills in the
/// country default, the serial number, and the identifier
#[derive(Debug, Clone)]
pub struct NewCask {
    pub country: Option<String>,
    pub distillery_code: String,
    pub spirit_type: SpiritType,
    pub cask_type: CaskType,
    pub fill_date: NaiveDate,
    pub original_fill_strength: f64,
    pub original_volume_litres: f64,
    pub notes: Option<String>,
}

/// Filters for listing records
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub distillery: Option<String>,
    pub fill_year: Option<u8>,
    pub spirit_type: Option<SpiritType>,
}

impl ListFilter {
    fn matches(&self, record: &CaskRecord) -> bool {
        if let Some(distillery) = &self.distillery {
            if record.id.distillery() != distillery.to_ascii_uppercase() {
                return false;
            }
        }
        if let Some(year) = self.fill_year {
            if record.id.fill_year() != year {
                return false;
            }
        }
        if let Some(spirit) = self.spirit_type {
            if record.id.spirit_type() != spirit {
                return false;
            }
        }
        true
    }
}

/// A local CaskMark registry
pub struct Registry {
    root: PathBuf,
    config: RegistryConfig,
}

impl Registry {
    /// Opens an existing registry at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.join(REGISTRY_DIR).is_dir() {
            return Err(RegistryError::NotInRegistry.into());
        }

        let config = RegistryConfig::load(&root)?;
        Ok(Self { root, config })
    }

    /// Opens the registry at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = RegistryConfig::find_registry_root().ok_or(RegistryError::NotInRegistry)?;
        Self::open(root)
    }

    /// Initializes a new registry at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let registry_dir = root.join(REGISTRY_DIR);

        fs::create_dir_all(&registry_dir).with_context(|| {
            format!(
                "Failed to create registry directory: {}",
                registry_dir.display()
            )
        })?;

        let config_path = registry_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# CaskMark registry configuration

# Country codes this registry accepts (ISO 3166-1 alpha-2 subset)
accepted_countries = ["GB", "IE", "US", "JP", "FR", "DE"]

# Country applied when a registration does not name one
default_country = "GB"

# Distillery directory: code = "name"
# Codes are 2-character alphanumeric, unique within this registry.
[distilleries]
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        Self::open(root)
    }

    /// Returns the registry root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Applies a mutation to the config and persists it
    pub fn update_config(&mut self, f: impl FnOnce(&mut RegistryConfig)) -> Result<()> {
        f(&mut self.config);
        self.config.save(&self.root)
    }

    /// The cask record store for this registry
    pub fn store(&self) -> CaskStore {
        CaskStore::for_registry(&self.root)
    }

    /// Registers a cask: validates policy, allocates a serial, encodes the
    /// identifier, seals the record, and appends it to the store.
    pub fn register(&self, new: NewCask) -> Result<CaskRecord> {
        let country = new
            .country
            .unwrap_or_else(|| self.config.default_country.clone())
            .to_ascii_uppercase();
        if !self.config.accepts_country(&country) {
            return Err(RegistryError::CountryNotAccepted(country).into());
        }

        let distillery_code = new.distillery_code.to_ascii_uppercase();
        let distillery_name = self
            .config
            .distillery_name(&distillery_code)
            .ok_or_else(|| RegistryError::UnknownDistillery(distillery_code.clone()))?
            .to_string();

        if !(0.0..=100.0).contains(&new.original_fill_strength) {
            return Err(RegistryError::InvalidMeasurement(format!(
                "fill strength {} is not a percentage",
                new.original_fill_strength
            ))
            .into());
        }
        if new.original_volume_litres <= 0.0 {
            return Err(RegistryError::InvalidMeasurement(format!(
                "volume {} litres is not positive",
                new.original_volume_litres
            ))
            .into());
        }

        let fill_year = fill_year_from_date(new.fill_date)?;

        // Held until the append lands, so no other registration can allocate
        // the same serial between the read and the write
        let _lock = self.registration_lock()?;

        let store = self.store();
        let existing = store.read_all()?;
        let serial = self.allocate_serial(&existing, &distillery_code, fill_year)?;

        let id = CaskmarkId::new(
            &country,
            fill_year,
            new.spirit_type,
            &distillery_code,
            &serial,
        )?;

        let record = CaskRecord::new(
            id,
            distillery_name,
            new.cask_type,
            new.fill_date,
            new.original_fill_strength,
            new.original_volume_litres,
            new.notes,
            Utc::now(),
        );

        store.append(&record)?;
        Ok(record)
    }

    /// Takes an exclusive lock covering the whole read-allocate-append
    /// sequence of a registration. Released when the returned handle drops.
    ///
    /// This is a separate file from the store itself: the store takes its own
    /// per-operation locks, and holding an exclusive lock on the store file
    /// while it re-opens itself for reading would deadlock.
    fn registration_lock(&self) -> Result<fs::File> {
        let path = self.root.join(REGISTRY_DIR).join("registry.lock");
        let file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(&path)
            .with_context(|| format!("Failed to open lock file: {}", path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock: {}", path.display()))?;
        Ok(file)
    }

    /// Next free serial for a (distillery, fill year) pair.
    ///
    /// Serials are allocated densely from 000001 upwards, one past the
    /// highest serial already registered for the pair.
    fn allocate_serial(
        &self,
        existing: &HashMap<CaskmarkId, CaskRecord>,
        distillery: &str,
        fill_year: u8,
    ) -> Result<String> {
        let highest = existing
            .keys()
            .filter(|id| id.distillery() == distillery && id.fill_year() == fill_year)
            .map(|id| serial_index(id.serial()))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .max()
            .unwrap_or(0);

        serial_for_index(highest + 1).ok_or_else(|| {
            RegistryError::SerialSpaceExhausted {
                distillery: distillery.to_string(),
                fill_year,
            }
            .into()
        })
    }

    /// Looks up a record by identifier
    pub fn lookup(&self, id: &CaskmarkId) -> Result<Option<CaskRecord>> {
        self.store().read(id)
    }

    /// Lists records matching a filter, sorted by canonical identifier
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<CaskRecord>> {
        let mut records: Vec<_> = self
            .store()
            .read_all()?
            .into_values()
            .filter(|r| filter.matches(r))
            .collect();
        records.sort_by_key(|r| r.id.to_string());
        Ok(records)
    }

    /// Appends a regauge to an existing record
    pub fn add_regauge(&self, id: &CaskmarkId, regauge: Regauge) -> Result<CaskRecord> {
        if !(0.0..=100.0).contains(&regauge.strength_abv) {
            return Err(RegistryError::InvalidMeasurement(format!(
                "strength {} is not a percentage",
                regauge.strength_abv
            ))
            .into());
        }
        if regauge.volume_litres <= 0.0 {
            return Err(RegistryError::InvalidMeasurement(format!(
                "volume {} litres is not positive",
                regauge.volume_litres
            ))
            .into());
        }

        let store = self.store();
        let mut record = store
            .read(id)?
            .ok_or_else(|| RegistryError::UnknownCask(id.clone()))?;

        record.add_regauge(regauge);
        store.update(&record)?;
        Ok(record)
    }

    /// Records an ownership change on an existing record
    pub fn transfer(&self, id: &CaskmarkId, change: OwnershipChange) -> Result<CaskRecord> {
        if change.owner.trim().is_empty() {
            return Err(RegistryError::InvalidTransfer("owner must not be empty".to_string()).into());
        }

        let store = self.store();
        let mut record = store
            .read(id)?
            .ok_or_else(|| RegistryError::UnknownCask(id.clone()))?;

        record.add_ownership_change(change);
        store.update(&record)?;
        Ok(record)
    }

    /// Appends a valuation to an existing record
    pub fn add_valuation(&self, id: &CaskmarkId, valuation: Valuation) -> Result<CaskRecord> {
        if valuation.amount <= 0.0 {
            return Err(RegistryError::InvalidValuation(format!(
                "amount {} is not positive",
                valuation.amount
            ))
            .into());
        }

        let store = self.store();
        let mut record = store
            .read(id)?
            .ok_or_else(|| RegistryError::UnknownCask(id.clone()))?;

        record.add_valuation(valuation);
        store.update(&record)?;
        Ok(record)
    }
}
