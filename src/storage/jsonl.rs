//! JSONL storage for cask records
//!
//! Records are stored in `.caskmark/casks.jsonl` with one JSON object per
//! line. Uses file locking for concurrent access safety.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::{CaskRecord, CaskmarkId};

use super::config::REGISTRY_DIR;

/// Store for cask records in JSONL format
pub struct CaskStore {
    path: PathBuf,
}

impl CaskStore {
    /// Creates a store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a registry root
    pub fn for_registry(registry_root: &Path) -> Self {
        Self::new(registry_root.join(REGISTRY_DIR).join("casks.jsonl"))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all records from the store, keyed by identifier
    pub fn read_all(&self) -> Result<HashMap<CaskmarkId, CaskRecord>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open cask store: {}", self.path.display()))?;

        // Shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on cask store")?;

        let reader = BufReader::new(&file);
        let mut records = HashMap::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let record: CaskRecord = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse cask record at line {}", line_num + 1))?;

            records.insert(record.id.clone(), record);
        }

        // Lock is released when file is dropped
        Ok(records)
    }

    /// Reads a single record by identifier
    pub fn read(&self, id: &CaskmarkId) -> Result<Option<CaskRecord>> {
        Ok(self.read_all()?.remove(id))
    }

    /// Writes all records to the store (full rewrite)
    pub fn write_all(&self, records: &HashMap<CaskmarkId, CaskRecord>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on cask store")?;

            let mut writer = BufWriter::new(&file);

            // Sort by canonical identifier for consistent output
            let mut sorted: Vec<_> = records.values().collect();
            sorted.sort_by_key(|r| r.id.to_string());

            for record in sorted {
                let line = serde_json::to_string(record).context("Failed to serialize record")?;
                writeln!(writer, "{}", line).context("Failed to write record")?;
            }

            writer.flush().context("Failed to flush cask store")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Appends a single record without rewriting the file
    pub fn append(&self, record: &CaskRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open cask store: {}", self.path.display()))?;

        file.lock_exclusive()
            .context("Failed to acquire write lock on cask store")?;

        let mut writer = BufWriter::new(&file);
        let line = serde_json::to_string(record).context("Failed to serialize record")?;
        writeln!(writer, "{}", line).context("Failed to write record")?;

        writer.flush().context("Failed to flush cask store")?;

        Ok(())
    }

    /// Updates a single record (reads all, replaces, writes all)
    pub fn update(&self, record: &CaskRecord) -> Result<()> {
        let mut records = self.read_all()?;
        records.insert(record.id.clone(), record.clone());
        self.write_all(&records)
    }
}
