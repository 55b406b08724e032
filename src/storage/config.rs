//! Configuration handling for CaskMark
//!
//! The registry configuration lives in `.caskmark/config.toml` and carries
//! the policy the codec itself stays agnostic of: which country codes the
//! registry accepts, the default country for new registrations, and the
//! distillery directory (code to name).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Directory that marks a registry root
pub const REGISTRY_DIR: &str = ".caskmark";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Registry-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Country codes this registry accepts (ISO 3166-1 alpha-2 subset)
    pub accepted_countries: Vec<String>,

    /// Country applied when a registration does not name one
    pub default_country: String,

    /// Distillery directory: code -> display name
    pub distilleries: BTreeMap<String, String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            accepted_countries: ["GB", "IE", "US", "JP", "FR", "DE"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_country: "GB".to_string(),
            distilleries: BTreeMap::new(),
        }
    }
}

impl RegistryConfig {
    /// Returns true if the country code is in the accepted subset
    pub fn accepts_country(&self, code: &str) -> bool {
        let code = code.to_ascii_uppercase();
        self.accepted_countries.iter().any(|c| c == &code)
    }

    /// Looks up a distillery name by code
    pub fn distillery_name(&self, code: &str) -> Option<&str> {
        self.distilleries
            .get(&code.to_ascii_uppercase())
            .map(String::as_str)
    }

    /// Adds or replaces a directory entry, returning the previous name
    pub fn set_distillery(&mut self, code: &str, name: &str) -> Option<String> {
        self.distilleries
            .insert(code.to_ascii_uppercase(), name.to_string())
    }

    /// Path of the config file within a registry root
    pub fn path_for(registry_root: &Path) -> PathBuf {
        registry_root.join(REGISTRY_DIR).join("config.toml")
    }

    /// Loads the configuration for a registry root, falling back to
    /// defaults when no config file exists yet
    pub fn load(registry_root: &Path) -> Result<Self> {
        let config_path = Self::path_for(registry_root);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse registry config")
    }

    /// Saves the configuration into a registry root
    pub fn save(&self, registry_root: &Path) -> Result<()> {
        let config_path = Self::path_for(registry_root);

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))
    }

    /// Finds the registry root by walking up from the current directory
    pub fn find_registry_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(REGISTRY_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = RegistryConfig::default();
        assert!(config.accepts_country("GB"));
        assert!(config.accepts_country("jp"));
        assert!(!config.accepts_country("ZZ"));
        assert_eq!(config.default_country, "GB");
        assert!(config.distilleries.is_empty());
    }

    #[test]
    fn parse_config() {
        let toml = r#"
accepted_countries = ["GB", "IE"]
default_country = "IE"

[distilleries]
G1 = "Glen Example"
L4 = "Loch Sample"
"#;

        let config: RegistryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.accepted_countries, vec!["GB", "IE"]);
        assert_eq!(config.default_country, "IE");
        assert_eq!(config.distillery_name("g1"), Some("Glen Example"));
        assert_eq!(config.distillery_name("X9"), None);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = RegistryConfig::load(dir.path()).unwrap();
        assert_eq!(config.default_country, "GB");
    }

    #[test]
    fn save_and_reload() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(REGISTRY_DIR)).unwrap();

        let mut config = RegistryConfig::default();
        config.set_distillery("g1", "Glen Example");
        config.save(dir.path()).unwrap();

        let loaded = RegistryConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.distillery_name("G1"), Some("Glen Example"));
    }

    #[test]
    fn set_distillery_normalizes_code() {
        let mut config = RegistryConfig::default();
        assert!(config.set_distillery("g1", "Glen Example").is_none());
        assert_eq!(
            config.set_distillery("G1", "Glen Renamed"),
            Some("Glen Example".to_string())
        );
    }
}
