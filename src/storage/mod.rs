//! Storage layer for CaskMark
//!
//! Persists the local registry: TOML configuration (country policy and the
//! distillery directory) and JSONL cask records.

mod config;
mod jsonl;
mod registry;

pub use config::{ConfigError, RegistryConfig, REGISTRY_DIR};
pub use jsonl::CaskStore;
pub use registry::{ListFilter, NewCask, Registry, RegistryError};
