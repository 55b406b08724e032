//! CaskMark - The Cask Register
//!
//! CaskMark tracks whisky cask ownership records in a local registry. Every
//! verified cask carries a CaskMark ID - a fixed-format, checksummed
//! identifier (`CM-XX-YY-SS-DD-NNNNNN-C`) that can be printed on a physical
//! tag and later validated offline, without a registry lookup.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{
    verify_checksum, CaskRecord, CaskType, CaskmarkId, OwnershipChange, Regauge, SpiritType,
    Valuation,
};
