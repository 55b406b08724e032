//! Domain models for CaskMark
//!
//! Contains the identifier codec and cask business logic without any I/O
//! concerns.

pub mod base36;
pub mod checksum;
pub mod fingerprint;

mod cask;
mod identifier;

pub use cask::{CaskRecord, CaskType, OwnershipChange, Regauge, Valuation};
pub use identifier::{
    fill_year_from_date, serial_for_index, serial_index, verify_checksum, CaskmarkId,
    DecodeError, EncodeError, SpiritType, CANONICAL_LEN, PREFIX, SERIAL_WIDTH,
};
