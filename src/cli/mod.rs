//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Registry management | `init`, `distillery add` |
//! | Codec | Pure identifier operations | `encode`, `decode`, `verify` |
//! | Records | Cask lifecycle | `register`, `show`, `list`, `regauge`, `transfer`, `value` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod codec;
mod distillery;
mod lookup;
mod output;
mod regauge;
mod register;
mod transfer;
mod value;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
