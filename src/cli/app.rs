//! Main CLI application structure

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{codec, distillery, lookup, regauge, register, transfer, value};
use crate::domain::{CaskType, CaskmarkId, SpiritType};
use crate::storage::Registry;

#[derive(Parser)]
#[command(name = "caskmark")]
#[command(author, version, about = "Local-first whisky cask registry and identifier codec")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new registry
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Encode structured attributes into a CaskMark ID (no registry needed)
    Encode {
        /// 2-letter country code
        #[arg(long)]
        country: String,

        /// 2-digit fill year (0-99, interpreted as 2000+N)
        #[arg(long, conflicts_with = "fill_date")]
        year: Option<u8>,

        /// Fill date (alternative to --year)
        #[arg(long)]
        fill_date: Option<NaiveDate>,

        /// Spirit type (SC, GR, BL, OT or a name like single-malt)
        #[arg(long)]
        spirit: SpiritType,

        /// 2-character distillery code
        #[arg(long)]
        distillery: String,

        /// 6-character serial number
        #[arg(long)]
        serial: String,
    },

    /// Decode a candidate string into structured fields
    Decode {
        /// Candidate identifier (scanned or typed)
        candidate: String,
    },

    /// Check a candidate string's structure and checksum
    Verify {
        /// Candidate identifier
        candidate: String,
    },

    /// Register a cask: allocates a serial and assigns a CaskMark ID
    Register {
        /// Distillery code (must exist in the directory)
        #[arg(long)]
        distillery: String,

        /// Spirit type
        #[arg(long)]
        spirit: SpiritType,

        /// Cask type (barrel, hogshead, butt, puncheon, other)
        #[arg(long)]
        cask_type: CaskType,

        /// Date the cask was filled
        #[arg(long)]
        fill_date: NaiveDate,

        /// Original fill strength (% ABV)
        #[arg(long)]
        abv: f64,

        /// Original volume in litres
        #[arg(long)]
        volume: f64,

        /// Country code (defaults to the registry's default country)
        #[arg(long)]
        country: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show a registered cask with its regauge history
    Show {
        /// CaskMark ID
        id: CaskmarkId,
    },

    /// List registered casks
    List {
        /// Filter by distillery code
        #[arg(long)]
        distillery: Option<String>,

        /// Filter by 2-digit fill year
        #[arg(long)]
        year: Option<u8>,

        /// Filter by spirit type
        #[arg(long)]
        spirit: Option<SpiritType>,
    },

    /// Record a regauge measurement for a cask
    Regauge {
        /// CaskMark ID
        id: CaskmarkId,

        /// Measured volume in litres
        #[arg(long)]
        volume: f64,

        /// Measured strength (% ABV)
        #[arg(long)]
        abv: f64,

        /// Measurement date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Record an ownership transfer for a cask
    Transfer {
        /// CaskMark ID
        id: CaskmarkId,

        /// New owner
        #[arg(long)]
        to: String,

        /// Transfer date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Record a valuation for a cask
    Value {
        /// CaskMark ID
        id: CaskmarkId,

        /// Valuation amount
        #[arg(long)]
        amount: f64,

        /// Valuation date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Manage the distillery directory
    #[command(subcommand)]
    Distillery(distillery::DistilleryCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing registry at: {}", path));
            let registry = Registry::init(&path)?;
            output.success(&format!(
                "Initialized caskmark registry at {}",
                registry.root().display()
            ));
        }

        Commands::Encode {
            country,
            year,
            fill_date,
            spirit,
            distillery,
            serial,
        } => codec::encode(
            &output,
            codec::EncodeArgs {
                country,
                year,
                fill_date,
                spirit,
                distillery,
                serial,
            },
        )?,

        Commands::Decode { candidate } => codec::decode(&output, &candidate)?,
        Commands::Verify { candidate } => codec::verify(&output, &candidate)?,

        Commands::Register {
            distillery,
            spirit,
            cask_type,
            fill_date,
            abv,
            volume,
            country,
            notes,
        } => register::run(
            &output, distillery, spirit, cask_type, fill_date, abv, volume, country, notes,
        )?,

        Commands::Show { id } => lookup::show(&output, &id)?,

        Commands::List {
            distillery,
            year,
            spirit,
        } => lookup::list(&output, distillery, year, spirit)?,

        Commands::Regauge {
            id,
            volume,
            abv,
            date,
            notes,
        } => regauge::run(&output, &id, volume, abv, date, notes)?,

        Commands::Transfer {
            id,
            to,
            date,
            notes,
        } => transfer::run(&output, &id, to, date, notes)?,

        Commands::Value {
            id,
            amount,
            date,
            notes,
        } => value::run(&output, &id, amount, date, notes)?,

        Commands::Distillery(cmd) => distillery::run(cmd, &output)?,
    }

    Ok(())
}
