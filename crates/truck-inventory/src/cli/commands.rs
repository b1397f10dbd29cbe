//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::config::OutputFormat;
use crate::truck::{parse_date, Make};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Truck id, three uppercase letters then three digits (e.g. ABC123)
    #[arg(long)]
    pub id: String,

    /// Manufacturer
    #[arg(short, long, value_enum)]
    pub make: Option<MakeArg>,

    /// Mark the truck as available
    #[arg(short, long)]
    pub available: bool,

    /// Purchase date as YYYY-MM-DD (defaults to today)
    #[arg(short, long, value_parser = parse_date_arg)]
    pub purchase_date: Option<NaiveDate>,
}

/// Edit command arguments.
///
/// Fields that are not given keep their current value.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Id of the truck to edit
    pub target: String,

    /// New id
    #[arg(long)]
    pub id: Option<String>,

    /// New manufacturer
    #[arg(short, long, value_enum)]
    pub make: Option<MakeArg>,

    /// New availability
    #[arg(short, long)]
    pub available: Option<bool>,

    /// New purchase date as YYYY-MM-DD
    #[arg(short, long, value_parser = parse_date_arg)]
    pub purchase_date: Option<NaiveDate>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the truck to delete
    pub id: String,

    /// Confirm the deletion
    #[arg(short, long)]
    pub yes: bool,
}

/// Check-id command arguments.
#[derive(Debug, Args)]
pub struct CheckIdCommand {
    /// Id to check
    pub id: String,

    /// Id of the truck being edited, which may keep its own id
    #[arg(short, long)]
    pub editing: Option<String>,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// JSON file produced by `trucks export`
    pub file: PathBuf,

    /// Confirm replacing the current inventory
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Manufacturer argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MakeArg {
    /// Belaz
    Belaz,
    /// Caterpillar
    Caterpillar,
    /// Komatsu
    Komatsu,
}

impl From<MakeArg> for Make {
    fn from(arg: MakeArg) -> Self {
        match arg {
            MakeArg::Belaz => Self::Belaz,
            MakeArg::Caterpillar => Self::Caterpillar,
            MakeArg::Komatsu => Self::Komatsu,
        }
    }
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}
