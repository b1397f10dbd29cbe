//! Command-line interface for truck-inventory.
//!
//! This module provides the CLI structure and output rendering for the
//! `trucks` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, CheckIdCommand, ConfigCommand, DeleteCommand, EditCommand, ImportCommand,
    ListCommand, MakeArg,
};

/// trucks - Heavy truck inventory
///
/// Keeps a list of heavy trucks (make, id, availability, purchase date) in a
/// local database.
#[derive(Debug, Parser)]
#[command(name = "trucks")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all trucks
    List(ListCommand),

    /// Add a new truck
    Add(AddCommand),

    /// Edit an existing truck
    Edit(EditCommand),

    /// Delete a truck
    Delete(DeleteCommand),

    /// Check whether an id is well-formed and free
    CheckId(CheckIdCommand),

    /// Print the stored inventory as JSON
    Export,

    /// Replace the inventory with a previously exported file
    Import(ImportCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}
