//! CLI module - command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;

/// nbury - bury flashcards for N days
#[derive(Parser, Debug)]
#[command(name = "nbury")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable JSON output for machine consumption
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/nbury/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the data directory, config, and store schema
    Init(commands::init::InitArgs),

    /// Record burials for the given cards
    Bury(commands::bury::BuryArgs),

    /// Show bury records and their expiry
    Status(commands::status::StatusArgs),

    /// Re-derive the active bury set and run housekeeping
    Reconcile(commands::reconcile::ReconcileArgs),

    /// Delete expired bury records now
    Sweep(commands::sweep::SweepArgs),
}
