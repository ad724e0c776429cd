//! CLI module - Command-line interface for TourSync
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// TourSync - mirrors a remote tour catalogue into local listings
#[derive(Parser)]
#[command(name = "toursync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server with the sync trigger
    #[command(alias = "web", alias = "daemon")]
    Serve,

    /// Sync a single page of tours and exit
    #[command(alias = "s")]
    Sync {
        /// Page to fetch, starting at 1
        #[arg(long, short, default_value_t = 1)]
        page: u32,
    },

    /// Show the listing mirrored from a tour
    #[command(alias = "i", alias = "info")]
    Show {
        /// Tour id as sent by the tour API
        tour_id: String,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
