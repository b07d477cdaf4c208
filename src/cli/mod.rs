//! Command-line interface definition for Vitrine.
//!
//! This module defines the complete CLI structure using clap v4's derive
//! macros. It provides type-safe argument parsing with validation and clear
//! error messages.
//!
//! # Command Structure
//!
//! - `vitrine serve` - Serve a static site with live reload

mod commands;

use clap::Parser;

pub use commands::{Command, ServeArgs};

/// Vitrine - local static site server with live reload
#[derive(Parser, Debug)]
#[command(
    name = "vitrine",
    version,
    about = "A local static site server with live reload",
    long_about = "Vitrine serves a static site from a directory, injects a live-reload\n\
                  client into served HTML, watches the filesystem for changes, and\n\
                  refreshes connected browser tabs automatically."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows detailed information about request handling, file resolution,
    /// and watcher events.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    ///
    /// Only critical errors will be displayed. Useful for CI/CD environments
    /// or when piping output to other tools.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    ///
    /// Outputs plain text without ANSI color codes. Useful for logging to
    /// files or systems that don't support colored terminal output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
