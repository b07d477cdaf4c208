//! Subcommand and argument definitions.

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve a static site with live reload
    ///
    /// Starts an HTTP server for the given directory, watches it for changes
    /// and reloads connected browser tabs when files are modified.
    Serve(ServeArgs),
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Directory to serve (the static root)
    ///
    /// All servable files are resolved under this directory. Requests for
    /// `/` or directory-like paths resolve to its index.html.
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Port for the HTTP server
    ///
    /// The live-reload push channel listens on the next port (PORT + 1).
    #[arg(short, long, default_value = "3000", env = "PORT", value_name = "PORT")]
    pub port: u16,

    /// Host address to bind
    #[arg(long, default_value = "127.0.0.1", env = "HOST", value_name = "HOST")]
    pub host: String,

    /// Open browser automatically on server start
    ///
    /// Launches the default web browser and navigates to the server URL.
    #[arg(long)]
    pub open: bool,

    /// Disable live reload
    ///
    /// Serves files without script injection and without the push channel
    /// or filesystem watcher.
    #[arg(long)]
    pub no_reload: bool,
}
