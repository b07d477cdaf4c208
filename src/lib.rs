//! Vitrine - local static site server with live reload.
//!
//! This crate provides a small development server for static sites. It serves
//! files from a directory, injects a live-reload client into HTML responses,
//! watches the filesystem for changes, and pushes reload notifications to
//! connected browser tabs over a Server-Sent Events side channel.
//!
//! # Architecture
//!
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Terminal status output
//! - [`serve`] - Path resolution, MIME lookup, responders, watcher, reload hub
//! - `commands` - CLI command implementations
//!
//! # Example
//!
//! ```rust
//! use vitrine::serve::{mime, resolver};
//!
//! let path = resolver::resolve("/docs/../index.html?cache=no");
//! assert_eq!(path, "index.html");
//! assert_eq!(mime::content_type("style.css"), "text/css");
//! ```

// Public modules
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod serve;
pub mod ui;

// Re-export commonly used types
pub use error::{CliError, ConfigError, Result, ResultExt};
