//! Static file server with live reload.
//!
//! Provides the pieces the serve command composes:
//! - URL path resolution against a static root
//! - MIME type lookup
//! - File responses with reload-script injection
//! - A reload hub broadcasting to connected tabs over SSE
//! - File watching with change coalescing

pub mod config;
pub mod mime;
pub mod notifier;
pub mod resolver;
pub mod responder;
pub mod server;
pub mod watcher;

// Re-exports
pub use config::ServeConfig;
pub use notifier::{ReloadHub, SharedHub, RELOAD_TOKEN};
pub use server::{PushChannel, StaticServer};
pub use watcher::{FileChange, FileWatcher};
