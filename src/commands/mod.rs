//! CLI command implementations.

mod serve;

pub use serve::execute as serve_execute;
