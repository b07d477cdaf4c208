//! Serve command configuration.
//!
//! Assembles the server configuration from CLI arguments (with `PORT` and
//! `HOST` environment fallbacks handled by clap) and validates it.

use crate::cli::ServeArgs;
use crate::error::{CliError, ConfigError, Result};
use crate::serve::watcher;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Configuration for the serve command.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Static root all servable files are resolved under
    pub root: PathBuf,

    /// HTTP server socket address
    pub addr: SocketAddr,

    /// Push channel socket address (HTTP port + 1)
    pub push_addr: SocketAddr,

    /// Open browser automatically on start
    pub open: bool,

    /// Whether live reload (injection + push channel + watcher) is enabled
    pub live_reload: bool,

    /// Patterns to ignore when watching files
    pub watch_ignore: Vec<String>,

    /// Quiet period in milliseconds for coalescing change bursts
    pub debounce_ms: u64,
}

impl ServeConfig {
    /// Create a ServeConfig from CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the host doesn't parse, the static root is not a
    /// directory, or the requested port is already bound.
    pub fn from_args(args: &ServeArgs) -> Result<Self> {
        let host: IpAddr = args.host.parse().map_err(|_| ConfigError::InvalidValue {
            field: "host".to_string(),
            value: args.host.clone(),
            hint: "Use an IP address such as 127.0.0.1 or 0.0.0.0".to_string(),
        })?;

        let root = args
            .root
            .canonicalize()
            .map_err(|_| ConfigError::RootNotFound(args.root.clone()))?;
        if !root.is_dir() {
            return Err(ConfigError::RootNotFound(args.root.clone()).into());
        }

        let addr = SocketAddr::new(host, args.port);
        let push_port = args.port.checked_add(1).ok_or_else(|| {
            CliError::Config(ConfigError::InvalidValue {
                field: "port".to_string(),
                value: args.port.to_string(),
                hint: "The push channel uses port + 1; pick a port below 65535".to_string(),
            })
        })?;
        let push_addr = SocketAddr::new(host, push_port);

        // Probe the HTTP port up front so a busy port fails with a clear
        // diagnostic instead of dying inside the accept loop
        Self::probe_port(addr)?;

        Ok(Self {
            root,
            addr,
            push_addr,
            open: args.open,
            live_reload: !args.no_reload,
            watch_ignore: watcher::default_ignore_patterns(),
            debounce_ms: 100,
        })
    }

    /// Check that the address can be bound.
    ///
    /// A busy port is fatal; the process exits with a diagnostic rather than
    /// silently moving to another port.
    fn probe_port(addr: SocketAddr) -> Result<()> {
        use std::net::TcpListener;

        if addr.port() < 1024 {
            crate::ui::warning(&format!(
                "Port {} is in privileged range, may require root access",
                addr.port()
            ));
        }

        match TcpListener::bind(addr) {
            Ok(_) => Ok(()),
            Err(e) => Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                value: addr.port().to_string(),
                hint: format!("Could not bind {}: {}. Pick a different port.", addr, e),
            }
            .into()),
        }
    }

    /// Get the server URL as a string.
    pub fn server_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the push channel URL as a string.
    pub fn push_url(&self) -> String {
        format!("http://{}", self.push_addr)
    }
}
