//! Serve command implementation.
//!
//! Orchestrates the server lifecycle:
//! - Configuration loading and validation
//! - Push channel startup (with graceful degradation when it cannot bind)
//! - File watching with change coalescing
//! - HTTP server for static files
//! - Graceful shutdown on Ctrl+C

use crate::cli::ServeArgs;
use crate::error::{CliError, Result};
use crate::serve::{FileWatcher, PushChannel, ReloadHub, ServeConfig, SharedHub, StaticServer};
use crate::ui;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::mpsc;

/// Execute the serve command.
///
/// # Process Flow
///
/// 1. Load and validate configuration
/// 2. Bind the push channel (or fall back to reload-free serving)
/// 3. Start the file watcher and the change-coalescing task
/// 4. Start the HTTP server
/// 5. Wait for Ctrl+C
///
/// # Errors
///
/// Returns errors for invalid configuration, a busy HTTP port, or server
/// failures at any point; a server task that dies after startup is fatal.
/// The process exits 0 after Ctrl+C.
pub async fn execute(args: ServeArgs) -> Result<()> {
    // Step 1: Load and validate configuration
    let config = ServeConfig::from_args(&args)?;

    ui::info(&format!("Serving {}", config.root.display()));

    // Step 2: Push channel, degrading gracefully when it cannot bind
    let hub: SharedHub = Arc::new(ReloadHub::new());
    let mut live_reload = config.live_reload;

    if live_reload {
        match PushChannel::bind(config.push_addr, hub.clone()).await {
            Ok(channel) => {
                tokio::spawn(async move {
                    if let Err(e) = channel.serve().await {
                        ui::error(&format!("Push channel error: {}", e));
                    }
                });
                tracing::debug!("push channel listening at {}", config.push_url());
            }
            Err(e) => {
                ui::warning(&format!("Live reload disabled: {}", e));
                live_reload = false;
            }
        }
    }

    // Step 3: File watcher and change coalescing
    let _watcher = if live_reload {
        let (watcher, change_rx) = FileWatcher::new(config.root.clone(), config.watch_ignore.clone())?;
        ui::info(&format!(
            "Watching for changes in: {}",
            watcher.root().display()
        ));

        let hub_clone = hub.clone();
        let debounce = Duration::from_millis(config.debounce_ms);
        tokio::spawn(coalesce_changes(change_rx, hub_clone, debounce));

        Some(watcher)
    } else {
        None
    };

    // Step 4: HTTP server
    let server = StaticServer::new(config.clone(), live_reload);
    let server_url = config.server_url();
    let mut server_handle = tokio::spawn(server.start());

    ui::success(&format!("Server running at {}", server_url));

    if config.open {
        open_browser(&server_url);
    }

    // Step 5: Wait for shutdown
    ui::info("Press Ctrl+C to stop");

    tokio::select! {
        // Ctrl+C received
        _ = signal::ctrl_c() => {
            ui::info("Shutting down...");
        }

        // Server task died; an unhandled asynchronous failure is fatal
        res = &mut server_handle => {
            let err = server_task_error(res);
            ui::error(&format!("{}", err));
            return Err(err);
        }
    }

    ui::success("Server stopped");
    Ok(())
}

/// Map a completed server task to the fatal error it represents.
///
/// The serve loop never returns on its own, so any completion is a failure:
/// either the task's own error, a panic, or an unexplained exit.
fn server_task_error(
    res: std::result::Result<Result<()>, tokio::task::JoinError>,
) -> CliError {
    match res {
        Ok(Err(e)) => e,
        Ok(Ok(())) => CliError::Server("server exited unexpectedly".to_string()),
        Err(e) => CliError::Server(format!("server task panicked: {}", e)),
    }
}

/// Coalesce change bursts into single reload broadcasts.
///
/// The first change of a burst arms a quiet-period timer; changes arriving
/// within the window are absorbed without extending it. When the timer fires,
/// exactly one broadcast goes out regardless of how many files changed.
async fn coalesce_changes(
    mut change_rx: mpsc::Receiver<crate::serve::FileChange>,
    hub: SharedHub,
    debounce: Duration,
) {
    while let Some(first) = change_rx.recv().await {
        tracing::debug!("change detected: {}", first.path().display());

        let deadline = tokio::time::sleep(debounce);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = &mut deadline => break,
                more = change_rx.recv() => {
                    match more {
                        Some(change) => {
                            tracing::debug!("change absorbed: {}", change.path().display());
                        }
                        // Watcher gone; flush the pending broadcast below
                        None => break,
                    }
                }
            }
        }

        ui::info("Change detected, reloading browser");
        hub.broadcast();
    }
}

/// Open the server URL in the default browser.
///
/// Uses platform-specific commands:
/// - macOS: `open`
/// - Windows: `start`
/// - Linux: `xdg-open`
fn open_browser(url: &str) {
    use std::process::Command;

    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", url]).spawn()
    } else {
        Command::new("xdg-open").arg(url).spawn()
    };

    match result {
        Ok(_) => ui::info(&format!("Opened browser at {}", url)),
        Err(e) => ui::warning(&format!("Failed to open browser: {}", e)),
    }
}
