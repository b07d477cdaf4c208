//! File system watcher for the static root.
//!
//! Watches the served directory recursively and forwards relevant changes
//! through a channel, filtering out dependency directories, build output,
//! and hidden files. Coalescing of rapid bursts into a single reload happens
//! in the serve command's event loop, not here.

use crate::error::{CliError, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// File change event type.
#[derive(Debug, Clone)]
pub enum FileChange {
    /// File was modified
    Modified(PathBuf),
    /// File was created
    Created(PathBuf),
    /// File was removed
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }
}

/// Watcher over the static root.
///
/// Sends change events through a channel. The watcher only reports changes
/// that happen after startup; the initial state of the tree is not scanned.
pub struct FileWatcher {
    /// Underlying notify watcher, kept alive for the watch duration
    _watcher: RecommendedWatcher,
    /// Root directory being watched
    root: PathBuf,
}

impl FileWatcher {
    /// Create a new file watcher over `root`.
    ///
    /// Returns the watcher and the receiving end of the change channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the root doesn't exist or the platform watcher
    /// cannot be created.
    pub fn new(
        root: PathBuf,
        ignore_patterns: Vec<String>,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::channel(100);

        let root_clone = root.clone();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                for path in &event.paths {
                    if Self::should_ignore(path, &root_clone, &ignore_patterns) {
                        continue;
                    }

                    let change = match event.kind {
                        notify::EventKind::Create(_) => FileChange::Created(path.clone()),
                        notify::EventKind::Modify(_) => FileChange::Modified(path.clone()),
                        notify::EventKind::Remove(_) => FileChange::Removed(path.clone()),
                        _ => continue,
                    };

                    // Runs on notify's own thread; parking it while the
                    // channel is full only delays delivery, never the server
                    let _ = tx.blocking_send(change);
                }
            }
        })
        .map_err(CliError::Watch)?;

        watcher
            .watch(&root, RecursiveMode::Recursive)
            .map_err(CliError::Watch)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    /// Check if a path should be ignored.
    ///
    /// Paths outside the root are never forwarded; pattern matching runs on
    /// the root-relative path.
    fn should_ignore(path: &Path, root: &Path, ignore_patterns: &[String]) -> bool {
        if !path.starts_with(root) {
            return true;
        }

        let rel_path = match path.strip_prefix(root) {
            Ok(p) => p,
            Err(_) => return true,
        };

        let path_str = rel_path.to_string_lossy();

        for pattern in ignore_patterns {
            if let Some(ext) = pattern.strip_prefix('*') {
                // Extension pattern like "*.log"
                if path_str.ends_with(ext) {
                    return true;
                }
            } else if path_str.starts_with(pattern.as_str())
                || path_str.contains(&format!("/{}", pattern))
            {
                // Directory pattern like "node_modules"
                return true;
            }
        }

        // Ignore hidden files and directories
        for component in rel_path.components() {
            if let Some(name) = component.as_os_str().to_str() {
                if name.starts_with('.') && name != "." && name != ".." {
                    return true;
                }
            }
        }

        false
    }

    /// Get the root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Default patterns excluded from watching.
pub fn default_ignore_patterns() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        ".git".to_string(),
        "dist".to_string(),
        "build".to_string(),
        "*.log".to_string(),
        ".DS_Store".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_ignore_node_modules() {
        let root = PathBuf::from("/site");
        let patterns = vec!["node_modules".to_string()];

        let path = PathBuf::from("/site/node_modules/pkg/index.js");
        assert!(FileWatcher::should_ignore(&path, &root, &patterns));

        let path = PathBuf::from("/site/js/main.js");
        assert!(!FileWatcher::should_ignore(&path, &root, &patterns));
    }

    #[test]
    fn test_should_ignore_extension() {
        let root = PathBuf::from("/site");
        let patterns = vec!["*.log".to_string()];

        let path = PathBuf::from("/site/debug.log");
        assert!(FileWatcher::should_ignore(&path, &root, &patterns));

        let path = PathBuf::from("/site/css/style.css");
        assert!(!FileWatcher::should_ignore(&path, &root, &patterns));
    }

    #[test]
    fn test_should_ignore_hidden_files() {
        let root = PathBuf::from("/site");
        let patterns = vec![];

        assert!(FileWatcher::should_ignore(
            &PathBuf::from("/site/.git/config"),
            &root,
            &patterns
        ));
        assert!(FileWatcher::should_ignore(
            &PathBuf::from("/site/.env"),
            &root,
            &patterns
        ));
        assert!(FileWatcher::should_ignore(
            &PathBuf::from("/site/img/.hidden/a.png"),
            &root,
            &patterns
        ));
    }

    #[test]
    fn test_should_ignore_outside_root() {
        let root = PathBuf::from("/site");
        let patterns = vec![];

        let path = PathBuf::from("/other/file.html");
        assert!(FileWatcher::should_ignore(&path, &root, &patterns));
    }

    #[test]
    fn test_file_change_path() {
        let path = PathBuf::from("/site/index.html");

        let change = FileChange::Modified(path.clone());
        assert_eq!(change.path(), path.as_path());

        let change = FileChange::Created(path.clone());
        assert_eq!(change.path(), path.as_path());

        let change = FileChange::Removed(path.clone());
        assert_eq!(change.path(), path.as_path());
    }
}
