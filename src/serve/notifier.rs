//! Reload notification hub.
//!
//! Tracks connected browser tabs and broadcasts a single reload token to all
//! of them when the watcher reports changes. Clients that have gone away are
//! pruned when a send to them fails; there is no acknowledgment and no retry.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// The token pushed to clients on a change. A tab that misses it simply does
/// not reload until the next change.
pub const RELOAD_TOKEN: &str = "reload";

/// Hub of connected push-channel clients.
///
/// All mutation goes through the interior `RwLock`; the hub itself is shared
/// behind an `Arc` between the HTTP handlers and the watcher loop.
#[derive(Default)]
pub struct ReloadHub {
    /// Connected clients: id -> sender for their push channel
    clients: RwLock<HashMap<usize, mpsc::Sender<String>>>,
    /// Next client ID
    next_client_id: RwLock<usize>,
}

impl ReloadHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new client.
    ///
    /// Returns the client ID and the receiving end of its push channel.
    pub fn register(&self) -> (usize, mpsc::Receiver<String>) {
        let id = {
            let mut next_id = self.next_client_id.write();
            let id = *next_id;
            *next_id += 1;
            id
        };

        let (tx, rx) = mpsc::channel(16);
        self.clients.write().insert(id, tx);

        (id, rx)
    }

    /// Unregister a client.
    pub fn unregister(&self, id: usize) {
        self.clients.write().remove(&id);
    }

    /// Broadcast the reload token to all connected clients.
    ///
    /// Fire-and-forget: never blocks on a slow client. A client whose channel
    /// is full misses this reload and catches the next one; a client whose
    /// channel is closed is pruned after the iteration. A no-op when no
    /// clients are connected; no ordering guarantee across clients.
    pub fn broadcast(&self) {
        // Clone the senders so the registry lock isn't held while pruning
        let clients: Vec<(usize, mpsc::Sender<String>)> = self
            .clients
            .read()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let mut closed_ids = Vec::new();

        for (id, tx) in clients {
            match tx.try_send(RELOAD_TOKEN.to_string()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    // Stalled tab: this reload is simply missed
                    tracing::debug!("client {} lagging, reload dropped", id);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    // Client disconnected, mark for removal
                    closed_ids.push(id);
                }
            }
        }

        for id in closed_ids {
            self.unregister(id);
        }
    }

    /// Number of connected clients.
    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }
}

/// Shared hub handle passed between handlers and the watcher loop.
pub type SharedHub = Arc<ReloadHub>;
