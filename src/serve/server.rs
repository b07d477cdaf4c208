//! HTTP servers: static file dispatcher and the reload push channel.
//!
//! The static server handles every request the same way: normalize the path,
//! resolve it under the static root, respond. The push channel is a second
//! listener on `port + 1` whose only route is a Server-Sent Events stream
//! carrying the plaintext reload token to subscribed tabs.

use crate::error::{CliError, Result};
use crate::serve::{responder, resolver, ServeConfig, SharedHub};
use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::get,
    Router,
};
use std::convert::Infallible;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_stream::Stream;
use tower_http::cors::{Any, CorsLayer};

/// Reload client script served at [`responder::RELOAD_SCRIPT_PATH`].
const RELOAD_SCRIPT: &str = include_str!("../../assets/reload-client.js");

/// Shared state for the static file routes.
struct ServerState {
    /// Static root all files are resolved under
    root: PathBuf,
    /// Whether HTML responses get the reload script injected
    live_reload: bool,
}

/// Static file server.
pub struct StaticServer {
    config: ServeConfig,
    live_reload: bool,
}

impl StaticServer {
    /// Create a new static server.
    ///
    /// `live_reload` may be false even when the config asked for it, if the
    /// push channel failed to bind.
    pub fn new(config: ServeConfig, live_reload: bool) -> Self {
        Self {
            config,
            live_reload,
        }
    }

    /// Bind the listener and serve until the task is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot bind to the configured address.
    pub async fn start(self) -> Result<()> {
        let addr = self.config.addr;
        let app = self.build_router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| CliError::Server(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Build the axum router with all routes.
    fn build_router(self) -> Router {
        let state = Arc::new(ServerState {
            root: self.config.root.clone(),
            live_reload: self.live_reload,
        });

        Router::new()
            // Reload client script
            .route(responder::RELOAD_SCRIPT_PATH, get(handle_reload_script))
            // All other routes serve files from the static root
            .fallback(handle_request)
            .layer(
                // CORS: allow all origins for local development
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(state)
    }
}

/// Serve the embedded reload client script.
async fn handle_reload_script() -> impl IntoResponse {
    Response::builder()
        .status(StatusCode::OK)
        .header(axum::http::header::CONTENT_TYPE, "application/javascript")
        .header(axum::http::header::CACHE_CONTROL, "no-cache")
        .body(axum::body::Body::from(RELOAD_SCRIPT))
        .unwrap()
}

/// Handle a static file request.
async fn handle_request(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
) -> Response {
    let path = uri.path();
    tracing::info!("{} {}", method, path);

    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let resolved = resolver::resolve(path);

    // A missing favicon is answered with 204 instead of the 404 page so the
    // browser console stays quiet
    if path == "/favicon.ico" && !state.root.join(&resolved).is_file() {
        return StatusCode::NO_CONTENT.into_response();
    }

    responder::serve_file(&state.root, &resolved, state.live_reload).await
}

/// SSE push channel on `port + 1`.
///
/// Binding is separated from serving so a bind failure can degrade to
/// reload-free serving instead of killing the process.
pub struct PushChannel {
    listener: tokio::net::TcpListener,
    hub: SharedHub,
}

impl PushChannel {
    /// Try to bind the push channel listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is already in use; the caller logs a
    /// warning and continues without live reload.
    pub async fn bind(addr: std::net::SocketAddr, hub: SharedHub) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind push channel {}: {}", addr, e)))?;
        Ok(Self { listener, hub })
    }

    /// Serve SSE subscriptions until the task is dropped.
    pub async fn serve(self) -> Result<()> {
        let app = Router::new()
            .route("/", get(handle_subscribe))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(self.hub);

        axum::serve(self.listener, app)
            .await
            .map_err(|e| CliError::Server(format!("Push channel error: {}", e)))?;

        Ok(())
    }
}

/// SSE stream for one subscribed tab.
///
/// Unregisters its client from the hub when the connection drops, so stale
/// connections never linger in the registry.
struct ClientStream {
    id: usize,
    hub: SharedHub,
    rx: mpsc::Receiver<String>,
}

impl Stream for ClientStream {
    type Item = std::result::Result<Event, Infallible>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut()
            .rx
            .poll_recv(cx)
            .map(|opt| opt.map(|token| Ok(Event::default().data(token))))
    }
}

impl Drop for ClientStream {
    fn drop(&mut self) {
        self.hub.unregister(self.id);
        tracing::debug!("client {} disconnected", self.id);
    }
}

/// Handle a push channel subscription.
async fn handle_subscribe(
    State(hub): State<SharedHub>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let (id, rx) = hub.register();
    tracing::debug!("client {} subscribed to reload events", id);

    let stream = ClientStream { id, hub, rx };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("ping"),
    )
}
