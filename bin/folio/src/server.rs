//! Embedded development server with live reload support

use std::{convert::Infallible, path::Path, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::State,
    http::header,
    response::{
        IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use tokio::sync::broadcast;
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};
use tower_http::services::ServeDir;

/// Live reload message type.
#[derive(Debug, Clone)]
pub enum ReloadMessage {
    /// Full page reload.
    Reload,
}

/// Server state containing the reload broadcaster.
#[derive(Clone)]
pub struct ServerState {
    /// Broadcast channel for live reload events.
    pub reload_tx: broadcast::Sender<ReloadMessage>,
}

impl ServerState {
    /// Create a new server state.
    pub fn new() -> Self {
        let (reload_tx, _) = broadcast::channel(16);
        Self { reload_tx }
    }

    /// Send a reload notification to all connected clients.
    pub fn notify_reload(&self) {
        let _ = self.reload_tx.send(ReloadMessage::Reload);
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the development server router.
///
/// `now_playing_endpoint` is answered with an idle status so the footer widget
/// renders locally.
pub fn create_router(
    output_dir: &Path,
    now_playing_endpoint: Option<&str>,
    state: Arc<ServerState>,
) -> Router {
    let mut router = Router::new().route("/__livereload", get(livereload_handler));

    if let Some(endpoint) = now_playing_endpoint.filter(|e| is_routable(e)) {
        router = router.route(endpoint, get(now_playing_handler));
    }

    router
        .fallback_service(ServeDir::new(output_dir))
        .with_state(state)
}

/// Literal paths only; axum rejects captures, wildcards and `:` segments.
fn is_routable(endpoint: &str) -> bool {
    endpoint.starts_with('/')
        && endpoint != "/__livereload"
        && !endpoint.contains(['{', '}', '*', ':'])
}

/// Server-Sent Events handler for live reload.
async fn livereload_handler(
    State(state): State<Arc<ServerState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.reload_tx.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(ReloadMessage::Reload) => Some(Ok(Event::default().data("reload"))),
        Err(_) => None, // Ignore lagged messages
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    )
}

async fn now_playing_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"isPlaying":false}"#,
    )
}

/// JavaScript snippet to inject for live reload.
pub const LIVERELOAD_SCRIPT: &str = r#"
<script>
(function() {
    const source = new EventSource('/__livereload');
    source.onmessage = function(event) {
        if (event.data === 'reload') {
            window.location.reload();
        }
    };
    source.onerror = function() {
        console.log('[livereload] Connection lost, retrying...');
    };
})();
</script>
"#;
