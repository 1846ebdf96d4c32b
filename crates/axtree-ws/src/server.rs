/*!
WebSocket server implementation.
*/

use axtree::{DefaultProvider, Inspector};
use axum::{
  extract::{
    ws::{Message, WebSocket, WebSocketUpgrade},
    State,
  },
  response::Response,
  routing::get,
  Router,
};
use log::error;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

/// Default WebSocket server port.
pub const DEFAULT_WS_PORT: u16 = 3030;
const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// WebSocket state.
#[derive(Clone)]
pub struct WebSocketState {
  inspector: Arc<Inspector<DefaultProvider>>,
  json_sender: Arc<broadcast::Sender<String>>,
  port: u16,
}

impl std::fmt::Debug for WebSocketState {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WebSocketState")
      .field("port", &self.port)
      .finish_non_exhaustive()
  }
}

impl WebSocketState {
  /// Create with default port.
  pub fn new(inspector: Arc<Inspector<DefaultProvider>>) -> Self {
    Self::with_port(inspector, DEFAULT_WS_PORT)
  }

  /// Create with custom port.
  pub fn with_port(inspector: Arc<Inspector<DefaultProvider>>, port: u16) -> Self {
    let (json_tx, _) = broadcast::channel::<String>(DEFAULT_CHANNEL_CAPACITY);
    Self {
      inspector,
      json_sender: Arc::new(json_tx),
      port,
    }
  }
}

/// Start the WebSocket server.
///
/// Forwarded diagnostics from the inspector are fanned out to every
/// connected client as `{"type": "log"|"error", "args": [...]}`.
pub async fn start_server(ws_state: WebSocketState) {
  let port = ws_state.port;
  let sender = ws_state.json_sender.clone();
  let mut logs = ws_state.inspector.subscribe_logs();
  tokio::spawn(async move {
    while let Ok(event) = logs.recv().await {
      if let Ok(json) = serde_json::to_string(&event) {
        drop(sender.send(json));
      }
    }
  });

  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods(Any)
    .allow_headers(Any);

  let app = Router::new()
    .route("/ws", get(websocket_handler))
    .layer(cors)
    .with_state(ws_state);

  let addr = format!("127.0.0.1:{port}");
  let listener = match tokio::net::TcpListener::bind(&addr).await {
    Ok(l) => l,
    Err(e) => {
      error!("Failed to bind WebSocket server to {addr}: {e}");
      std::process::exit(1);
    }
  };

  log::info!("WebSocket server: ws://{addr}/ws");

  if let Err(e) = axum::serve(listener, app).await {
    error!("WebSocket server failed: {e}");
    std::process::exit(1);
  }
}

async fn websocket_handler(
  ws: WebSocketUpgrade,
  State(ws_state): State<WebSocketState>,
) -> Response {
  ws.on_upgrade(|socket| handle_websocket(socket, ws_state))
}

async fn handle_websocket(mut socket: WebSocket, ws_state: WebSocketState) {
  let mut rx = ws_state.json_sender.subscribe();

  // Tell the client the current permission state up front, so the UI
  // can surface the grant flow before the first tree request.
  let inspector = ws_state.inspector.clone();
  let granted = tokio::task::spawn_blocking(move || inspector.check_permission()).await;
  let Ok(granted) = granted else {
    return;
  };
  let hello = json!({ "event": "permission", "granted": granted }).to_string();
  if socket.send(Message::Text(hello)).await.is_err() {
    return;
  }

  loop {
    tokio::select! {
        msg = socket.recv() => {
            match msg {
                Some(Ok(Message::Text(text))) => {
                    let response = handle_request_async(&text, &ws_state).await;
                    while let Ok(event_json) = rx.try_recv() {
                        drop(socket.send(Message::Text(event_json)).await);
                    }
                    drop(socket.send(Message::Text(response)).await);
                }
                Some(Ok(Message::Close(_))) => {
                    log::info!("[client] closed connection");
                    break;
                }
                Some(Err(e)) => {
                    log::error!("WebSocket error: {e}");
                    break;
                }
                None => {
                    log::info!("[client] disconnected");
                    break;
                }
                _ => {}
            }
        }

        broadcast = rx.recv() => {
            match broadcast {
                Ok(event_json) => {
                    if socket.send(Message::Text(event_json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    log::warn!("[ws] Client lagged, dropped {n} events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
  }
}

async fn handle_request_async(request: &str, ws_state: &WebSocketState) -> String {
  let parsed: Result<Value, _> = serde_json::from_str(request);

  let req = match parsed {
    Ok(v) => v,
    Err(e) => return json!({ "error": format!("Invalid JSON: {}", e) }).to_string(),
  };

  let id = req.get("id").cloned().unwrap_or(Value::Null);
  let method = req
    .get("method")
    .and_then(Value::as_str)
    .unwrap_or("")
    .to_string();
  let args = req.get("args").cloned().unwrap_or(Value::Null);

  let inspector = ws_state.inspector.clone();
  let dispatch_result =
    tokio::task::spawn_blocking(move || crate::rpc::dispatch_json(&inspector, &method, &args))
      .await;

  let mut response = match dispatch_result {
    Ok(r) => r,
    Err(_) => json!({ "error": "RPC task panicked" }),
  };
  if let Some(obj) = response.as_object_mut() {
    obj.insert("id".to_string(), id);
  }
  response.to_string()
}
