/*! WebSocket host for the `axtree` inspector. */

use std::sync::Arc;

use axtree::Inspector;
use axtree_ws::{start_server, WebSocketState, DEFAULT_WS_PORT};

#[tokio::main]
async fn main() {
  env_logger::init();

  let port = std::env::var("AXTREE_WS_PORT")
    .ok()
    .and_then(|p| p.parse().ok())
    .unwrap_or(DEFAULT_WS_PORT);

  let inspector = Arc::new(Inspector::new());
  start_server(WebSocketState::with_port(inspector, port)).await;
}
