/*!
RPC request/response types and dispatch.
*/

#![allow(missing_docs)]

use axtree::{
  Inspector, PlatformHandle, ProcessId, Provider, TreeNode, WindowRecord, UNKNOWN_ROLE, UNTITLED,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use ts_rs::TS;

/// RPC request.
#[derive(Debug, Deserialize, TS)]
#[serde(tag = "method", content = "args", rename_all = "snake_case")]
#[ts(export)]
pub enum RpcRequest {
  /// Query the accessibility permission. Never opens the settings pane.
  CheckAccessibilityPermission,
  /// Open the OS accessibility settings pane.
  RequestAccessibilityPermission,
  /// Snapshot the accessibility tree from the system-wide root.
  ElementTree,
  /// Enumerate visible, titled windows across processes.
  WindowList,
  /// Resolve an application's main window to a single node.
  MainWindow { process_id: ProcessId },
}

/// RPC response.
#[derive(Debug, Serialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum RpcResponse {
  /// Permission state.
  Flag(bool),
  /// Tree snapshot (or a single node for main-window lookups).
  Tree(Box<TreeNode>),
  /// Window records in script order.
  Windows(Vec<WindowRecord>),
}

pub fn dispatch_json<P: Provider>(
  inspector: &Inspector<P>,
  method: &str,
  args: &JsonValue,
) -> JsonValue {
  let request_value = json!({ "method": method, "args": args });

  match serde_json::from_value::<RpcRequest>(request_value) {
    Ok(request) => match dispatch(inspector, request) {
      Ok(response) => json!({ "result": response }),
      Err(e) => {
        log::warn!("[rpc] {method} failed: {e}");
        json!({ "error": e })
      }
    },
    Err(e) => {
      log::warn!("[rpc] Invalid request for {method}: {e}");
      json!({ "error": format!("Invalid request: {}", e) })
    }
  }
}

pub fn dispatch<P: Provider>(
  inspector: &Inspector<P>,
  request: RpcRequest,
) -> Result<RpcResponse, String> {
  match request {
    RpcRequest::CheckAccessibilityPermission => {
      Ok(RpcResponse::Flag(inspector.check_permission()))
    }

    RpcRequest::RequestAccessibilityPermission => {
      Ok(RpcResponse::Flag(inspector.request_permission()))
    }

    RpcRequest::ElementTree => {
      let tree = inspector.element_tree().map_err(|e| e.to_string())?;
      Ok(RpcResponse::Tree(Box::new(tree)))
    }

    RpcRequest::WindowList => {
      let windows = inspector.window_list().map_err(|e| e.to_string())?;
      Ok(RpcResponse::Windows(windows))
    }

    RpcRequest::MainWindow { process_id } => {
      let handle = inspector.main_window(process_id).map_err(|e| e.to_string())?;
      let attrs = handle.read().map_err(|e| e.to_string())?;
      let node = TreeNode {
        role: attrs
          .role
          .filter(|s| !s.is_empty())
          .unwrap_or_else(|| UNKNOWN_ROLE.to_string()),
        title: attrs
          .title
          .filter(|s| !s.is_empty())
          .unwrap_or_else(|| UNTITLED.to_string()),
        children: Vec::new(),
      };
      Ok(RpcResponse::Tree(Box::new(node)))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_request_parsing() {
    let req: RpcRequest =
      serde_json::from_value(json!({ "method": "check_accessibility_permission", "args": null }))
        .unwrap();
    assert!(matches!(req, RpcRequest::CheckAccessibilityPermission));

    let req: RpcRequest =
      serde_json::from_value(json!({ "method": "main_window", "args": { "process_id": 42 } }))
        .unwrap();
    assert!(matches!(
      req,
      RpcRequest::MainWindow { process_id: ProcessId(42) }
    ));
  }

  #[test]
  fn test_unknown_method_is_an_error() {
    let inspector = Inspector::new();
    let response = dispatch_json(&inspector, "no_such_method", &JsonValue::Null);
    let error = response.get("error").and_then(JsonValue::as_str).unwrap();
    assert!(error.starts_with("Invalid request:"));
  }

  #[cfg(not(target_os = "macos"))]
  #[test]
  fn test_permission_check_off_platform() {
    let inspector = Inspector::new();
    let response = dispatch_json(&inspector, "check_accessibility_permission", &JsonValue::Null);
    assert_eq!(response, json!({ "result": false }));
  }

  #[cfg(not(target_os = "macos"))]
  #[test]
  fn test_element_tree_denied_off_platform() {
    let inspector = Inspector::new();
    let response = dispatch_json(&inspector, "element_tree", &JsonValue::Null);
    let error = response.get("error").and_then(JsonValue::as_str).unwrap();
    assert!(error.contains("permission"), "got: {error}");
  }
}
