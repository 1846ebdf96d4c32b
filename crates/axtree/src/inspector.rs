/*!
Inspector facade.

Owns the injected platform provider and wires the permission gate,
tree formatter, and window enumerator together. This is the only type
a host surface needs.
*/

use std::time::Duration;

use crate::diagnostics::LogChannel;
use crate::permission::{check_accessibility_permission, request_accessibility_permission};
use crate::platform::{DefaultProvider, Provider};
use crate::tree::{element_tree, TreeConfig};
use crate::types::{AxTreeError, AxTreeResult, LogEvent, ProcessId, TreeNode, WindowRecord};
use crate::window_list;

/// Accessibility inspector over an injected platform provider.
#[derive(Debug)]
pub struct Inspector<P: Provider = DefaultProvider> {
  provider: P,
  config: TreeConfig,
  script_timeout: Duration,
  logs: LogChannel,
}

impl Inspector<DefaultProvider> {
  /// Inspector over the current platform's provider.
  pub fn new() -> Self {
    Self::with_provider(DefaultProvider::new())
  }
}

impl Default for Inspector<DefaultProvider> {
  fn default() -> Self {
    Self::new()
  }
}

impl<P: Provider> Inspector<P> {
  /// Inspector over an explicit provider. Tests inject fakes here.
  pub fn with_provider(provider: P) -> Self {
    Self {
      provider,
      config: TreeConfig::default(),
      script_timeout: window_list::DEFAULT_SCRIPT_TIMEOUT,
      logs: LogChannel::new(),
    }
  }

  /// Override the tree walk limits.
  #[must_use]
  pub fn with_config(mut self, config: TreeConfig) -> Self {
    self.config = config;
    self
  }

  /// Override the window-script deadline.
  #[must_use]
  pub const fn with_script_timeout(mut self, timeout: Duration) -> Self {
    self.script_timeout = timeout;
    self
  }

  /// Subscribe to the diagnostics stream forwarded to clients.
  pub fn subscribe_logs(&self) -> async_broadcast::Receiver<LogEvent> {
    self.logs.subscribe()
  }

  /// Live permission check. Pure query - never opens the settings pane.
  pub fn check_permission(&self) -> bool {
    let granted = check_accessibility_permission(&self.provider);
    self
      .logs
      .log([format!("[permission] accessibility granted: {granted}")]);
    granted
  }

  /// Open the OS accessibility settings pane so the user can grant
  /// access. Returns `false` off-platform.
  pub fn request_permission(&self) -> bool {
    self.logs.log(["[permission] opening settings pane"]);
    request_accessibility_permission(&self.provider)
  }

  /// Snapshot the accessibility tree from the system-wide root.
  ///
  /// Rejects with `PermissionDenied` when the permission is not
  /// currently granted; a mid-walk provider failure aborts the whole
  /// request with no partial tree.
  pub fn element_tree(&self) -> AxTreeResult<TreeNode> {
    if !check_accessibility_permission(&self.provider) {
      self
        .logs
        .error(["[tree] accessibility permission required"]);
      return Err(AxTreeError::PermissionDenied);
    }
    let root = self.provider.system_wide()?;
    element_tree(&root, self.config)
  }

  /// Main window element of an application. Pure delegation to the
  /// provider.
  pub fn main_window(&self, pid: ProcessId) -> AxTreeResult<P::Handle> {
    self.provider.app_main_window(pid)
  }

  /// Enumerate visible, titled windows. Blocking; bounded by the
  /// configured script timeout.
  pub fn window_list(&self) -> AxTreeResult<Vec<WindowRecord>> {
    window_list::window_list(self.script_timeout)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::mock::{MockNode, MockProvider};
  use crate::types::LogKind;

  #[test]
  fn test_tree_fetch_requires_permission() {
    let provider = MockProvider::untrusted(vec![MockNode::new(None, None, vec![])], 0);
    let inspector = Inspector::with_provider(provider);
    let result = inspector.element_tree();
    assert!(matches!(result, Err(AxTreeError::PermissionDenied)));
  }

  #[test]
  fn test_denied_tree_fetch_forwards_error_event() {
    let provider = MockProvider::untrusted(vec![MockNode::new(None, None, vec![])], 0);
    let inspector = Inspector::with_provider(provider);
    let mut rx = inspector.subscribe_logs();

    let _ = inspector.element_tree();

    let event = rx.try_recv().unwrap();
    assert_eq!(event.kind, LogKind::Error);
    assert!(event.args.join(" ").contains("permission"));
  }

  #[cfg(target_os = "macos")]
  #[test]
  fn test_tree_fetch_when_granted() {
    let nodes = vec![
      MockNode::new(Some("AXApplication"), Some(""), vec![1]),
      MockNode::new(Some("AXButton"), Some("OK"), vec![]),
    ];
    let inspector = Inspector::with_provider(MockProvider::new(nodes, 0));
    let tree = inspector.element_tree().unwrap();
    assert_eq!(tree.role, "AXApplication");
    assert_eq!(tree.title, "Untitled");
    assert_eq!(tree.children[0].title, "OK");
  }

  #[test]
  fn test_main_window_delegates_to_provider() {
    let nodes = vec![
      MockNode::new(Some("AXApplication"), None, vec![1]),
      MockNode::new(Some("AXWindow"), Some("Main"), vec![]),
    ];
    let provider = MockProvider::new(nodes, 0).with_main_window(7, 1);
    let inspector = Inspector::with_provider(provider);

    let handle = inspector.main_window(ProcessId(7)).unwrap();
    assert_eq!(handle.idx, 1);

    let missing = inspector.main_window(ProcessId(8));
    assert!(matches!(
      missing,
      Err(AxTreeError::MainWindowUnavailable(ProcessId(8)))
    ));
  }
}
