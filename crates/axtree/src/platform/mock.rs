/*! In-memory provider used by tests.

Elements live in a shared arena indexed by position; a handle is an
arena index plus a reference to the arena, so identity (`Hash`/`Eq`)
is the index. Cycles are expressed by listing an ancestor's index
among a node's children.
*/

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::platform::traits::{AttrValue, ElementAttributes, PlatformHandle, Provider};
use crate::types::{AxTreeError, AxTreeResult, ProcessId};

/// Scalar attribute stored on a mock node.
#[derive(Debug, Clone)]
pub(crate) enum MockAttr {
  Str(String),
  Num(f64),
  Bool(bool),
  /// Simulates a provider failure for this attribute.
  Fail,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockNode {
  pub(crate) role: Option<String>,
  pub(crate) title: Option<String>,
  pub(crate) children: Vec<usize>,
  /// When set, `read()` fails with an attribute-read error.
  pub(crate) fail_read: bool,
  pub(crate) attrs: HashMap<String, MockAttr>,
}

impl MockNode {
  pub(crate) fn new(role: Option<&str>, title: Option<&str>, children: Vec<usize>) -> Self {
    Self {
      role: role.map(str::to_string),
      title: title.map(str::to_string),
      children,
      fail_read: false,
      attrs: HashMap::new(),
    }
  }
}

#[derive(Debug, Clone)]
pub(crate) struct MockHandle {
  pub(crate) idx: usize,
  arena: Arc<Vec<MockNode>>,
}

impl MockHandle {
  fn node(&self) -> &MockNode {
    &self.arena[self.idx]
  }

  fn sibling(&self, idx: usize) -> Self {
    Self {
      idx,
      arena: Arc::clone(&self.arena),
    }
  }
}

impl PartialEq for MockHandle {
  fn eq(&self, other: &Self) -> bool {
    self.idx == other.idx
  }
}

impl Eq for MockHandle {}

impl std::hash::Hash for MockHandle {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    self.idx.hash(state);
  }
}

impl PlatformHandle for MockHandle {
  fn read(&self) -> AxTreeResult<ElementAttributes<Self>> {
    let node = self.node();
    if node.fail_read {
      return Err(AxTreeError::AttributeRead {
        reason: "mock read failure".into(),
      });
    }
    Ok(ElementAttributes {
      role: node.role.clone(),
      title: node.title.clone(),
      children: node.children.iter().map(|&i| self.sibling(i)).collect(),
    })
  }

  fn attribute(&self, name: &str) -> Option<AttrValue<Self>> {
    match self.node().attrs.get(name)? {
      MockAttr::Str(s) => Some(AttrValue::String(s.clone())),
      MockAttr::Num(n) => Some(AttrValue::Number(*n)),
      MockAttr::Bool(b) => Some(AttrValue::Boolean(*b)),
      MockAttr::Fail => None,
    }
  }
}

#[derive(Debug)]
pub(crate) struct MockProvider {
  arena: Arc<Vec<MockNode>>,
  pub(crate) trusted: bool,
  root: usize,
  main_windows: HashMap<u32, usize>,
  /// Panics when probed; asserts "no probe happened" in gate tests.
  pub(crate) panic_on_probe: bool,
  pub(crate) settings_opened: AtomicUsize,
}

impl MockProvider {
  pub(crate) fn new(nodes: Vec<MockNode>, root: usize) -> Self {
    Self {
      arena: Arc::new(nodes),
      trusted: true,
      root,
      main_windows: HashMap::new(),
      panic_on_probe: false,
      settings_opened: AtomicUsize::new(0),
    }
  }

  pub(crate) fn untrusted(nodes: Vec<MockNode>, root: usize) -> Self {
    Self {
      trusted: false,
      ..Self::new(nodes, root)
    }
  }

  pub(crate) fn with_main_window(mut self, pid: u32, idx: usize) -> Self {
    self.main_windows.insert(pid, idx);
    self
  }

  pub(crate) fn handle(&self, idx: usize) -> MockHandle {
    MockHandle {
      idx,
      arena: Arc::clone(&self.arena),
    }
  }
}

impl Provider for MockProvider {
  type Handle = MockHandle;

  fn is_trusted(&self) -> bool {
    assert!(!self.panic_on_probe, "provider probed unexpectedly");
    self.trusted
  }

  fn system_wide(&self) -> AxTreeResult<MockHandle> {
    if !self.trusted {
      return Err(AxTreeError::PermissionDenied);
    }
    Ok(self.handle(self.root))
  }

  fn app_main_window(&self, pid: ProcessId) -> AxTreeResult<MockHandle> {
    self
      .main_windows
      .get(&pid.0)
      .map(|&idx| self.handle(idx))
      .ok_or(AxTreeError::MainWindowUnavailable(pid))
  }

  fn open_privacy_settings(&self) -> AxTreeResult<()> {
    self.settings_opened.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn node_with_attrs() -> MockNode {
    let mut node = MockNode::new(Some("AXTextField"), Some("Search"), vec![]);
    node.attrs.insert("AXValue".into(), MockAttr::Str("hello".into()));
    node.attrs.insert("AXNumberOfCharacters".into(), MockAttr::Num(5.0));
    node.attrs.insert("AXFocused".into(), MockAttr::Bool(true));
    node.attrs.insert("AXBroken".into(), MockAttr::Fail);
    node
  }

  #[test]
  fn test_attribute_returns_typed_values() {
    let provider = MockProvider::new(vec![node_with_attrs()], 0);
    let handle = provider.handle(0);

    assert_eq!(
      handle.attribute("AXValue"),
      Some(AttrValue::String("hello".into()))
    );
    assert_eq!(
      handle.attribute("AXNumberOfCharacters"),
      Some(AttrValue::Number(5.0))
    );
    assert_eq!(handle.attribute("AXFocused"), Some(AttrValue::Boolean(true)));
  }

  #[test]
  fn test_attribute_never_raises() {
    let provider = MockProvider::new(vec![node_with_attrs()], 0);
    let handle = provider.handle(0);

    // Missing attribute and provider failure both normalize to None.
    assert_eq!(handle.attribute("AXNoSuchAttribute"), None);
    assert_eq!(handle.attribute("AXBroken"), None);
  }
}
