/*!
Tree formatter.

Walks a live accessibility element and materializes an owned
`TreeNode` snapshot. The walk is iterative: an explicit frame stack
replaces unrestricted recursion, a per-walk visited set keyed on
handle identity guards against cyclic structures, and a configurable
depth cap bounds how much of a pathological tree is materialized.

Children are visited strictly in provider order and appended in that
order; there is exactly one in-flight read at a time. A failed
role/title/children read aborts the whole walk - no partial tree is
returned.
*/

use std::collections::HashSet;

use crate::platform::{ElementAttributes, PlatformHandle};
use crate::types::{AxTreeError, AxTreeResult, TreeNode};

/// Role substituted when an element reports none.
pub const UNKNOWN_ROLE: &str = "Unknown";
/// Title substituted when an element reports none.
pub const UNTITLED: &str = "Untitled";

const DEFAULT_MAX_DEPTH: usize = 100;

/// Limits applied to a tree walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
  /// Maximum node depth materialized (the root is depth 1).
  /// Children that would land below the cap are dropped.
  pub max_depth: usize,
}

impl Default for TreeConfig {
  fn default() -> Self {
    Self {
      max_depth: DEFAULT_MAX_DEPTH,
    }
  }
}

struct Frame<H> {
  node: TreeNode,
  pending: std::vec::IntoIter<H>,
}

impl<H: PlatformHandle> Frame<H> {
  fn new(attrs: ElementAttributes<H>) -> Self {
    Self {
      node: TreeNode {
        role: normalize(attrs.role, UNKNOWN_ROLE),
        title: normalize(attrs.title, UNTITLED),
        children: Vec::new(),
      },
      pending: attrs.children.into_iter(),
    }
  }
}

/// Absent or empty attribute values fall back to the default label.
fn normalize(value: Option<String>, default: &str) -> String {
  match value {
    Some(s) if !s.is_empty() => s,
    _ => default.to_string(),
  }
}

/// Snapshot the subtree rooted at `root`.
///
/// The result mirrors the live children order at the moment of
/// traversal. Elements already visited in this walk (a cycle, or an
/// element reachable twice) are skipped; children below
/// `config.max_depth` are dropped. Both conditions are summarized in
/// a single warn log after the walk.
pub fn element_tree<H: PlatformHandle>(root: &H, config: TreeConfig) -> AxTreeResult<TreeNode> {
  let mut visited: HashSet<H> = HashSet::new();
  visited.insert(root.clone());

  let mut stack = vec![Frame::new(root.read()?)];
  let mut truncated = 0usize;
  let mut skipped = 0usize;

  loop {
    let depth = stack.len();
    let Some(frame) = stack.last_mut() else {
      return Err(AxTreeError::Internal("walk stack underflow".into()));
    };

    if let Some(child) = frame.pending.next() {
      if depth >= config.max_depth {
        truncated += 1;
        continue;
      }
      if !visited.insert(child.clone()) {
        skipped += 1;
        continue;
      }
      let attrs = child.read()?;
      stack.push(Frame::new(attrs));
    } else if let Some(done) = stack.pop() {
      match stack.last_mut() {
        Some(parent) => parent.node.children.push(done.node),
        None => {
          if truncated > 0 {
            log::warn!(
              "tree walk dropped {truncated} nodes below depth {}",
              config.max_depth
            );
          }
          if skipped > 0 {
            log::warn!("tree walk skipped {skipped} already-visited elements (cycle guard)");
          }
          return Ok(done.node);
        }
      }
    }
  }
}
