/*! Snapshot node of a formatted accessibility tree. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One element of a tree snapshot.
///
/// Owned and immutable once built: the shape mirrors the live
/// `AXChildren` order at the moment of traversal, not a live view.
/// A fresh tree is produced per request and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreeNode {
  /// Element role, `"Unknown"` when the element reports none.
  pub role: String,
  /// Element title, `"Untitled"` when the element reports none.
  pub title: String,
  /// Child snapshots in provider order.
  pub children: Vec<TreeNode>,
}
