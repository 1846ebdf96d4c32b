/*! Core types for axtree.

Regenerate TypeScript types: `cargo test` (ts-rs export)
*/

#![allow(missing_docs)]

mod error;
mod event;
mod ids;
mod node;
mod window;

pub use error::{AxTreeError, AxTreeResult};
pub use event::{LogEvent, LogKind};
pub use ids::ProcessId;
pub use node::TreeNode;
pub use window::WindowRecord;
