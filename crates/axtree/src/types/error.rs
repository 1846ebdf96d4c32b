/*! Error types for axtree operations. */

use super::ProcessId;

/// Errors that can occur during axtree operations.
#[derive(Debug, thiserror::Error)]
pub enum AxTreeError {
  #[error("Accessibility permissions not granted")]
  PermissionDenied,

  #[error("Not supported on this platform: {0}")]
  Unsupported(String),

  #[error("Failed to read element attributes: {reason}")]
  AttributeRead { reason: String },

  #[error("No main window for process {0}")]
  MainWindowUnavailable(ProcessId),

  #[error("Script interpreter failed: {reason}")]
  Interpreter { reason: String },

  #[error("Internal error: {0}")]
  Internal(String),
}

/// Result type for axtree operations.
pub type AxTreeResult<T> = Result<T, AxTreeError>;
