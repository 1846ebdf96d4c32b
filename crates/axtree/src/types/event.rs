/*! Events forwarded from the logic layer to the presentation layer. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Severity of a forwarded log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LogKind {
  Log,
  Error,
}

/// A diagnostic line forwarded to connected clients.
///
/// Purely informational, not protocol-significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LogEvent {
  #[serde(rename = "type")]
  pub kind: LogKind,
  pub args: Vec<String>,
}
