/*! Window record produced by the window enumerator. */

use super::ProcessId;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One enumerated on-screen window with a non-empty title.
///
/// Produced fresh per enumeration call, never persisted. The wire
/// names (`pid`, `appName`, `title`) are a client-facing contract and
/// match the enumeration script's output schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WindowRecord {
  #[serde(rename = "pid")]
  pub process_id: ProcessId,
  #[serde(rename = "appName")]
  pub app_name: String,
  pub title: String,
}
