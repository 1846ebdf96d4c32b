/*! Stub provider for platforms without an accessibility backend.

Keeps the crate building and testable everywhere; every operation
reports the feature as unavailable.
*/

use crate::platform::traits::{AttrValue, ElementAttributes, PlatformHandle, Provider};
use crate::types::{AxTreeError, AxTreeResult, ProcessId};

const UNSUPPORTED: &str = "accessibility inspection requires macOS";

/// Element handle that can never be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeverHandle {}

impl PlatformHandle for NeverHandle {
  fn read(&self) -> AxTreeResult<ElementAttributes<Self>> {
    match *self {}
  }

  fn attribute(&self, _name: &str) -> Option<AttrValue<Self>> {
    match *self {}
  }
}

/// Provider that reports accessibility as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedProvider;

impl UnsupportedProvider {
  /// Create the stub provider.
  pub const fn new() -> Self {
    Self
  }
}

impl Provider for UnsupportedProvider {
  type Handle = NeverHandle;

  fn is_trusted(&self) -> bool {
    false
  }

  fn system_wide(&self) -> AxTreeResult<NeverHandle> {
    Err(AxTreeError::Unsupported(UNSUPPORTED.into()))
  }

  fn app_main_window(&self, _pid: ProcessId) -> AxTreeResult<NeverHandle> {
    Err(AxTreeError::Unsupported(UNSUPPORTED.into()))
  }

  fn open_privacy_settings(&self) -> AxTreeResult<()> {
    Err(AxTreeError::Unsupported(UNSUPPORTED.into()))
  }
}
