/*!
macOS platform implementation on the `AXUIElement` API.
*/

mod handles;
mod util;

pub use handles::ElementHandle;

use crate::platform::traits::Provider;
use crate::types::{AxTreeError, AxTreeResult, ProcessId};

/// Provider backed by the macOS accessibility API.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacosProvider;

impl MacosProvider {
  /// Create the provider. Binding is compile-time; nothing to load.
  pub const fn new() -> Self {
    Self
  }
}

impl Provider for MacosProvider {
  type Handle = ElementHandle;

  fn is_trusted(&self) -> bool {
    util::is_process_trusted()
  }

  fn system_wide(&self) -> AxTreeResult<ElementHandle> {
    if !util::is_process_trusted() {
      return Err(AxTreeError::PermissionDenied);
    }
    Ok(ElementHandle::new(util::system_wide_element()))
  }

  fn app_main_window(&self, pid: ProcessId) -> AxTreeResult<ElementHandle> {
    let app = ElementHandle::new(util::app_element(pid.0));
    app
      .get_element("AXMainWindow")
      .ok_or(AxTreeError::MainWindowUnavailable(pid))
  }

  fn open_privacy_settings(&self) -> AxTreeResult<()> {
    std::process::Command::new("open")
      .arg(util::ACCESSIBILITY_SETTINGS_URL)
      .spawn()
      .map_err(|e| AxTreeError::Interpreter {
        reason: format!("failed to open settings pane: {e}"),
      })?;
    Ok(())
  }
}
