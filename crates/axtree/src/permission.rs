/*!
Permission gate.

Checking is a pure query and surfacing the OS remediation UI is a
separate explicit action, so a caller polling an unauthorized process
never triggers repeated settings-panel pop-ups.
*/

use crate::platform::Provider;

/// True when the process currently holds the accessibility permission.
///
/// Always a live probe - no cached state, every call reflects the
/// current OS state. On platforms other than macOS this returns
/// `false` without touching the provider.
pub fn check_accessibility_permission<P: Provider>(provider: &P) -> bool {
  if cfg!(not(target_os = "macos")) {
    return false;
  }
  provider.is_trusted()
}

/// Open the accessibility privacy settings pane so the user can grant
/// access out-of-band.
///
/// Returns `true` on macOS (the pane was asked to open; a failure to
/// launch the opener is logged, not fatal) and `false` elsewhere with
/// no side effect.
pub fn request_accessibility_permission<P: Provider>(provider: &P) -> bool {
  if cfg!(not(target_os = "macos")) {
    return false;
  }
  if let Err(e) = provider.open_privacy_settings() {
    log::warn!("failed to open accessibility settings pane: {e}");
  }
  true
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::mock::MockProvider;
  use std::sync::atomic::Ordering;

  #[cfg(not(target_os = "macos"))]
  #[test]
  fn test_check_short_circuits_off_platform() {
    let mut provider = MockProvider::new(vec![], 0);
    provider.trusted = true;
    provider.panic_on_probe = true;
    // Must return false without probing the provider at all.
    assert!(!check_accessibility_permission(&provider));
  }

  #[cfg(not(target_os = "macos"))]
  #[test]
  fn test_request_has_no_side_effect_off_platform() {
    let provider = MockProvider::new(vec![], 0);
    assert!(!request_accessibility_permission(&provider));
    assert_eq!(provider.settings_opened.load(Ordering::SeqCst), 0);
  }

  #[cfg(target_os = "macos")]
  #[test]
  fn test_check_probes_provider_on_platform() {
    let trusted = MockProvider::new(vec![], 0);
    assert!(check_accessibility_permission(&trusted));

    let untrusted = MockProvider::untrusted(vec![], 0);
    assert!(!check_accessibility_permission(&untrusted));
  }

  #[cfg(target_os = "macos")]
  #[test]
  fn test_request_opens_settings_once_on_platform() {
    let provider = MockProvider::new(vec![], 0);
    assert!(request_accessibility_permission(&provider));
    assert_eq!(provider.settings_opened.load(Ordering::SeqCst), 1);
  }
}
