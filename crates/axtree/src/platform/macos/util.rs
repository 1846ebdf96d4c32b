/*! Shared utilities for macOS accessibility. */

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_wrap)]

use objc2_application_services::{AXIsProcessTrusted, AXUIElement};
use objc2_core_foundation::CFRetained;

/// Deep link into the accessibility pane of the privacy settings.
pub(super) const ACCESSIBILITY_SETTINGS_URL: &str =
  "x-apple.systempreferences:com.apple.preference.security?Privacy_Accessibility";

/// Create an `AXUIElement` for an application by PID.
/// Encapsulates the unsafe FFI call.
pub(super) fn app_element(pid: u32) -> CFRetained<AXUIElement> {
  unsafe { AXUIElement::new_application(pid as i32) }
}

/// Root accessibility element of the desktop session.
pub(super) fn system_wide_element() -> CFRetained<AXUIElement> {
  unsafe { AXUIElement::new_system_wide() }
}

/// Check if accessibility permissions are granted.
/// Returns true if trusted, false otherwise.
pub(super) fn is_process_trusted() -> bool {
  unsafe { AXIsProcessTrusted() }
}
