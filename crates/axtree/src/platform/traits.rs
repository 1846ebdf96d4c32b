/*!
Platform abstraction traits.

These traits define the contract between core code and platform
implementations. Core code only uses these traits - never
platform-specific types directly.
*/

use std::hash::Hash;

use crate::types::{AxTreeResult, ProcessId};

/// Typed value of a single element attribute.
///
/// Replaces the untyped attribute bag of raw accessibility APIs with a
/// tagged union; absence is `None` at the call site.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue<H> {
  /// Text attribute (role, title, value of text fields).
  String(String),
  /// Numeric attribute. Integers are stored as whole f64 values.
  Number(f64),
  /// Boolean attribute (focused, enabled, ...).
  Boolean(bool),
  /// Attribute referencing another element (parent, main window, ...).
  Element(H),
  /// Attribute referencing an ordered sequence of elements.
  Elements(Vec<H>),
}

/// The role/title/children read used by the tree walk.
///
/// A transient snapshot of one element; not a live view.
#[derive(Debug, Clone)]
pub struct ElementAttributes<H> {
  pub role: Option<String>,
  pub title: Option<String>,
  /// Child handles in provider order.
  pub children: Vec<H>,
}

/// Per-element operations. Clone is cheap (reference-counted).
///
/// `Hash`/`Eq` must provide a stable element identity: the tree walk
/// keys its cycle guard on it.
pub trait PlatformHandle: Clone + Send + Sync + Hash + Eq + 'static {
  /// Read role, title and children in one pass.
  ///
  /// A provider failure here is an error and aborts the caller's walk;
  /// merely absent attributes are `None`/empty, not errors.
  fn read(&self) -> AxTreeResult<ElementAttributes<Self>>;

  /// Best-effort read of a single named attribute.
  ///
  /// Never errors: any failure (unsupported attribute, provider error,
  /// invalid element, untranslatable value) normalizes to `None`.
  fn attribute(&self, name: &str) -> Option<AttrValue<Self>>;
}

/// Platform-global operations.
pub trait Provider: Send + Sync + 'static {
  /// Element handle type for this platform.
  type Handle: PlatformHandle;

  /// Live accessibility permission probe. Never cached: every call
  /// reflects the current OS state.
  fn is_trusted(&self) -> bool;

  /// Root element of the desktop session.
  fn system_wide(&self) -> AxTreeResult<Self::Handle>;

  /// Main window element of an application. Pure delegation.
  fn app_main_window(&self, pid: ProcessId) -> AxTreeResult<Self::Handle>;

  /// Deep-link into the OS accessibility privacy settings pane.
  fn open_privacy_settings(&self) -> AxTreeResult<()>;
}
