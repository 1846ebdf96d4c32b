/*! Opaque platform handles with safe accessor methods.

All platform-specific unsafe code is encapsulated here.
The rest of the crate interacts with elements through safe methods.
*/

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::ffi::c_void;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;

use objc2_application_services::{AXError, AXUIElement};
use objc2_core_foundation::{CFArray, CFBoolean, CFHash, CFNumber, CFRetained, CFString, CFType};

use crate::platform::traits::{AttrValue, ElementAttributes, PlatformHandle};
use crate::types::{AxTreeError, AxTreeResult};

// FFI binding for CFEqual (not exposed by objc2-core-foundation)
extern "C" {
  fn CFEqual(cf1: *const c_void, cf2: *const c_void) -> u8;
}

/// Opaque handle to a UI element. Clone is cheap (reference counted).
#[derive(Clone)]
pub struct ElementHandle {
  inner: CFRetained<AXUIElement>,
  /// Cached `CFHash` for fast `HashMap` operations (computed once at construction)
  cached_hash: u64,
}

impl ElementHandle {
  pub(super) fn new(element: CFRetained<AXUIElement>) -> Self {
    let cached_hash = CFHash(Some(&*element)) as u64;
    Self {
      inner: element,
      cached_hash,
    }
  }

  /// Compare with another handle using `CFEqual` (local, no IPC).
  fn cf_equal(&self, other: &Self) -> bool {
    // IMPORTANT: Use as_ptr() to get the actual CF pointer, not a pointer to the wrapper struct.
    let self_ptr = CFRetained::as_ptr(&self.inner).as_ptr().cast::<c_void>();
    let other_ptr = CFRetained::as_ptr(&other.inner).as_ptr().cast::<c_void>();
    unsafe { CFEqual(self_ptr, other_ptr) != 0 }
  }

  /// Get an element-valued attribute (returns another `ElementHandle`).
  pub(super) fn get_element(&self, attr: &str) -> Option<ElementHandle> {
    let value = self.get_raw_attr(&CFString::from_str(attr))?;
    let element = value.downcast::<AXUIElement>().ok()?;
    Some(ElementHandle::new(element))
  }

  /// Best-effort raw attribute read. Errors and absent values are `None`.
  fn get_raw_attr(&self, attr: &CFString) -> Option<CFRetained<CFType>> {
    self.try_raw_attr(attr).ok().flatten()
  }

  /// Raw attribute read that distinguishes "absent" from "failed".
  ///
  /// `AttributeUnsupported`/`NoValue` are normal absence; any other
  /// error code is a provider failure and surfaces as `Err`.
  fn try_raw_attr(&self, attr: &CFString) -> Result<Option<CFRetained<CFType>>, AXError> {
    unsafe {
      let mut value: *const CFType = std::ptr::null();
      let Some(out) = NonNull::new(&raw mut value) else {
        return Ok(None);
      };
      let result = self.inner.copy_attribute_value(attr, out);
      match result {
        AXError::Success => {
          if value.is_null() {
            return Ok(None);
          }
          Ok(Some(CFRetained::from_raw(NonNull::new_unchecked(
            value.cast_mut(),
          ))))
        }
        AXError::AttributeUnsupported | AXError::NoValue => Ok(None),
        _ => Err(result),
      }
    }
  }

  fn parse_str(value: &CFType) -> Option<String> {
    let s = value.downcast_ref::<CFString>()?.to_string();
    if s.is_empty() {
      None
    } else {
      Some(s)
    }
  }

  fn children_from(value: CFRetained<CFType>) -> Vec<ElementHandle> {
    let Ok(array) = value.downcast::<CFArray>() else {
      // Not a proper sequence: treat as no children.
      return Vec::new();
    };
    // SAFETY: AXChildren always returns an array of AXUIElements
    let typed_array: CFRetained<CFArray<AXUIElement>> =
      unsafe { CFRetained::cast_unchecked(array) };

    let len = typed_array.len();
    let mut children = Vec::with_capacity(len);
    for i in 0..len {
      if let Some(child) = typed_array.get(i) {
        children.push(ElementHandle::new(child));
      }
    }
    children
  }

  fn read_attr(&self, name: &'static str) -> AxTreeResult<Option<CFRetained<CFType>>> {
    self
      .try_raw_attr(&CFString::from_static_str(name))
      .map_err(|e| AxTreeError::AttributeRead {
        reason: format!("{name}: {e:?}"),
      })
  }
}

impl PlatformHandle for ElementHandle {
  fn read(&self) -> AxTreeResult<ElementAttributes<Self>> {
    let role = self.read_attr("AXRole")?.as_deref().and_then(Self::parse_str);
    let title = self
      .read_attr("AXTitle")?
      .as_deref()
      .and_then(Self::parse_str);
    let children = self
      .read_attr("AXChildren")?
      .map_or_else(Vec::new, Self::children_from);

    Ok(ElementAttributes {
      role,
      title,
      children,
    })
  }

  fn attribute(&self, name: &str) -> Option<AttrValue<Self>> {
    let value = self.get_raw_attr(&CFString::from_str(name))?;

    if let Some(s) = value.downcast_ref::<CFString>() {
      return Some(AttrValue::String(s.to_string()));
    }
    if let Some(b) = value.downcast_ref::<CFBoolean>() {
      return Some(AttrValue::Boolean(b.as_bool()));
    }
    if let Some(n) = value.downcast_ref::<CFNumber>() {
      return n.as_f64().map(AttrValue::Number);
    }
    if value.downcast_ref::<AXUIElement>().is_some() {
      let element = value.downcast::<AXUIElement>().ok()?;
      return Some(AttrValue::Element(ElementHandle::new(element)));
    }
    if value.downcast_ref::<CFArray>().is_some() {
      let array = value.downcast::<CFArray>().ok()?;
      // CF arrays are untyped; surface only homogeneous element arrays.
      let typed: CFRetained<CFArray<CFType>> = unsafe { CFRetained::cast_unchecked(array) };
      let len = typed.len();
      let mut elements = Vec::with_capacity(len);
      for i in 0..len {
        let item = typed.get(i)?;
        let element = item.downcast::<AXUIElement>().ok()?;
        elements.push(ElementHandle::new(element));
      }
      return Some(AttrValue::Elements(elements));
    }

    None
  }
}

impl Hash for ElementHandle {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.cached_hash.hash(state);
  }
}

impl PartialEq for ElementHandle {
  fn eq(&self, other: &Self) -> bool {
    if self.cached_hash != other.cached_hash {
      return false;
    }
    self.cf_equal(other)
  }
}

impl Eq for ElementHandle {}

unsafe impl Send for ElementHandle {}
unsafe impl Sync for ElementHandle {}

impl std::fmt::Debug for ElementHandle {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ElementHandle")
      .field("cached_hash", &self.cached_hash)
      .finish_non_exhaustive()
  }
}
