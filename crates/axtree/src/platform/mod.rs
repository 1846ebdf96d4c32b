/*!
Platform layer.

The provider is an injected dependency: core code only talks to the
`Provider`/`PlatformHandle` traits, and tests substitute an in-memory
fake without touching any platform loading path. The macOS
implementation binds the `AXUIElement` API at compile time; every other
platform gets a stub that reports accessibility as unavailable.
*/

mod traits;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(target_os = "macos"))]
mod unsupported;

#[cfg(test)]
pub(crate) mod mock;

pub use traits::{AttrValue, ElementAttributes, PlatformHandle, Provider};

#[cfg(target_os = "macos")]
pub use macos::{ElementHandle, MacosProvider, MacosProvider as DefaultProvider};
#[cfg(not(target_os = "macos"))]
pub use unsupported::{NeverHandle, UnsupportedProvider, UnsupportedProvider as DefaultProvider};
