/*!
`axtree` - Accessibility Tree Inspector

```ignore
use axtree::Inspector;

let inspector = Inspector::new();

// Permission gate: checking never opens the settings pane.
if !inspector.check_permission() {
  inspector.request_permission();
}

// Snapshot the accessibility tree from the system-wide root.
let tree = inspector.element_tree()?;
println!("{} ({})", tree.title, tree.role);

// Enumerate visible, titled windows.
for window in inspector.window_list()? {
  println!("{} [{}] {}", window.process_id, window.app_name, window.title);
}

// Forwarded diagnostics for a presentation layer.
let mut logs = inspector.subscribe_logs();
while let Ok(event) = logs.recv().await {
  // render event
}
```
*/

mod diagnostics;
mod inspector;
mod permission;
mod platform;
mod tree;
mod window_list;

mod types;
pub use types::*;

pub use crate::diagnostics::LogChannel;
pub use crate::inspector::Inspector;
pub use crate::permission::{check_accessibility_permission, request_accessibility_permission};
pub use crate::platform::{
  AttrValue, DefaultProvider, ElementAttributes, PlatformHandle, Provider,
};
pub use crate::tree::{element_tree, TreeConfig, UNKNOWN_ROLE, UNTITLED};
pub use crate::window_list::{window_list, ScriptError, DEFAULT_SCRIPT_TIMEOUT};
