//! User interface
//!
//! Only the debug panel; the 3D view itself is driven by the orbit camera.

mod debug_panel;

pub use debug_panel::{DebugAction, DebugButton, DebugPanel, SpawnCounters};
