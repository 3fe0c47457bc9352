pub mod base;
pub mod context_menu;
pub mod measure;

pub use base::MapPlugin;
pub use context_menu::{ContextAction, ContextMenu, MenuTarget};
pub use measure::{Ruler, RulerReadout};
