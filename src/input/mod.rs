pub mod easing;
pub mod events;
pub mod joystick;

// Re-export the essential types
pub use easing::Easing;
pub use events::{InputEvent, MapEvent, TouchEventType, TouchPoint};
pub use joystick::{AxisMode, DragArea, DragSession, JoystickSignal, PointerDragInput};
