//! View seams and the small amount of presentation logic the console owns.

pub mod controls;
pub mod progress;
pub mod traits;

pub use controls::{Affordances, PoseReadout};
pub use progress::ProgressTracker;
pub use traits::{ControlView, LogView, MapView, ProgressView, Prompt};

#[cfg(test)]
pub(crate) mod testing;
