//! The console's two timers: state polling and manual motor commands.

pub mod manual;
pub mod polling;

pub use manual::{differential, ManualControlLoop};
pub use polling::PollingSyncLoop;
