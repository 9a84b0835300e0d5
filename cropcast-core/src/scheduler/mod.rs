//! Interval scheduler
//!
//! Decides which periodic tasks are due on each pass of the control loop.

pub mod executor;
pub mod timer;

pub use executor::{Due, Scheduler};
pub use timer::IntervalTimer;
