//! Draggable sweeps and the timing contract that drives axis re-checks.

pub mod rescale_schedule;
pub mod sweep;

pub use rescale_schedule::RescaleSchedule;
pub use sweep::{Sweep, SweepEvent, SweepId, SweepSet};
