mod chart_controller;
mod controller_config;
mod selection;

pub use chart_controller::{ChartAxes, ChartController};
pub use controller_config::{ChartControllerConfig, SweepRangePolicy};
pub use selection::{InspectSummary, SelectionListener};
