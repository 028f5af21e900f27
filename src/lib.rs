//! usage-chart: non-visual engine for interactive data-usage charts.
//!
//! The crate covers what a renderer needs to draw a usage bar chart with two
//! draggable inspection sweeps: coordinate transforms and ticks (`core`),
//! an ordered usage series (`core::TimeSeries`), the sweep constraint engine
//! (`interaction`) and the orchestrating controller with its auto-rescale
//! policy (`api`). Drawing itself stays with the host.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{ChartController, ChartControllerConfig};
pub use error::{ChartError, ChartResult};
