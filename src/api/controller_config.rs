use std::time::Duration;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::core::{DAY_IN_MILLIS, MB_IN_BYTES, MagnitudeScaleMode, TimeAxisConfig};
use crate::error::{ChartError, ChartResult};

/// Valid range installed on the two inspection sweeps by `set_visible_range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SweepRangePolicy {
    /// Sweeps may travel across the whole visible window, past the data edges.
    #[default]
    VisibleWindow,
    /// Sweeps stay inside the known history when it is narrower than the window.
    HistoryClamped,
}

/// Public controller bootstrap configuration.
///
/// Serializable so hosts can persist chart setup alongside their own state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartControllerConfig {
    #[serde(default)]
    pub time_axis: TimeAxisConfig,
    #[serde(default)]
    pub magnitude_mode: MagnitudeScaleMode,
    /// Lowest ceiling the magnitude axis may shrink to.
    #[serde(default = "default_vertical_floor")]
    pub vertical_floor: i64,
    #[serde(default = "default_rescale_cadence_ms")]
    pub rescale_cadence_ms: u64,
    #[serde(default)]
    pub sweep_range_policy: SweepRangePolicy,
    #[serde(default)]
    pub average_sweep_draggable: bool,
    #[serde(default = "default_bar_width_ms")]
    pub bar_width_ms: i64,
}

impl Default for ChartControllerConfig {
    fn default() -> Self {
        Self {
            time_axis: TimeAxisConfig::default(),
            magnitude_mode: MagnitudeScaleMode::default(),
            vertical_floor: default_vertical_floor(),
            rescale_cadence_ms: default_rescale_cadence_ms(),
            sweep_range_policy: SweepRangePolicy::default(),
            average_sweep_draggable: false,
            bar_width_ms: default_bar_width_ms(),
        }
    }
}

impl ChartControllerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_first_day_of_week(mut self, day: Weekday) -> Self {
        self.time_axis.first_day_of_week = day;
        self
    }

    #[must_use]
    pub fn with_utc_offset_seconds(mut self, seconds: i32) -> Self {
        self.time_axis.utc_offset_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_magnitude_mode(mut self, mode: MagnitudeScaleMode) -> Self {
        self.magnitude_mode = mode;
        self
    }

    #[must_use]
    pub fn with_vertical_floor(mut self, floor: i64) -> Self {
        self.vertical_floor = floor;
        self
    }

    #[must_use]
    pub fn with_rescale_cadence_ms(mut self, cadence_ms: u64) -> Self {
        self.rescale_cadence_ms = cadence_ms;
        self
    }

    #[must_use]
    pub fn with_sweep_range_policy(mut self, policy: SweepRangePolicy) -> Self {
        self.sweep_range_policy = policy;
        self
    }

    /// Lets the average reference sweep follow drag input.
    #[must_use]
    pub fn with_average_sweep_draggable(mut self, draggable: bool) -> Self {
        self.average_sweep_draggable = draggable;
        self
    }

    #[must_use]
    pub fn with_bar_width_ms(mut self, width_ms: i64) -> Self {
        self.bar_width_ms = width_ms;
        self
    }

    #[must_use]
    pub fn rescale_cadence(self) -> Duration {
        Duration::from_millis(self.rescale_cadence_ms)
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.time_axis.validate()?;
        if self.vertical_floor <= 0 {
            return Err(ChartError::InvalidData(
                "vertical floor must be > 0".to_owned(),
            ));
        }
        if self.rescale_cadence_ms == 0 {
            return Err(ChartError::InvalidData(
                "rescale cadence must be > 0".to_owned(),
            ));
        }
        if self.bar_width_ms <= 0 {
            return Err(ChartError::InvalidData(
                "bar width must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize controller config: {e}"))
        })
    }

    /// Parses and validates a config; absent fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse controller config: {e}"))
        })?;
        config.validate()
    }
}

fn default_vertical_floor() -> i64 {
    MB_IN_BYTES
}

fn default_rescale_cadence_ms() -> u64 {
    250
}

fn default_bar_width_ms() -> i64 {
    DAY_IN_MILLIS / 2
}
