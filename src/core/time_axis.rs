use chrono::{FixedOffset, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::axis::{AxisState, ChartAxis};
use crate::core::primitives::{millis_to_local, start_of_week};
use crate::core::types::{AxisAdjust, AxisLabel};
use crate::error::{ChartError, ChartResult};

pub const DAY_IN_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Most ticks a single call emits, newest first; about twenty years of weeks.
pub const MAX_TIME_TICKS: usize = 1024;

/// strftime pattern used for time labels.
pub const TIME_LABEL_PATTERN: &str = "%b %d";

/// Calendar settings for tick alignment and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAxisConfig {
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: Weekday,
    #[serde(default)]
    pub utc_offset_seconds: i32,
}

impl Default for TimeAxisConfig {
    fn default() -> Self {
        Self {
            first_day_of_week: default_first_day_of_week(),
            utc_offset_seconds: 0,
        }
    }
}

impl TimeAxisConfig {
    pub fn validate(self) -> ChartResult<Self> {
        self.offset()?;
        Ok(self)
    }

    pub fn offset(self) -> ChartResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_seconds).ok_or_else(|| {
            ChartError::InvalidData(format!(
                "utc offset must be within +/-24h, got {}s",
                self.utc_offset_seconds
            ))
        })
    }
}

fn default_first_day_of_week() -> Weekday {
    Weekday::Sun
}

/// Linear time axis with one tick per week boundary.
///
/// Never requests auto-rescaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    state: AxisState,
    first_day_of_week: Weekday,
    offset: FixedOffset,
}

impl TimeAxis {
    pub fn new(config: TimeAxisConfig) -> ChartResult<Self> {
        let offset = config.offset()?;
        Ok(Self {
            state: AxisState::default(),
            first_day_of_week: config.first_day_of_week,
            offset,
        })
    }

    #[must_use]
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    /// Epoch-millisecond week boundaries inside the current bounds, newest first.
    ///
    /// Stops after [`MAX_TIME_TICKS`] boundaries.
    #[must_use]
    pub fn tick_values(&self) -> SmallVec<[i64; 8]> {
        let (min, max) = self.state.bounds();
        let mut ticks = SmallVec::new();
        if max < min {
            return ticks;
        }

        let Some(mut boundary) =
            millis_to_local(max, self.offset).and_then(|t| start_of_week(t, self.first_day_of_week))
        else {
            return ticks;
        };

        loop {
            let millis = boundary.timestamp_millis();
            if millis < min {
                break;
            }
            if millis <= max {
                ticks.push(millis);
                if ticks.len() == MAX_TIME_TICKS {
                    break;
                }
            }
            match boundary.checked_sub_signed(TimeDelta::days(7)) {
                Some(previous) => boundary = previous,
                None => break,
            }
        }
        ticks
    }
}

impl ChartAxis for TimeAxis {
    fn set_bounds(&mut self, min: i64, max: i64) -> bool {
        self.state.set_bounds(min, max)
    }

    fn set_size(&mut self, size: f64) -> bool {
        self.state.set_size(size)
    }

    fn bounds(&self) -> (i64, i64) {
        self.state.bounds()
    }

    fn size(&self) -> f64 {
        self.state.size()
    }

    fn convert_to_point(&self, value: i64) -> f64 {
        self.state.linear_point(value)
    }

    fn convert_to_value(&self, point: f64) -> i64 {
        self.state.linear_value(point)
    }

    fn tick_points(&self) -> Vec<f64> {
        self.tick_values()
            .into_iter()
            .map(|millis| self.convert_to_point(millis))
            .collect()
    }

    fn build_label(&self, value: i64) -> AxisLabel {
        let text = millis_to_local(value, self.offset)
            .map(|time| time.format(TIME_LABEL_PATTERN).to_string())
            .unwrap_or_default();
        AxisLabel::new(text, value)
    }

    fn should_adjust_axis(&self, _value: i64) -> AxisAdjust {
        AxisAdjust::Hold
    }
}
