use serde::{Deserialize, Serialize};

use crate::core::axis::{AxisState, ChartAxis, finite_or_zero};
use crate::core::types::{AxisAdjust, AxisLabel};

pub const KB_IN_BYTES: i64 = 1024;
pub const MB_IN_BYTES: i64 = KB_IN_BYTES * 1024;
pub const GB_IN_BYTES: i64 = MB_IN_BYTES * 1024;

/// Roughly this many ticks fit on screen.
const TARGET_TICK_COUNT: i64 = 8;

const LOW_EDGE_RATIO: f64 = 0.10;
const HIGH_EDGE_RATIO: f64 = 0.85;

// Empirical power-law fit that spreads small values over more pixels.
const LOG_FORWARD_EXPONENT: f64 = 0.368_843_431_061_751_2;
const LOG_FORWARD_INTERCEPT: f64 = -0.043_281_994_520_182_53;
const LOG_INVERSE_FACTOR: f64 = 1.310_222_847_608_905_7;
const LOG_INVERSE_EXPONENT: f64 = 2.711_177_469_316_463;

/// Mapping mode used by the magnitude axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MagnitudeScaleMode {
    #[default]
    Linear,
    /// Curve-fitted transform that favors small values.
    LogWeighted,
}

/// Byte-count axis with power-of-two tick spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeAxis {
    state: AxisState,
    mode: MagnitudeScaleMode,
}

impl MagnitudeAxis {
    #[must_use]
    pub fn new(mode: MagnitudeScaleMode) -> Self {
        Self {
            state: AxisState::default(),
            mode,
        }
    }

    #[must_use]
    pub fn mode(&self) -> MagnitudeScaleMode {
        self.mode
    }

    /// Domain distance between consecutive ticks.
    #[must_use]
    pub fn tick_step(&self) -> i64 {
        round_up_to_power_of_two(self.range() / TARGET_TICK_COUNT)
    }

    /// Domain values of the tick marks, ascending from the minimum.
    #[must_use]
    pub fn tick_values(&self) -> Vec<i64> {
        let range = self.range();
        let step = self.tick_step();
        let min = self.state.min();

        let mut ticks = Vec::new();
        let mut offset: i64 = 0;
        while offset < range {
            ticks.push(min.saturating_add(offset));
            match offset.checked_add(step) {
                Some(next) => offset = next,
                None => break,
            }
        }
        ticks
    }

    fn range(&self) -> i64 {
        let (min, max) = self.state.bounds();
        max.saturating_sub(min)
    }
}

impl ChartAxis for MagnitudeAxis {
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
        match self.mode {
            MagnitudeScaleMode::Linear => self.state.linear_point(value),
            MagnitudeScaleMode::LogWeighted => {
                let Some(normalized) = self.state.normalize(value) else {
                    return 0.0;
                };
                let fraction =
                    10f64.powf(LOG_FORWARD_EXPONENT * normalized.log10() + LOG_FORWARD_INTERCEPT);
                finite_or_zero(fraction * self.state.size())
            }
        }
    }

    fn convert_to_value(&self, point: f64) -> i64 {
        match self.mode {
            MagnitudeScaleMode::Linear => self.state.linear_value(point),
            MagnitudeScaleMode::LogWeighted => {
                if self.state.is_degenerate() || !point.is_finite() {
                    return self.state.min();
                }
                let normalized = point / self.state.size();
                let fraction = LOG_INVERSE_FACTOR * normalized.powf(LOG_INVERSE_EXPONENT);
                self.state.denormalize(fraction)
            }
        }
    }

    fn tick_points(&self) -> Vec<f64> {
        self.tick_values()
            .into_iter()
            .map(|value| self.convert_to_point(value))
            .collect()
    }

    fn build_label(&self, value: i64) -> AxisLabel {
        build_byte_label(value)
    }

    fn should_adjust_axis(&self, value: i64) -> AxisAdjust {
        let point = self.convert_to_point(value);
        let size = self.state.size();
        if point < size * LOW_EDGE_RATIO {
            AxisAdjust::Shrink
        } else if point > size * HIGH_EDGE_RATIO {
            AxisAdjust::Grow
        } else {
            AxisAdjust::Hold
        }
    }
}

/// Formats a byte count as `MB` below 1000 MB and `GB` above, one decimal under 10.
#[must_use]
pub fn build_byte_label(value: i64) -> AxisLabel {
    let (unit, factor) = if value < 1000 * MB_IN_BYTES {
        ("MB", MB_IN_BYTES)
    } else {
        ("GB", GB_IN_BYTES)
    };

    let result = value as f64 / factor as f64;
    let (size, rounded) = if result < 10.0 {
        let tenths = (result * 10.0).round() as i64;
        (format!("{result:.1}"), factor.saturating_mul(tenths) / 10)
    } else {
        (
            format!("{result:.0}"),
            factor.saturating_mul(result.round() as i64),
        )
    };

    AxisLabel::new(format!("{size} {unit}"), rounded)
}

/// Smallest power of two `>= value`; `1` for non-positive input, `i64::MAX` on overflow.
#[must_use]
pub fn round_up_to_power_of_two(value: i64) -> i64 {
    if value <= 1 {
        return 1;
    }
    (value as u64)
        .checked_next_power_of_two()
        .and_then(|power| i64::try_from(power).ok())
        .unwrap_or(i64::MAX)
}
