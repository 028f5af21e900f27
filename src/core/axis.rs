use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::types::{AxisAdjust, AxisLabel};

/// Bidirectional transform between a domain value and a pixel coordinate.
///
/// Conversions are only meaningful once a positive size is set and the bounds
/// are distinct. Outside that state they return `0.0` (points) or the domain
/// minimum (values) instead of propagating NaN into draw calls.
pub trait ChartAxis: Debug {
    /// Returns `true` when the stored bounds changed.
    fn set_bounds(&mut self, min: i64, max: i64) -> bool;
    /// Returns `true` when the stored pixel size changed.
    fn set_size(&mut self, size: f64) -> bool;
    fn bounds(&self) -> (i64, i64);
    fn size(&self) -> f64;
    fn convert_to_point(&self, value: i64) -> f64;
    fn convert_to_value(&self, point: f64) -> i64;
    /// Pixel positions of tick marks, recomputed from the current bounds.
    fn tick_points(&self) -> Vec<f64>;
    fn build_label(&self, value: i64) -> AxisLabel;
    fn should_adjust_axis(&self, value: i64) -> AxisAdjust;

    /// `true` until a positive size and two distinct bounds are set.
    fn is_degenerate(&self) -> bool {
        let (min, max) = self.bounds();
        self.size() <= 0.0 || min == max
    }
}

impl<A: ChartAxis + ?Sized> ChartAxis for Box<A> {
    fn set_bounds(&mut self, min: i64, max: i64) -> bool {
        (**self).set_bounds(min, max)
    }

    fn set_size(&mut self, size: f64) -> bool {
        (**self).set_size(size)
    }

    fn bounds(&self) -> (i64, i64) {
        (**self).bounds()
    }

    fn size(&self) -> f64 {
        (**self).size()
    }

    fn convert_to_point(&self, value: i64) -> f64 {
        (**self).convert_to_point(value)
    }

    fn convert_to_value(&self, point: f64) -> i64 {
        (**self).convert_to_value(point)
    }

    fn tick_points(&self) -> Vec<f64> {
        (**self).tick_points()
    }

    fn build_label(&self, value: i64) -> AxisLabel {
        (**self).build_label(value)
    }

    fn should_adjust_axis(&self, value: i64) -> AxisAdjust {
        (**self).should_adjust_axis(value)
    }
}

/// Domain bounds and pixel extent shared by every concrete axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AxisState {
    domain_min: i64,
    domain_max: i64,
    pixel_size: f64,
}

impl AxisState {
    #[must_use]
    pub fn new(domain_min: i64, domain_max: i64) -> Self {
        Self {
            domain_min,
            domain_max,
            pixel_size: 0.0,
        }
    }

    pub fn set_bounds(&mut self, min: i64, max: i64) -> bool {
        if self.domain_min == min && self.domain_max == max {
            return false;
        }
        self.domain_min = min;
        self.domain_max = max;
        true
    }

    /// Rejects negative or non-finite sizes, leaving the stored size untouched.
    pub fn set_size(&mut self, size: f64) -> bool {
        if !size.is_finite() || size < 0.0 {
            warn!(size, "ignoring invalid axis pixel size");
            return false;
        }
        if self.pixel_size == size {
            return false;
        }
        self.pixel_size = size;
        true
    }

    #[must_use]
    pub fn bounds(self) -> (i64, i64) {
        (self.domain_min, self.domain_max)
    }

    #[must_use]
    pub fn min(self) -> i64 {
        self.domain_min
    }

    #[must_use]
    pub fn max(self) -> i64 {
        self.domain_max
    }

    #[must_use]
    pub fn size(self) -> f64 {
        self.pixel_size
    }

    /// Domain span as `f64`; computed in `i128` so extreme bounds cannot overflow.
    #[must_use]
    pub fn span(self) -> f64 {
        (i128::from(self.domain_max) - i128::from(self.domain_min)) as f64
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.pixel_size <= 0.0 || self.domain_max == self.domain_min
    }

    /// Fraction of the domain covered by `value`, `None` when degenerate.
    #[must_use]
    pub fn normalize(self, value: i64) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }
        let offset = (i128::from(value) - i128::from(self.domain_min)) as f64;
        Some(offset / self.span())
    }

    /// Maps a fraction of the domain back to a domain value.
    #[must_use]
    pub fn denormalize(self, fraction: f64) -> i64 {
        if !fraction.is_finite() {
            return self.domain_min;
        }
        let value = self.domain_min as f64 + fraction * self.span();
        saturating_round(value)
    }

    #[must_use]
    pub fn linear_point(self, value: i64) -> f64 {
        match self.normalize(value) {
            Some(fraction) => finite_or_zero(fraction * self.pixel_size),
            None => 0.0,
        }
    }

    #[must_use]
    pub fn linear_value(self, point: f64) -> i64 {
        if self.is_degenerate() || !point.is_finite() {
            return self.domain_min;
        }
        self.denormalize(point / self.pixel_size)
    }
}

/// Which of the controller's two axes a marker follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisSlot {
    Horizontal,
    Vertical,
}

/// Resolves an [`AxisSlot`] to the axis currently filling it.
pub trait AxisLookup {
    fn axis(&self, slot: AxisSlot) -> &dyn ChartAxis;
}

#[must_use]
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[must_use]
pub(crate) fn saturating_round(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = value.round();
    if rounded >= i64::MAX as f64 {
        i64::MAX
    } else if rounded <= i64::MIN as f64 {
        i64::MIN
    } else {
        rounded as i64
    }
}
