use crate::core::axis::ChartAxis;
use crate::core::types::{AxisAdjust, AxisLabel};

/// Flips the pixel coordinate of any axis so it grows from the far edge.
///
/// Used for magnitude axes drawn upward from a bottom baseline. Domain logic,
/// labels and adjust hints are delegated to the wrapped axis untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvertedAxis<A> {
    inner: A,
}

impl<A: ChartAxis> InvertedAxis<A> {
    #[must_use]
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn inner(&self) -> &A {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: ChartAxis> ChartAxis for InvertedAxis<A> {
    fn set_bounds(&mut self, min: i64, max: i64) -> bool {
        self.inner.set_bounds(min, max)
    }

    fn set_size(&mut self, size: f64) -> bool {
        self.inner.set_size(size)
    }

    fn bounds(&self) -> (i64, i64) {
        self.inner.bounds()
    }

    fn size(&self) -> f64 {
        self.inner.size()
    }

    fn convert_to_point(&self, value: i64) -> f64 {
        self.inner.size() - self.inner.convert_to_point(value)
    }

    fn convert_to_value(&self, point: f64) -> i64 {
        self.inner.convert_to_value(self.inner.size() - point)
    }

    fn tick_points(&self) -> Vec<f64> {
        let size = self.inner.size();
        self.inner
            .tick_points()
            .into_iter()
            .map(|point| size - point)
            .collect()
    }

    fn build_label(&self, value: i64) -> AxisLabel {
        self.inner.build_label(value)
    }

    fn should_adjust_axis(&self, value: i64) -> AxisAdjust {
        self.inner.should_adjust_axis(value)
    }
}
