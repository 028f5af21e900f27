use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::primitives::clamp_pinned;
use crate::core::{AxisAdjust, AxisLabel, AxisLookup, AxisSlot};
use crate::error::{ChartError, ChartResult};

/// Handle of a sweep inside its owning [`SweepSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SweepId(usize);

impl SweepId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Emitted for every drag-derived value change.
///
/// `done == false` while the pointer is still moving, `true` once on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepEvent {
    pub sweep: SweepId,
    pub value: i64,
    pub done: bool,
}

/// One draggable boundary value.
///
/// Neighbors are lookups into the owning set, never owned sweeps. Clamping
/// against them is done through [`Sweep::clamp`] with the neighbor values
/// resolved by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    value: i64,
    /// Last pixel position set by a drag; `None` means "derived from value".
    position: Option<f64>,
    valid_min: i64,
    valid_max: i64,
    left_neighbor: Option<SweepId>,
    right_neighbor: Option<SweepId>,
    axis: Option<AxisSlot>,
    label_template: Option<String>,
    visible: bool,
    draggable: bool,
    dragging: bool,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            value: 0,
            position: None,
            valid_min: i64::MIN,
            valid_max: i64::MAX,
            left_neighbor: None,
            right_neighbor: None,
            axis: None,
            label_template: None,
            visible: true,
            draggable: true,
            dragging: false,
        }
    }
}

impl Sweep {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_axis(mut self, slot: AxisSlot) -> Self {
        self.axis = Some(slot);
        self
    }

    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Binds the sweep to the axis it follows; drag input is rejected until then.
    pub fn init(&mut self, slot: AxisSlot) {
        self.axis = Some(slot);
    }

    #[must_use]
    pub fn axis(&self) -> Option<AxisSlot> {
        self.axis
    }

    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Sets the value without clamping and drops any drag-derived position.
    pub fn set_value(&mut self, value: i64) {
        self.value = value;
        self.position = None;
    }

    #[must_use]
    pub fn position(&self) -> Option<f64> {
        self.position
    }

    pub fn set_valid_range(&mut self, min: i64, max: i64) {
        self.valid_min = min;
        self.valid_max = max;
    }

    #[must_use]
    pub fn valid_range(&self) -> (i64, i64) {
        (self.valid_min, self.valid_max)
    }

    pub fn set_valid_range_dynamic(&mut self, left: Option<SweepId>, right: Option<SweepId>) {
        self.left_neighbor = left;
        self.right_neighbor = right;
    }

    #[must_use]
    pub fn neighbors(&self) -> (Option<SweepId>, Option<SweepId>) {
        (self.left_neighbor, self.right_neighbor)
    }

    /// Static range narrowed by the current neighbor values.
    #[must_use]
    pub fn effective_range(&self, left_value: Option<i64>, right_value: Option<i64>) -> (i64, i64) {
        let min = left_value.map_or(self.valid_min, |left| self.valid_min.max(left));
        let max = right_value.map_or(self.valid_max, |right| self.valid_max.min(right));
        (min, max)
    }

    /// Clamps into the effective range; an empty range pins to its minimum.
    #[must_use]
    pub fn clamp(&self, candidate: i64, left_value: Option<i64>, right_value: Option<i64>) -> i64 {
        let (min, max) = self.effective_range(left_value, right_value);
        clamp_pinned(candidate, min, max)
    }

    #[must_use]
    pub fn label_template(&self) -> Option<&str> {
        self.label_template.as_deref()
    }

    pub fn set_label_template(&mut self, template: impl Into<String>) {
        self.label_template = Some(template.into());
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

/// Cooperating sweeps of one chart.
///
/// Two sweeps installed with symmetric dynamic ranges (`left -> right` and
/// `right -> left`) never cross under drag input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SweepSet {
    sweeps: Vec<Sweep>,
}

impl SweepSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sweep: Sweep) -> SweepId {
        self.sweeps.push(sweep);
        SweepId(self.sweeps.len() - 1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sweeps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sweeps.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: SweepId) -> Option<&Sweep> {
        self.sweeps.get(id.0)
    }

    pub fn get_mut(&mut self, id: SweepId) -> Option<&mut Sweep> {
        self.sweeps.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SweepId, &Sweep)> + '_ {
        self.sweeps
            .iter()
            .enumerate()
            .map(|(index, sweep)| (SweepId(index), sweep))
    }

    #[must_use]
    pub fn value(&self, id: SweepId) -> Option<i64> {
        self.get(id).map(Sweep::value)
    }

    pub fn set_value(&mut self, id: SweepId, value: i64) -> ChartResult<()> {
        self.sweep_mut(id)?.set_value(value);
        Ok(())
    }

    pub fn set_valid_range(&mut self, id: SweepId, min: i64, max: i64) -> ChartResult<()> {
        self.sweep_mut(id)?.set_valid_range(min, max);
        Ok(())
    }

    /// Installs neighbor lookups; neighbors must exist and differ from `id`.
    pub fn set_valid_range_dynamic(
        &mut self,
        id: SweepId,
        left: Option<SweepId>,
        right: Option<SweepId>,
    ) -> ChartResult<()> {
        for neighbor in [left, right].into_iter().flatten() {
            if neighbor == id {
                return Err(ChartError::InvalidData(format!(
                    "sweep {} cannot be its own neighbor",
                    id.0
                )));
            }
            self.sweep(neighbor)?;
        }
        self.sweep_mut(id)?.set_valid_range_dynamic(left, right);
        Ok(())
    }

    pub fn effective_range(&self, id: SweepId) -> ChartResult<(i64, i64)> {
        let sweep = self.sweep(id)?;
        let (left, right) = self.neighbor_values(sweep);
        Ok(sweep.effective_range(left, right))
    }

    pub fn clamp_value(&self, id: SweepId, candidate: i64) -> ChartResult<i64> {
        let sweep = self.sweep(id)?;
        let (left, right) = self.neighbor_values(sweep);
        Ok(sweep.clamp(candidate, left, right))
    }

    /// Marks the sweep as dragging; its value is left untouched.
    pub fn drag_start(&mut self, id: SweepId) -> ChartResult<()> {
        self.check_drag_target(id)?;
        self.sweep_mut(id)?.dragging = true;
        trace!(sweep = id.0, "sweep drag start");
        Ok(())
    }

    pub fn drag_move(
        &mut self,
        id: SweepId,
        pixel: f64,
        axes: &dyn AxisLookup,
    ) -> ChartResult<SweepEvent> {
        let value = self.apply_drag(id, pixel, axes)?;
        self.sweep_mut(id)?.dragging = true;
        trace!(sweep = id.0, pixel, value, "sweep drag move");
        Ok(SweepEvent {
            sweep: id,
            value,
            done: false,
        })
    }

    pub fn drag_end(
        &mut self,
        id: SweepId,
        pixel: f64,
        axes: &dyn AxisLookup,
    ) -> ChartResult<SweepEvent> {
        let value = self.apply_drag(id, pixel, axes)?;
        self.sweep_mut(id)?.dragging = false;
        trace!(sweep = id.0, pixel, value, "sweep drag end");
        Ok(SweepEvent {
            sweep: id,
            value,
            done: true,
        })
    }

    /// Recomputes the value from the stored pixel position after the axis mapping moved.
    ///
    /// Returns `true` when the value changed.
    pub fn update_value_from_position(
        &mut self,
        id: SweepId,
        axes: &dyn AxisLookup,
    ) -> ChartResult<bool> {
        let sweep = self.sweep(id)?;
        let slot = sweep.axis.ok_or(ChartError::SweepAxisUnbound(id.0))?;
        let Some(position) = sweep.position else {
            return Ok(false);
        };

        let axis = axes.axis(slot);
        let candidate = axis.convert_to_value(position);
        let value = self.clamp_value(id, candidate)?;
        let position = if value == candidate {
            position
        } else {
            axis.convert_to_point(value)
        };

        let sweep = self.sweep_mut(id)?;
        let changed = sweep.value != value;
        sweep.value = value;
        sweep.position = Some(position);
        Ok(changed)
    }

    /// Edge hint of the sweep's axis at its current value.
    #[must_use]
    pub fn should_adjust_axis(&self, id: SweepId, axes: &dyn AxisLookup) -> AxisAdjust {
        self.get(id)
            .and_then(|sweep| {
                sweep
                    .axis
                    .map(|slot| axes.axis(slot).should_adjust_axis(sweep.value))
            })
            .unwrap_or_default()
    }

    /// Pixel position on the bound axis, preferring the drag position.
    #[must_use]
    pub fn position(&self, id: SweepId, axes: &dyn AxisLookup) -> Option<f64> {
        let sweep = self.get(id)?;
        let slot = sweep.axis?;
        Some(
            sweep
                .position
                .unwrap_or_else(|| axes.axis(slot).convert_to_point(sweep.value)),
        )
    }

    #[must_use]
    pub fn label(&self, id: SweepId, axes: &dyn AxisLookup) -> Option<AxisLabel> {
        let sweep = self.get(id)?;
        let slot = sweep.axis?;
        Some(axes.axis(slot).build_label(sweep.value))
    }

    fn apply_drag(&mut self, id: SweepId, pixel: f64, axes: &dyn AxisLookup) -> ChartResult<i64> {
        let slot = self.check_drag_target(id)?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData(
                "drag position must be finite".to_owned(),
            ));
        }

        let axis = axes.axis(slot);
        if axis.is_degenerate() {
            return Err(ChartError::SweepAxisNotReady(id.0));
        }
        let candidate = axis.convert_to_value(pixel);
        let value = self.clamp_value(id, candidate)?;
        let position = if value == candidate {
            pixel
        } else {
            axis.convert_to_point(value)
        };

        let sweep = self.sweep_mut(id)?;
        sweep.value = value;
        sweep.position = Some(position);
        Ok(value)
    }

    fn check_drag_target(&self, id: SweepId) -> ChartResult<AxisSlot> {
        let sweep = self.sweep(id)?;
        if !sweep.draggable {
            return Err(ChartError::SweepLocked(id.0));
        }
        sweep.axis.ok_or(ChartError::SweepAxisUnbound(id.0))
    }

    fn neighbor_values(&self, sweep: &Sweep) -> (Option<i64>, Option<i64>) {
        (
            sweep.left_neighbor.and_then(|n| self.value(n)),
            sweep.right_neighbor.and_then(|n| self.value(n)),
        )
    }

    fn sweep(&self, id: SweepId) -> ChartResult<&Sweep> {
        self.get(id).ok_or(ChartError::UnknownSweep(id.0))
    }

    fn sweep_mut(&mut self, id: SweepId) -> ChartResult<&mut Sweep> {
        self.sweeps
            .get_mut(id.0)
            .ok_or(ChartError::UnknownSweep(id.0))
    }
}
