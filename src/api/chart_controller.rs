use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::core::{
    AxisAdjust, AxisLookup, AxisSlot, BarProjection, ChartAxis, InvertedAxis, MagnitudeAxis,
    TIME_LABEL_PATTERN, TimeAxis, TimeSeries, project_bars,
};
use crate::error::ChartResult;
use crate::interaction::{RescaleSchedule, Sweep, SweepEvent, SweepId, SweepSet};

use super::{ChartControllerConfig, InspectSummary, SelectionListener, SweepRangePolicy};

/// The time axis and the upward-growing magnitude axis of one chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartAxes {
    pub horizontal: TimeAxis,
    pub vertical: InvertedAxis<MagnitudeAxis>,
}

impl AxisLookup for ChartAxes {
    fn axis(&self, slot: AxisSlot) -> &dyn ChartAxis {
        match slot {
            AxisSlot::Horizontal => &self.horizontal,
            AxisSlot::Vertical => &self.vertical,
        }
    }
}

/// Orchestrates axes, data, sweeps and the magnitude auto-rescale policy.
///
/// All calls are synchronous. Hosts forward pointer input through the
/// `drag_*` methods and call [`ChartController::poll_rescale`] from their
/// event loop while a drag is in progress.
pub struct ChartController {
    config: ChartControllerConfig,
    axes: ChartAxes,
    series: Option<TimeSeries>,
    sweeps: SweepSet,
    left: SweepId,
    right: SweepId,
    average: SweepId,
    vertical_max: i64,
    primary_range: (i64, i64),
    rescale: RescaleSchedule,
    listeners: Vec<Box<dyn SelectionListener>>,
}

impl ChartController {
    pub fn new(config: ChartControllerConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let axes = ChartAxes {
            horizontal: TimeAxis::new(config.time_axis)?,
            vertical: InvertedAxis::new(MagnitudeAxis::new(config.magnitude_mode)),
        };

        let mut sweeps = SweepSet::new();
        let left = sweeps.insert(Sweep::new().with_axis(AxisSlot::Horizontal));
        let right = sweeps.insert(Sweep::new().with_axis(AxisSlot::Horizontal));
        let average = sweeps.insert(
            Sweep::new()
                .with_axis(AxisSlot::Vertical)
                .with_draggable(config.average_sweep_draggable)
                .with_visible(false),
        );

        // Keep the inspection sweeps from crossing each other.
        sweeps.set_valid_range_dynamic(left, None, Some(right))?;
        sweeps.set_valid_range_dynamic(right, Some(left), None)?;

        let mut controller = Self {
            config,
            axes,
            series: None,
            sweeps,
            left,
            right,
            average,
            vertical_max: 0,
            primary_range: (0, 0),
            rescale: RescaleSchedule::new(config.rescale_cadence()),
            listeners: Vec::new(),
        };
        controller.recompute_vertical_bounds(None);
        Ok(controller)
    }

    #[must_use]
    pub fn config(&self) -> ChartControllerConfig {
        self.config
    }

    #[must_use]
    pub fn axes(&self) -> &ChartAxes {
        &self.axes
    }

    #[must_use]
    pub fn horizontal_axis(&self) -> &TimeAxis {
        &self.axes.horizontal
    }

    #[must_use]
    pub fn vertical_axis(&self) -> &InvertedAxis<MagnitudeAxis> {
        &self.axes.vertical
    }

    /// Applies the viewport size to both axes; `true` when either changed.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) -> bool {
        let horizontal = self.axes.horizontal.set_size(width);
        let vertical = self.axes.vertical.set_size(height);
        horizontal || vertical
    }

    #[must_use]
    pub fn sweeps(&self) -> &SweepSet {
        &self.sweeps
    }

    #[must_use]
    pub fn left_sweep(&self) -> SweepId {
        self.left
    }

    #[must_use]
    pub fn right_sweep(&self) -> SweepId {
        self.right
    }

    #[must_use]
    pub fn average_sweep(&self) -> SweepId {
        self.average
    }

    pub fn add_selection_listener(&mut self, listener: Box<dyn SelectionListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_selection_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Attaches data and shows the average sweep at the series mean.
    pub fn bind_data(&mut self, series: TimeSeries) {
        let average = series.mean_value();
        debug!(entries = series.size(), average, "bind chart data");
        self.series = Some(series);

        if let Some(sweep) = self.sweeps.get_mut(self.average) {
            sweep.set_value(average);
            sweep.set_visible(true);
        }

        self.recompute_vertical_bounds(None);
        self.update_primary_range();
    }

    #[must_use]
    pub fn series(&self) -> Option<&TimeSeries> {
        self.series.as_ref()
    }

    /// Shows exactly `[visible_start, visible_end]` and resets both inspection
    /// sweeps to its edges without notifying selection listeners.
    pub fn set_visible_range(&mut self, visible_start: i64, visible_end: i64) {
        let changed = self.axes.horizontal.set_bounds(visible_start, visible_end);
        let (valid_start, valid_end) = self.sweep_valid_range(visible_start, visible_end);
        debug!(
            visible_start,
            visible_end, valid_start, valid_end, changed, "set visible range"
        );

        for (id, value) in [(self.left, visible_start), (self.right, visible_end)] {
            if let Some(sweep) = self.sweeps.get_mut(id) {
                sweep.set_valid_range(valid_start, valid_end);
                sweep.set_value(value);
                sweep.set_label_template(TIME_LABEL_PATTERN);
            }
        }

        self.recompute_vertical_bounds(None);
        self.update_primary_range();
    }

    fn sweep_valid_range(&self, visible_start: i64, visible_end: i64) -> (i64, i64) {
        match self.config.sweep_range_policy {
            SweepRangePolicy::VisibleWindow => (visible_start, visible_end),
            SweepRangePolicy::HistoryClamped => {
                let series = self.series.as_ref();
                let start = series
                    .and_then(TimeSeries::history_start)
                    .map_or(visible_start, |history| visible_start.max(history));
                let end = series
                    .and_then(TimeSeries::history_end)
                    .map_or(visible_end, |history| visible_end.min(history));
                (start, end)
            }
        }
    }

    pub fn drag_start(&mut self, sweep: SweepId) -> ChartResult<()> {
        self.sweeps.drag_start(sweep)
    }

    /// Moves a sweep to the pointer and keeps a periodic axis re-check pending.
    pub fn drag_move(&mut self, sweep: SweepId, pixel: f64, now: Duration) -> ChartResult<SweepEvent> {
        let event = self.sweeps.drag_move(sweep, pixel, &self.axes)?;
        if self.rescale.request(sweep, now) {
            trace!(sweep = sweep.index(), ?now, "schedule axis re-check");
        }
        self.on_sweep_moved(sweep, false);
        Ok(event)
    }

    /// Commits the final drag position and stops periodic re-checks for the sweep.
    pub fn drag_end(&mut self, sweep: SweepId, pixel: f64) -> ChartResult<SweepEvent> {
        let event = self.sweeps.drag_end(sweep, pixel, &self.axes)?;
        self.rescale.cancel(sweep);
        self.on_sweep_moved(sweep, true);
        Ok(event)
    }

    /// Reacts to a sweep value change; listeners only hear about completed
    /// drags of the inspection sweeps.
    pub fn on_sweep_moved(&mut self, sweep: SweepId, done: bool) {
        self.update_primary_range();

        if done && (sweep == self.left || sweep == self.right) {
            debug!(
                start = self.primary_range.0,
                end = self.primary_range.1,
                listeners = self.listeners.len(),
                "inspect range changed"
            );
            for listener in &mut self.listeners {
                listener.on_inspect_range_changed();
            }
        }
    }

    /// Runs every axis re-check due at `now` and re-arms it while the sweep is
    /// still dragging. Returns how many re-checks ran.
    pub fn poll_rescale(&mut self, now: Duration) -> usize {
        let due = self.rescale.take_due(now);
        let mut fired = 0;
        for sweep in due {
            if !self.sweeps.get(sweep).is_some_and(Sweep::is_dragging) {
                continue;
            }
            self.recompute_vertical_bounds(Some(sweep));
            self.rescale.reschedule(sweep, now);
            fired += 1;
        }
        if fired > 0 {
            trace!(fired, ?now, ceiling = self.vertical_max, "axis re-check tick");
        }
        fired
    }

    #[must_use]
    pub fn next_rescale_deadline(&self) -> Option<Duration> {
        self.rescale.next_deadline()
    }

    #[must_use]
    pub fn rescale_schedule(&self) -> &RescaleSchedule {
        &self.rescale
    }

    /// Cancels all pending re-checks, e.g. when the hosting view goes away.
    pub fn detach(&mut self) {
        let cancelled = self.rescale.cancel_all();
        debug!(cancelled, "detach chart controller");
    }

    /// Reconsiders the magnitude ceiling, nudging it by 10% when the active
    /// sweep hugs an edge and never dropping below the data floor.
    ///
    /// Returns `true` when the ceiling changed.
    pub fn recompute_vertical_bounds(&mut self, active: Option<SweepId>) -> bool {
        let current = self.vertical_max;
        let tentative = match active {
            Some(sweep) => match self.sweeps.should_adjust_axis(sweep, &self.axes) {
                AxisAdjust::Grow => current.saturating_mul(11) / 10,
                AxisAdjust::Shrink => current.saturating_mul(9) / 10,
                AxisAdjust::Hold => current,
            },
            None => 0,
        };

        let max_visible = self.max_visible().saturating_mul(12) / 10;
        let data_floor = max_visible.max(self.config.vertical_floor);
        let ceiling = data_floor.max(tentative);
        if ceiling == current {
            return false;
        }

        debug!(previous = current, ceiling, data_floor, "commit vertical ceiling");
        self.vertical_max = ceiling;
        self.axes.vertical.set_bounds(0, ceiling);
        if let Some(sweep) = self.sweeps.get_mut(self.average) {
            sweep.set_valid_range(0, ceiling);
        }

        if let Some(sweep) = active {
            if let Err(err) = self.sweeps.update_value_from_position(sweep, &self.axes) {
                warn!(error = %err, "skipping sweep value refresh after rescale");
            }
        }
        true
    }

    /// Largest value inside the visible window, falling back to the whole
    /// series when the window holds nothing.
    #[must_use]
    pub fn max_visible(&self) -> i64 {
        let Some(series) = &self.series else {
            return 0;
        };
        let (start, end) = self.axes.horizontal.bounds();
        match series.max_between(start, end) {
            0 => series.vertical_max(),
            visible => visible,
        }
    }

    #[must_use]
    pub fn vertical_max(&self) -> i64 {
        self.vertical_max
    }

    /// `(left, right)` sweep values highlighted by the renderer.
    #[must_use]
    pub fn primary_range(&self) -> (i64, i64) {
        self.primary_range
    }

    fn update_primary_range(&mut self) {
        self.primary_range = (self.inspect_start(), self.inspect_end());
    }

    #[must_use]
    pub fn inspect_start(&self) -> i64 {
        self.sweeps.value(self.left).unwrap_or_default()
    }

    #[must_use]
    pub fn inspect_end(&self) -> i64 {
        self.sweeps.value(self.right).unwrap_or_default()
    }

    #[must_use]
    pub fn inspect_summary(&self) -> InspectSummary {
        let (start, end) = (self.inspect_start(), self.inspect_end());
        let (total_bytes, entry_count) = self.series.as_ref().map_or((0, 0), |series| {
            (
                series.sum_between(start, end),
                series.iter_between(start, end).count(),
            )
        });
        InspectSummary {
            start,
            end,
            total_bytes,
            entry_count,
        }
    }

    /// Bars for the current window with primary-range selection applied.
    pub fn bar_projection(&self) -> ChartResult<BarProjection> {
        let Some(series) = &self.series else {
            return Ok(BarProjection::default());
        };
        project_bars(
            series,
            &self.axes.horizontal,
            &self.axes.vertical,
            self.primary_range,
            self.config.bar_width_ms,
        )
    }
}
