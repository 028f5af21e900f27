use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::axis::ChartAxis;
use crate::core::time_series::TimeSeries;
use crate::core::types::Entry;
use crate::error::{ChartError, ChartResult};

/// Pixel rectangle for one usage bar.
///
/// The bar spans `[left_px, right_px]` horizontally and grows from the
/// vertical axis baseline up to `top_px`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub timestamp: i64,
    pub value: i64,
    pub left_px: f64,
    pub right_px: f64,
    pub top_px: f64,
    /// Bar lies completely inside the primary range.
    pub selected: bool,
}

/// Bars for the visible window plus the largest value among them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BarProjection {
    pub bars: Vec<BarGeometry>,
    pub max_value: i64,
}

/// Projects the entries covering the horizontal axis bounds into bar geometry.
///
/// Entries are taken from `index_at_or_after(window_start)` through
/// `index_at_or_before(window_end)`; bars ending left of the viewport are
/// skipped but still count toward `max_value`.
pub fn project_bars<H, V>(
    series: &TimeSeries,
    horizontal: &H,
    vertical: &V,
    primary_range: (i64, i64),
    bar_width_ms: i64,
) -> ChartResult<BarProjection>
where
    H: ChartAxis + Sync + ?Sized,
    V: ChartAxis + Sync + ?Sized,
{
    if bar_width_ms <= 0 {
        return Err(ChartError::InvalidData(
            "bar width must be > 0".to_owned(),
        ));
    }

    let (window_start, window_end) = horizontal.bounds();
    let (Some(first), Some(last)) = (
        series.index_at_or_after(window_start),
        series.index_at_or_before(window_end),
    ) else {
        return Ok(BarProjection::default());
    };
    if first > last {
        return Ok(BarProjection::default());
    }

    let visible = &series.entries()[first..=last];
    let max_value = visible.iter().map(|e| e.value()).max().unwrap_or(0);
    let primary_left = horizontal.convert_to_point(primary_range.0);
    let primary_right = horizontal.convert_to_point(primary_range.1);
    let project = |entry: &Entry| {
        project_single_bar(
            *entry,
            horizontal,
            vertical,
            primary_left,
            primary_right,
            bar_width_ms,
        )
    };

    #[cfg(feature = "parallel-projection")]
    let bars: Vec<BarGeometry> = visible.par_iter().filter_map(project).collect();

    #[cfg(not(feature = "parallel-projection"))]
    let bars: Vec<BarGeometry> = visible.iter().filter_map(project).collect();

    Ok(BarProjection { bars, max_value })
}

fn project_single_bar<H, V>(
    entry: Entry,
    horizontal: &H,
    vertical: &V,
    primary_left: f64,
    primary_right: f64,
    bar_width_ms: i64,
) -> Option<BarGeometry>
where
    H: ChartAxis + ?Sized,
    V: ChartAxis + ?Sized,
{
    let left_px = horizontal.convert_to_point(entry.timestamp());
    let right_px = horizontal.convert_to_point(entry.timestamp().saturating_add(bar_width_ms));
    if right_px < 0.0 {
        return None;
    }

    Some(BarGeometry {
        timestamp: entry.timestamp(),
        value: entry.value(),
        left_px,
        right_px,
        top_px: vertical.convert_to_point(entry.value()),
        selected: left_px >= primary_left && right_px <= primary_right,
    })
}
