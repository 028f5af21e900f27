pub mod axis;
pub mod bar_projection;
pub mod byte_format;
pub mod inverted_axis;
pub mod magnitude_axis;
pub mod primitives;
pub mod time_axis;
pub mod time_series;
pub mod types;

pub use axis::{AxisLookup, AxisSlot, AxisState, ChartAxis};
pub use bar_projection::{BarGeometry, BarProjection, project_bars};
pub use byte_format::{ByteUnitSystem, format_byte_count};
pub use inverted_axis::InvertedAxis;
pub use magnitude_axis::{
    GB_IN_BYTES, KB_IN_BYTES, MB_IN_BYTES, MagnitudeAxis, MagnitudeScaleMode,
    round_up_to_power_of_two,
};
pub use time_axis::{DAY_IN_MILLIS, MAX_TIME_TICKS, TIME_LABEL_PATTERN, TimeAxis, TimeAxisConfig};
pub use time_series::TimeSeries;
pub use types::{AxisAdjust, AxisLabel, Entry};
