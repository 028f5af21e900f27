use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One usage sample: bytes consumed at a point in time.
///
/// Fields are private so every instance, including deserialized ones, has
/// passed the non-negative value check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEntry")]
pub struct Entry {
    timestamp: i64,
    value: i64,
}

impl Entry {
    /// Builds a validated entry.
    pub fn new(timestamp: i64, value: i64) -> ChartResult<Self> {
        if value < 0 {
            return Err(ChartError::InvalidData(format!(
                "entry value must be >= 0, got {value}"
            )));
        }
        Ok(Self { timestamp, value })
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp(self) -> i64 {
        self.timestamp
    }

    /// Byte count, never negative.
    #[must_use]
    pub fn value(self) -> i64 {
        self.value
    }
}

#[derive(Deserialize)]
struct RawEntry {
    timestamp: i64,
    value: i64,
}

impl TryFrom<RawEntry> for Entry {
    type Error = ChartError;

    fn try_from(raw: RawEntry) -> ChartResult<Self> {
        Self::new(raw.timestamp, raw.value)
    }
}

/// Display text for an axis value plus the value it actually represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub text: String,
    /// Value rounded to the label's display granularity.
    pub value: i64,
}

impl AxisLabel {
    #[must_use]
    pub fn new(text: impl Into<String>, value: i64) -> Self {
        Self {
            text: text.into(),
            value,
        }
    }
}

/// Hint telling the owner of an axis whether a value sits too close to an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisAdjust {
    /// Value hugs the low edge; the axis may shrink.
    Shrink,
    #[default]
    Hold,
    /// Value hugs the high edge; the axis should grow.
    Grow,
}

impl AxisAdjust {
    /// Returns the hint as `-1`, `0` or `+1`.
    #[must_use]
    pub fn signum(self) -> i32 {
        match self {
            Self::Shrink => -1,
            Self::Hold => 0,
            Self::Grow => 1,
        }
    }
}
