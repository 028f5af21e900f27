use serde::{Deserialize, Serialize};

use crate::core::{ByteUnitSystem, format_byte_count};

/// Observer of completed inspection-range drags.
///
/// Fired once per released drag, never for intermediate moves or
/// programmatic resets. The notification carries no payload; listeners read
/// the range back from the controller.
pub trait SelectionListener {
    fn on_inspect_range_changed(&mut self);
}

impl<F: FnMut()> SelectionListener for F {
    fn on_inspect_range_changed(&mut self) {
        self()
    }
}

/// Usage inside the current inspection range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectSummary {
    pub start: i64,
    pub end: i64,
    pub total_bytes: i64,
    pub entry_count: usize,
}

impl InspectSummary {
    #[must_use]
    pub fn formatted_total(self, system: ByteUnitSystem) -> String {
        format_byte_count(self.total_bytes, system)
    }
}
