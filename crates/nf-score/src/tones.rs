//! Per-column square-wave dividers.
//!
//! A tone's half-period is `clock_hz / (2 * f)` cycles, truncating, the
//! same arithmetic the hardware constants were generated with, so the
//! reference clock reproduces them bit-exact.

use crate::clock::REFERENCE_CLOCK_HZ;
use crate::column::Column;

/// Hard upper bound on any half-period divider, in cycles.
///
/// The hardware declared this range at compile time; exceeding it here
/// is a construction error, not a runtime condition.
pub const MAX_DIVIDER: u32 = 200_000;

/// Half-period divider for one target frequency at one clock rate.
pub fn divider_for(clock_hz: u32, frequency_hz: u32) -> u32 {
    assert!(frequency_hz > 0, "target frequency must be nonzero");
    let divider = clock_hz / (2 * frequency_hz);
    assert!(
        divider > 0 && divider <= MAX_DIVIDER,
        "divider {} for {} Hz at a {} Hz clock is out of range",
        divider,
        frequency_hz,
        clock_hz
    );
    divider
}

/// The four per-column half-period dividers for one clock rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToneTable {
    dividers: [u32; 4],
}

impl ToneTable {
    /// Derive the table from the column frequency targets.
    pub fn for_clock_hz(clock_hz: u32) -> Self {
        let mut dividers = [0; 4];
        for column in Column::ALL {
            dividers[column.index()] = divider_for(clock_hz, column.frequency_hz());
        }
        Self { dividers }
    }

    /// Build a table from explicit dividers (custom tunings).
    pub fn from_dividers(dividers: [u32; 4]) -> Self {
        for divider in dividers {
            assert!(
                divider > 0 && divider <= MAX_DIVIDER,
                "divider {} is out of range",
                divider
            );
        }
        Self { dividers }
    }

    /// The half-period for one column, in cycles.
    pub const fn divider(&self, column: Column) -> u32 {
        self.dividers[column.index()]
    }
}

impl Default for ToneTable {
    fn default() -> Self {
        Self::for_clock_hz(REFERENCE_CLOCK_HZ)
    }
}
