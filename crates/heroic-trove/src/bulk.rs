//! Packing value into whole trove units.
//!
//! A trove at level L stores value in light-bulk units worth
//! `unit_value(L)` each. Whatever does not fill a unit is tracked
//! separately as leftover. Packing is exact: no value is created or lost.

use serde::Serialize;
use tracing::warn;

use heroic_coins::normalize;
use heroic_types::{Coins, PlatinumPolicy};

use crate::schedule::ValueSchedule;

/// Value re-expressed as whole units plus a sub-unit remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackedTrove {
    /// Whole light-bulk units.
    pub quantity: u64,
    /// Value smaller than one unit.
    pub leftover: Coins,
}

/// Pack `target` into units of the level's trove value.
///
/// `quantity * unit_value(level) + leftover == target` always holds, and
/// `leftover < unit_value(level)` whenever the level is valid.
///
/// A level outside the schedule has no unit value. Rather than divide by
/// zero, the whole target is returned as leftover with zero quantity.
pub fn pack<S>(schedule: &S, level: u32, target: &Coins, policy: PlatinumPolicy) -> PackedTrove
where
    S: ValueSchedule + ?Sized,
{
    let unit = schedule.unit_value(level).copper_value();
    let total = target.copper_value();

    match (total.checked_div(unit), total.checked_rem(unit)) {
        (Some(quantity), Some(leftover)) => PackedTrove {
            quantity,
            leftover: normalize(leftover, policy),
        },
        _ => {
            warn!(level, "trove level has no unit value; keeping value as leftover");
            PackedTrove {
                quantity: 0,
                leftover: normalize(total, policy),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Bulk display
// ---------------------------------------------------------------------------

/// A trove quantity split into whole Bulk and light Bulk for display.
///
/// Quantity counts light units ten to a Bulk, so `14` is one Bulk and four
/// light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkDisplay {
    /// Whole Bulk (tens digit and up).
    pub bulk: u64,
    /// Light Bulk (ones digit).
    pub light: u64,
}

impl BulkDisplay {
    /// Split a trove quantity.
    pub const fn from_quantity(quantity: u64) -> Self {
        Self {
            bulk: quantity / 10,
            light: quantity % 10,
        }
    }
}

/// Renders `"1; 4L"`, `"4L"`, `"1"`, or `"-"` when empty.
impl core::fmt::Display for BulkDisplay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (self.bulk, self.light) {
            (0, 0) => f.write_str("-"),
            (0, light) => write!(f, "{light}L"),
            (bulk, 0) => write!(f, "{bulk}"),
            (bulk, light) => write!(f, "{bulk}; {light}L"),
        }
    }
}
