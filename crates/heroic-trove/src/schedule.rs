//! Level-indexed value schedules.
//!
//! The hourly spending limit table doubles as the price of one light-bulk
//! unit of material trove at each level. Callers pass a [`ValueSchedule`]
//! explicitly; nothing in this crate reads a global table.
//!
//! Table values from the Heroic Crafting rules, "Table 1: Spending Limit"
//! (hour column, levels 1-20) and "Gathered Income" (levels 0-20).

use heroic_coins::scale;
use heroic_types::{Coins, PlatinumPolicy, SpendingDuration};

use crate::TroveError;

/// Number of levels covered by the spending limit table.
pub const MAX_LEVEL: u32 = 20;

/// Hourly spending limit for levels 1 through 20.
pub const HOURLY_SPENDING_LIMIT: [Coins; 20] = [
    Coins::from_silver(3),
    Coins::from_silver(5),
    Coins::from_silver(8),
    Coins::new(0, 1, 5, 0),
    Coins::from_gold(2),
    Coins::from_gold(3),
    Coins::from_gold(5),
    Coins::from_gold(7),
    Coins::from_gold(10),
    Coins::from_gold(15),
    Coins::from_gold(21),
    Coins::from_gold(30),
    Coins::from_gold(40),
    Coins::from_gold(70),
    Coins::from_gold(100),
    Coins::from_gold(125),
    Coins::from_gold(200),
    Coins::from_gold(300),
    Coins::from_gold(500),
    Coins::from_gold(800),
];

/// Value gathered by foraging for crafting resources, levels 0 through 20.
pub const GATHERED_INCOME: [Coins; 21] = [
    Coins::from_silver(1),
    Coins::from_silver(4),
    Coins::from_silver(6),
    Coins::from_gold(1),
    Coins::new(0, 1, 6, 0),
    Coins::from_gold(2),
    Coins::from_gold(4),
    Coins::from_gold(5),
    Coins::from_gold(6),
    Coins::from_gold(8),
    Coins::from_gold(10),
    Coins::from_gold(12),
    Coins::from_gold(16),
    Coins::from_gold(24),
    Coins::from_gold(30),
    Coins::from_gold(40),
    Coins::from_gold(60),
    Coins::from_gold(80),
    Coins::from_gold(140),
    Coins::from_gold(200),
    Coins::from_gold(300),
];

// ---------------------------------------------------------------------------
// ValueSchedule
// ---------------------------------------------------------------------------

/// Maps a level to the value of one trove unit at that level.
///
/// Implementations must be pure: the same level always yields the same
/// value. Levels outside the schedule map to [`Coins::ZERO`].
pub trait ValueSchedule {
    /// Value of one light-bulk unit at `level`.
    fn unit_value(&self, level: u32) -> Coins;
}

impl<F> ValueSchedule for F
where
    F: Fn(u32) -> Coins,
{
    fn unit_value(&self, level: u32) -> Coins {
        self(level)
    }
}

/// The hourly spending limit table, optionally overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingSchedule {
    hourly: [Coins; 20],
}

impl Default for SpendingSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

impl SpendingSchedule {
    /// The published table.
    pub const fn standard() -> Self {
        Self {
            hourly: HOURLY_SPENDING_LIMIT,
        }
    }

    /// A custom table with one hourly value per level, level 1 first.
    ///
    /// # Errors
    ///
    /// Returns [`TroveError::ScheduleLength`] unless exactly 20 values are
    /// given, and [`TroveError::ZeroScheduleValue`] if any value is zero.
    pub fn from_hourly(values: Vec<Coins>) -> Result<Self, TroveError> {
        let found = values.len();
        let hourly: [Coins; 20] = values
            .try_into()
            .map_err(|_rejected: Vec<Coins>| TroveError::ScheduleLength { found })?;
        if let Some(index) = hourly.iter().position(Coins::is_zero) {
            let level = u32::try_from(index)
                .ok()
                .and_then(|i| i.checked_add(1))
                .unwrap_or(0);
            return Err(TroveError::ZeroScheduleValue { level });
        }
        Ok(Self { hourly })
    }

    /// The hourly value for `level`, or zero outside 1 through 20.
    pub fn hourly(&self, level: u32) -> Coins {
        level
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| self.hourly.get(index))
            .copied()
            .unwrap_or(Coins::ZERO)
    }

    /// The spending limit for an activity of the given duration.
    ///
    /// An hour is the table value, a day four hours, a week twenty. Levels
    /// outside the table yield zero. Returns `None` only if a custom table
    /// holds values large enough to overflow when scaled.
    pub fn spending_limit(
        &self,
        duration: SpendingDuration,
        level: u32,
        policy: PlatinumPolicy,
    ) -> Option<Coins> {
        scale(&self.hourly(level), duration.hourly_multiplier(), policy)
    }
}

impl ValueSchedule for SpendingSchedule {
    fn unit_value(&self, level: u32) -> Coins {
        self.hourly(level)
    }
}

/// Value gathered when foraging at `level`, or zero above level 20.
pub fn gathered_income(level: u32) -> Coins {
    usize::try_from(level)
        .ok()
        .and_then(|index| GATHERED_INCOME.get(index))
        .copied()
        .unwrap_or(Coins::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IGNORE: PlatinumPolicy = PlatinumPolicy::Ignore;

    #[test]
    fn standard_table_endpoints() {
        let schedule = SpendingSchedule::standard();
        assert_eq!(schedule.unit_value(1).copper_value(), 30);
        assert_eq!(schedule.unit_value(4).copper_value(), 150);
        assert_eq!(schedule.unit_value(5).copper_value(), 200);
        assert_eq!(schedule.unit_value(20).copper_value(), 80_000);
    }

    #[test]
    fn out_of_range_levels_are_zero() {
        let schedule = SpendingSchedule::standard();
        assert_eq!(schedule.unit_value(0), Coins::ZERO);
        assert_eq!(schedule.unit_value(21), Coins::ZERO);
        assert_eq!(schedule.unit_value(u32::MAX), Coins::ZERO);
    }

    #[test]
    fn table_is_strictly_increasing() {
        let values: Vec<u64> = HOURLY_SPENDING_LIMIT.iter().map(Coins::copper_value).collect();
        assert!(values.windows(2).all(|pair| matches!(pair, [a, b] if a < b)));
    }

    #[test]
    fn spending_limit_scales_by_duration() {
        let schedule = SpendingSchedule::standard();
        assert_eq!(
            schedule.spending_limit(SpendingDuration::Hour, 4, IGNORE),
            Some(Coins::new(0, 1, 5, 0))
        );
        assert_eq!(
            schedule.spending_limit(SpendingDuration::Day, 4, IGNORE),
            Some(Coins::from_gold(6))
        );
        assert_eq!(
            schedule.spending_limit(SpendingDuration::Week, 4, IGNORE),
            Some(Coins::from_gold(30))
        );
        assert_eq!(
            schedule.spending_limit(SpendingDuration::Week, 0, IGNORE),
            Some(Coins::ZERO)
        );
    }

    #[test]
    fn custom_schedule_requires_twenty_nonzero_values() {
        let short = SpendingSchedule::from_hourly(vec![Coins::from_gold(1); 19]);
        assert!(matches!(short, Err(TroveError::ScheduleLength { found: 19 })));

        let mut values = vec![Coins::from_gold(1); 20];
        if let Some(slot) = values.get_mut(6) {
            *slot = Coins::ZERO;
        }
        let zero = SpendingSchedule::from_hourly(values);
        assert!(matches!(zero, Err(TroveError::ZeroScheduleValue { level: 7 })));

        let flat = SpendingSchedule::from_hourly(vec![Coins::from_gold(1); 20]);
        assert_eq!(flat.ok().map(|s| s.unit_value(13)), Some(Coins::from_gold(1)));
    }

    #[test]
    fn closures_are_schedules() {
        let flat = |level: u32| Coins::from_copper(u64::from(level).saturating_mul(10));
        assert_eq!(flat.unit_value(3), Coins::from_copper(30));
    }

    #[test]
    fn gathered_income_starts_at_level_zero() {
        assert_eq!(gathered_income(0), Coins::from_silver(1));
        assert_eq!(gathered_income(4), Coins::new(0, 1, 6, 0));
        assert_eq!(gathered_income(20), Coins::from_gold(300));
        assert_eq!(gathered_income(21), Coins::ZERO);
    }
}
