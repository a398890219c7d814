//! Value schedules, bulk packing, and trove payment for Heroic Crafting.
//!
//! A material trove is an inventory item standing in for crafting
//! materials. Its value is stored as whole light-bulk units, each worth
//! the hourly spending limit for the trove's level, plus a leftover that
//! does not fill a unit.
//!
//! # Modules
//!
//! - [`schedule`] -- The [`ValueSchedule`] seam and the published tables
//! - [`bulk`] -- [`pack`] value into units; [`BulkDisplay`] formatting
//! - [`trove`] -- Trove valuation and [`pay_with_troves`]
//!
//! # Usage
//!
//! ```
//! use heroic_trove::{Commit, SpendingSchedule, pay_with_troves};
//! use heroic_types::{Coins, PlatinumPolicy, TroveId, TroveRecord};
//!
//! let schedule = SpendingSchedule::standard();
//! let troves = vec![TroveRecord {
//!     id: TroveId::new("trove-1"),
//!     level: 1,
//!     quantity: 10,
//!     leftover: Coins::ZERO,
//! }];
//!
//! let payment = pay_with_troves(
//!     &schedule,
//!     &troves,
//!     &Coins::from_silver(12),
//!     Commit::Full,
//!     PlatinumPolicy::Ignore,
//! );
//! assert!(payment.can_pay);
//! ```

pub mod bulk;
pub mod schedule;
pub mod trove;

pub use bulk::{BulkDisplay, PackedTrove, pack};
pub use schedule::{
    GATHERED_INCOME, HOURLY_SPENDING_LIMIT, MAX_LEVEL, SpendingSchedule, ValueSchedule,
    gathered_income,
};
pub use trove::{
    Commit, RefillPlan, TrovePayment, aggregate_value, checked_total_value, checked_trove_value,
    pay_with_troves, plan_refill, trove_value,
};

/// Errors that can occur when building a custom value schedule.
#[derive(Debug, thiserror::Error)]
pub enum TroveError {
    /// A custom schedule did not have one value per level.
    #[error("schedule must list {expected} hourly values, got {found}", expected = MAX_LEVEL)]
    ScheduleLength {
        /// How many values were supplied.
        found: usize,
    },

    /// A custom schedule had a zero value, which would make troves at that
    /// level unable to hold whole units.
    #[error("schedule value for level {level} is zero")]
    ZeroScheduleValue {
        /// The level with the zero value.
        level: u32,
    },
}
