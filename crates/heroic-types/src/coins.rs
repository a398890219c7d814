//! The denominated amount: four coin counts with an exact copper value.
//!
//! A [`Coins`] value may hold any breakdown (`15 gp` is as valid as
//! `1 pp, 5 gp`). Two amounts with different breakdowns compare unequal
//! under `==` even when they are worth the same; compare
//! [`Coins::copper_value`] when worth is what matters.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Denomination;

/// An amount of currency split across the four denominations.
///
/// Field names on the wire follow the host ruleset's coin object
/// (`pp`, `gp`, `sp`, `cp`) so the host can construct one directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Coins {
    /// Platinum pieces (1000 copper each).
    #[serde(rename = "pp", default)]
    #[ts(type = "number")]
    pub platinum: u64,
    /// Gold pieces (100 copper each).
    #[serde(rename = "gp", default)]
    #[ts(type = "number")]
    pub gold: u64,
    /// Silver pieces (10 copper each).
    #[serde(rename = "sp", default)]
    #[ts(type = "number")]
    pub silver: u64,
    /// Copper pieces.
    #[serde(rename = "cp", default)]
    #[ts(type = "number")]
    pub copper: u64,
}

impl Coins {
    /// The empty amount.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Build an amount from explicit denomination counts.
    pub const fn new(platinum: u64, gold: u64, silver: u64, copper: u64) -> Self {
        Self {
            platinum,
            gold,
            silver,
            copper,
        }
    }

    /// An amount held entirely in copper.
    pub const fn from_copper(copper: u64) -> Self {
        Self::new(0, 0, 0, copper)
    }

    /// An amount held entirely in gold.
    pub const fn from_gold(gold: u64) -> Self {
        Self::new(0, gold, 0, 0)
    }

    /// An amount held entirely in silver.
    pub const fn from_silver(silver: u64) -> Self {
        Self::new(0, 0, silver, 0)
    }

    /// Total worth in copper.
    ///
    /// Saturates at `u64::MAX`. Amounts that large are not representable;
    /// anything that compares or subtracts worth checks
    /// [`Coins::checked_copper_value`] first.
    pub const fn copper_value(&self) -> u64 {
        self.platinum
            .saturating_mul(Denomination::Platinum.copper_ratio())
            .saturating_add(self.gold.saturating_mul(Denomination::Gold.copper_ratio()))
            .saturating_add(self.silver.saturating_mul(Denomination::Silver.copper_ratio()))
            .saturating_add(self.copper)
    }

    /// Total worth in copper, or `None` if it does not fit in a `u64`.
    pub const fn checked_copper_value(&self) -> Option<u64> {
        let Some(platinum) = self.platinum.checked_mul(Denomination::Platinum.copper_ratio()) else {
            return None;
        };
        let Some(gold) = self.gold.checked_mul(Denomination::Gold.copper_ratio()) else {
            return None;
        };
        let Some(silver) = self.silver.checked_mul(Denomination::Silver.copper_ratio()) else {
            return None;
        };
        let Some(total) = platinum.checked_add(gold) else {
            return None;
        };
        let Some(total) = total.checked_add(silver) else {
            return None;
        };
        total.checked_add(self.copper)
    }

    /// Whether this amount is worth nothing.
    pub const fn is_zero(&self) -> bool {
        self.copper_value() == 0
    }

    /// The count held in one denomination.
    pub const fn count(&self, denomination: Denomination) -> u64 {
        match denomination {
            Denomination::Platinum => self.platinum,
            Denomination::Gold => self.gold,
            Denomination::Silver => self.silver,
            Denomination::Copper => self.copper,
        }
    }
}

/// Formats as the host does: non-zero denominations from platinum down,
/// joined by `", "` (`"1 gp, 5 sp"`). An empty amount prints `"0 gp"`.
impl core::fmt::Display for Coins {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for denomination in Denomination::DESCENDING {
            let count = self.count(denomination);
            if count == 0 {
                continue;
            }
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{count} {}", denomination.abbreviation())?;
            first = false;
        }
        if first {
            f.write_str("0 gp")?;
        }
        Ok(())
    }
}
