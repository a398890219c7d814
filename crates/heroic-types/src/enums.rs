//! Enumeration types for the Heroic Crafting accounting core.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Denominations
// ---------------------------------------------------------------------------

/// One of the four coin tiers, with fixed ratios 1:10:10:10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Denomination {
    /// 1000 copper.
    Platinum,
    /// 100 copper.
    Gold,
    /// 10 copper.
    Silver,
    /// The smallest unit.
    Copper,
}

impl Denomination {
    /// All denominations, highest value first.
    pub const DESCENDING: [Self; 4] = [Self::Platinum, Self::Gold, Self::Silver, Self::Copper];

    /// Worth of one coin of this denomination, in copper.
    pub const fn copper_ratio(self) -> u64 {
        match self {
            Self::Platinum => 1000,
            Self::Gold => 100,
            Self::Silver => 10,
            Self::Copper => 1,
        }
    }

    /// Short label used in formatted amounts (`"gp"`, `"sp"`, ...).
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Platinum => "pp",
            Self::Gold => "gp",
            Self::Silver => "sp",
            Self::Copper => "cp",
        }
    }

    /// Match a user-facing label: abbreviation, singular or plural name.
    ///
    /// Matching is case-insensitive. Returns `None` for unknown labels.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase();
        Self::DESCENDING.into_iter().find(|denomination| {
            let (abbr, name) = match denomination {
                Self::Platinum => ("pp", "platinum"),
                Self::Gold => ("gp", "gold"),
                Self::Silver => ("sp", "silver"),
                Self::Copper => ("cp", "copper"),
            };
            label == abbr
                || label == name
                || label.strip_suffix('s').is_some_and(|stem| stem == name)
        })
    }
}

// ---------------------------------------------------------------------------
// Normalization policy
// ---------------------------------------------------------------------------

/// Whether normalization may break value into the top (platinum) tier.
///
/// The ruleset conventionally keeps gold as the highest denomination in
/// play, so [`PlatinumPolicy::Ignore`] is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PlatinumPolicy {
    /// Greedy decomposition including platinum.
    Convert,
    /// Platinum is always zero; gold absorbs everything above 100 copper.
    #[default]
    Ignore,
}

// ---------------------------------------------------------------------------
// Payment policy
// ---------------------------------------------------------------------------

/// How a cost should be covered from coins and material troves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum PaymentPolicy {
    /// Pay only with coins.
    #[default]
    FullCoin,
    /// Pay with coins, covering any shortfall with troves.
    PreferCoin,
    /// Pay with troves, covering any shortfall with coins.
    PreferTrove,
    /// Pay only with troves.
    FullTrove,
    /// Ignore the cost entirely.
    Free,
}

impl PaymentPolicy {
    /// Every policy, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::FullCoin,
        Self::PreferCoin,
        Self::PreferTrove,
        Self::FullTrove,
        Self::Free,
    ];
}

// ---------------------------------------------------------------------------
// Spending durations
// ---------------------------------------------------------------------------

/// The length of a crafting activity, which scales the spending limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum SpendingDuration {
    /// One hour: the base table value.
    Hour,
    /// One day: four hours of value.
    Day,
    /// One week: twenty hours of value.
    Week,
}

impl SpendingDuration {
    /// Multiplier applied to the hourly value.
    pub const fn hourly_multiplier(self) -> u64 {
        match self {
            Self::Hour => 1,
            Self::Day => 4,
            Self::Week => 20,
        }
    }
}

// ---------------------------------------------------------------------------
// Project progress
// ---------------------------------------------------------------------------

/// Whether a progress amount is added to or removed from a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ProgressDirection {
    /// Add value to the project's current progress.
    Advance,
    /// Remove value from the project's current progress (floored at zero).
    Setback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denomination_ratios_are_powers_of_ten() {
        let ratios: Vec<u64> = Denomination::DESCENDING
            .iter()
            .map(|d| d.copper_ratio())
            .collect();
        assert_eq!(ratios, vec![1000, 100, 10, 1]);
    }

    #[test]
    fn denomination_labels() {
        assert_eq!(Denomination::from_label("gp"), Some(Denomination::Gold));
        assert_eq!(Denomination::from_label("GP"), Some(Denomination::Gold));
        assert_eq!(Denomination::from_label("silver"), Some(Denomination::Silver));
        assert_eq!(Denomination::from_label("coppers"), Some(Denomination::Copper));
        assert_eq!(Denomination::from_label("pp"), Some(Denomination::Platinum));
        assert_eq!(Denomination::from_label("mithral"), None);
    }

    #[test]
    fn payment_policy_wire_names() {
        let json = serde_json::to_string(&PaymentPolicy::PreferTrove).ok();
        assert_eq!(json.as_deref(), Some("\"preferTrove\""));
        let parsed: Option<PaymentPolicy> = serde_json::from_str("\"fullCoin\"").ok();
        assert_eq!(parsed, Some(PaymentPolicy::FullCoin));
    }

    #[test]
    fn spending_duration_multipliers() {
        assert_eq!(SpendingDuration::Hour.hourly_multiplier(), 1);
        assert_eq!(SpendingDuration::Day.hourly_multiplier(), 4);
        assert_eq!(SpendingDuration::Week.hourly_multiplier(), 20);
    }

    #[test]
    fn platinum_policy_defaults_to_ignore() {
        assert_eq!(PlatinumPolicy::default(), PlatinumPolicy::Ignore);
    }
}
