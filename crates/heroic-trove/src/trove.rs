//! Valuing material troves and drawing payments from them.
//!
//! Troves are read as immutable snapshots. Payment never touches the input
//! records; it returns [`TroveMutation`] values for the host to apply.

use serde::Serialize;
use tracing::{debug, warn};

use heroic_coins::normalize;
use heroic_types::{Coins, PlatinumPolicy, TroveMutation, TroveRecord};

use crate::bulk::pack;
use crate::schedule::ValueSchedule;

/// Whether a trove payment must cover the whole cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// All or nothing: fail with no updates unless the full cost is covered.
    Full,
    /// Best effort: drain as much as possible and report success.
    Partial,
}

/// Result of drawing a cost from a set of troves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrovePayment {
    /// Whether the payment went through. Always `true` under
    /// [`Commit::Partial`].
    pub can_pay: bool,
    /// New state for each trove drawn on, in drain order.
    pub updates: Vec<TroveMutation>,
}

impl TrovePayment {
    const fn declined() -> Self {
        Self {
            can_pay: false,
            updates: Vec::new(),
        }
    }
}

/// Copper held by one trove: whole units at its level plus leftover.
///
/// Saturates at `u64::MAX`; see [`checked_trove_value`].
pub fn trove_value<S>(schedule: &S, trove: &TroveRecord) -> u64
where
    S: ValueSchedule + ?Sized,
{
    checked_trove_value(schedule, trove).unwrap_or(u64::MAX)
}

/// Copper held by one trove, or `None` if it does not fit in a `u64`.
pub fn checked_trove_value<S>(schedule: &S, trove: &TroveRecord) -> Option<u64>
where
    S: ValueSchedule + ?Sized,
{
    schedule
        .unit_value(trove.level)
        .checked_copper_value()?
        .checked_mul(trove.quantity)?
        .checked_add(trove.leftover.checked_copper_value()?)
}

/// Combined copper held by a set of troves, or `None` on overflow.
pub fn checked_total_value<S>(schedule: &S, troves: &[TroveRecord]) -> Option<u64>
where
    S: ValueSchedule + ?Sized,
{
    troves.iter().try_fold(0_u64, |acc, trove| {
        acc.checked_add(checked_trove_value(schedule, trove)?)
    })
}

/// Combined value of a set of troves.
///
/// Saturates at `u64::MAX`; see [`checked_total_value`].
pub fn aggregate_value<S>(schedule: &S, troves: &[TroveRecord], policy: PlatinumPolicy) -> Coins
where
    S: ValueSchedule + ?Sized,
{
    normalize(checked_total_value(schedule, troves).unwrap_or(u64::MAX), policy)
}

/// Draw `cost` from `troves`, lowest level first.
///
/// Lower-level troves hold cheaper units, so draining them first wastes the
/// least value on sub-unit change. Troves of equal level keep their input
/// order.
///
/// Under [`Commit::Full`] the payment is all or nothing. Under
/// [`Commit::Partial`] every trove is drained until the cost is met or the
/// troves run dry, and the payment reports success either way.
///
/// A trove whose level has no unit value can only give up its leftover; its
/// quantity is carried into the update unchanged, and it is skipped when it
/// has no leftover. A cost or trove set worth more than `u64::MAX` copper
/// is declined under either commit.
pub fn pay_with_troves<S>(
    schedule: &S,
    troves: &[TroveRecord],
    cost: &Coins,
    commit: Commit,
    policy: PlatinumPolicy,
) -> TrovePayment
where
    S: ValueSchedule + ?Sized,
{
    let (Some(cost_copper), Some(available)) = (
        cost.checked_copper_value(),
        checked_total_value(schedule, troves),
    ) else {
        warn!("trove payment amounts exceed the copper range; declining");
        return TrovePayment::declined();
    };

    if commit == Commit::Full && available < cost_copper {
        debug!(available, cost = cost_copper, "troves cannot cover cost");
        return TrovePayment::declined();
    }

    let mut by_level: Vec<&TroveRecord> = troves.iter().collect();
    by_level.sort_by_key(|trove| trove.level);

    let mut remaining = cost_copper;
    let mut updates = Vec::new();

    for trove in by_level {
        if remaining == 0 {
            break;
        }

        let unpriced = schedule.unit_value(trove.level).is_zero();
        if unpriced && trove.leftover.is_zero() {
            continue;
        }

        let held = trove_value(schedule, trove);
        let taken = held.min(remaining);
        remaining = remaining.saturating_sub(taken);
        let rest = normalize(held.saturating_sub(taken), policy);

        let update = if unpriced {
            TroveMutation {
                id: trove.id.clone(),
                quantity: trove.quantity,
                leftover: rest,
            }
        } else {
            let repacked = pack(schedule, trove.level, &rest, policy);
            TroveMutation {
                id: trove.id.clone(),
                quantity: repacked.quantity,
                leftover: repacked.leftover,
            }
        };
        updates.push(update);
    }

    if remaining > 0 && commit == Commit::Full {
        debug!(remaining, "trove drain fell short; discarding updates");
        return TrovePayment::declined();
    }

    debug!(
        cost = cost_copper,
        uncovered = remaining,
        troves_touched = updates.len(),
        "trove payment planned"
    );
    TrovePayment {
        can_pay: true,
        updates,
    }
}

// ---------------------------------------------------------------------------
// Refill
// ---------------------------------------------------------------------------

/// Replacement state for a trove being refilled or re-leveled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefillPlan {
    /// The trove's new level.
    pub level: u32,
    /// The new per-unit price, which the host stores as the item price.
    pub unit_price: Coins,
    /// The packed quantity and leftover.
    pub update: TroveMutation,
}

/// Plan a trove holding `value` at `level`.
///
/// Used when a player tops up a trove or moves its value to another level.
pub fn plan_refill<S>(
    schedule: &S,
    trove: &TroveRecord,
    level: u32,
    value: &Coins,
    policy: PlatinumPolicy,
) -> RefillPlan
where
    S: ValueSchedule + ?Sized,
{
    let packed = pack(schedule, level, value, policy);
    RefillPlan {
        level,
        unit_price: schedule.unit_value(level),
        update: TroveMutation {
            id: trove.id.clone(),
            quantity: packed.quantity,
            leftover: packed.leftover,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::SpendingSchedule;
    use heroic_types::TroveId;

    const IGNORE: PlatinumPolicy = PlatinumPolicy::Ignore;

    fn trove(id: &str, level: u32, quantity: u64, leftover: Coins) -> TroveRecord {
        TroveRecord {
            id: TroveId::new(id),
            level,
            quantity,
            leftover,
        }
    }

    /// Level 5 trove worth 40 gp and a level 1 trove worth 3 gp 5 cp,
    /// deliberately listed highest level first.
    fn two_troves() -> Vec<TroveRecord> {
        vec![
            trove("high", 5, 20, Coins::ZERO),
            trove("low", 1, 10, Coins::from_copper(5)),
        ]
    }

    #[test]
    fn trove_value_includes_leftover() {
        let schedule = SpendingSchedule::standard();
        let t = trove("a", 4, 3, Coins::from_silver(2));
        assert_eq!(trove_value(&schedule, &t), 470);
    }

    #[test]
    fn aggregate_sums_all_troves() {
        let schedule = SpendingSchedule::standard();
        let total = aggregate_value(&schedule, &two_troves(), IGNORE);
        assert_eq!(total.copper_value(), 4305);
        assert_eq!(aggregate_value(&schedule, &[], IGNORE), Coins::ZERO);
    }

    #[test]
    fn drains_lowest_level_first() {
        let schedule = SpendingSchedule::standard();
        let troves = two_troves();
        let payment = pay_with_troves(&schedule, &troves, &Coins::from_gold(10), Commit::Full, IGNORE);

        assert!(payment.can_pay);
        assert_eq!(
            payment.updates,
            vec![
                TroveMutation {
                    id: TroveId::new("low"),
                    quantity: 0,
                    leftover: Coins::ZERO,
                },
                TroveMutation {
                    id: TroveId::new("high"),
                    quantity: 16,
                    leftover: Coins::new(0, 1, 0, 5),
                },
            ]
        );
    }

    #[test]
    fn stops_once_cost_is_covered() {
        let schedule = SpendingSchedule::standard();
        let payment =
            pay_with_troves(&schedule, &two_troves(), &Coins::from_gold(1), Commit::Full, IGNORE);
        assert!(payment.can_pay);
        assert_eq!(payment.updates.len(), 1);
        assert_eq!(
            payment.updates.first().map(|u| (u.quantity, u.leftover)),
            Some((6, Coins::new(0, 0, 2, 5)))
        );
    }

    #[test]
    fn full_commit_short_circuits_when_short() {
        let schedule = SpendingSchedule::standard();
        let payment =
            pay_with_troves(&schedule, &two_troves(), &Coins::from_gold(50), Commit::Full, IGNORE);
        assert_eq!(payment, TrovePayment::declined());
    }

    #[test]
    fn partial_commit_drains_everything_it_can() {
        let schedule = SpendingSchedule::standard();
        let payment = pay_with_troves(
            &schedule,
            &two_troves(),
            &Coins::from_gold(50),
            Commit::Partial,
            IGNORE,
        );
        assert!(payment.can_pay);
        assert_eq!(payment.updates.len(), 2);
        assert!(payment
            .updates
            .iter()
            .all(|u| u.quantity == 0 && u.leftover == Coins::ZERO));
    }

    #[test]
    fn zero_cost_touches_nothing() {
        let schedule = SpendingSchedule::standard();
        let payment = pay_with_troves(&schedule, &two_troves(), &Coins::ZERO, Commit::Full, IGNORE);
        assert!(payment.can_pay);
        assert!(payment.updates.is_empty());
    }

    #[test]
    fn equal_levels_keep_input_order() {
        let schedule = SpendingSchedule::standard();
        let troves = vec![
            trove("first", 2, 2, Coins::ZERO),
            trove("second", 2, 2, Coins::ZERO),
        ];
        let payment =
            pay_with_troves(&schedule, &troves, &Coins::from_silver(15), Commit::Full, IGNORE);
        let ids: Vec<&str> = payment.updates.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn payment_leaves_inputs_untouched() {
        let schedule = SpendingSchedule::standard();
        let troves = two_troves();
        let before = aggregate_value(&schedule, &troves, IGNORE);
        let snapshot = troves.clone();

        let _ = pay_with_troves(&schedule, &troves, &Coins::from_gold(10), Commit::Partial, IGNORE);

        assert_eq!(troves, snapshot);
        assert_eq!(aggregate_value(&schedule, &troves, IGNORE), before);
    }

    #[test]
    fn unpriced_trove_keeps_its_units() {
        let schedule = SpendingSchedule::standard();
        let troves = vec![
            trove("stray", 0, 5, Coins::from_silver(5)),
            trove("bare", 0, 7, Coins::ZERO),
            trove("low", 1, 10, Coins::ZERO),
        ];

        let small = pay_with_troves(&schedule, &troves, &Coins::from_silver(3), Commit::Full, IGNORE);
        assert_eq!(
            small.updates,
            vec![TroveMutation {
                id: TroveId::new("stray"),
                quantity: 5,
                leftover: Coins::from_silver(2),
            }]
        );

        let large = pay_with_troves(&schedule, &troves, &Coins::from_gold(1), Commit::Full, IGNORE);
        assert!(large.can_pay);
        let touched: Vec<(&str, u64)> = large
            .updates
            .iter()
            .map(|u| (u.id.as_str(), u.quantity))
            .collect();
        assert_eq!(touched, vec![("stray", 5), ("low", 8)]);
    }

    #[test]
    fn values_beyond_the_copper_range_are_declined() {
        let schedule = SpendingSchedule::standard();
        let huge = vec![trove("huge", 20, u64::MAX, Coins::ZERO)];
        assert_eq!(checked_total_value(&schedule, &huge), None);
        for commit in [Commit::Full, Commit::Partial] {
            let payment = pay_with_troves(&schedule, &huge, &Coins::from_gold(1), commit, IGNORE);
            assert_eq!(payment, TrovePayment::declined());
        }

        let unrepresentable_cost = Coins::from_gold(200_000_000_000_000_000);
        let payment =
            pay_with_troves(&schedule, &two_troves(), &unrepresentable_cost, Commit::Partial, IGNORE);
        assert_eq!(payment, TrovePayment::declined());
    }

    #[test]
    fn refill_repacks_at_new_level() {
        let schedule = SpendingSchedule::standard();
        let t = trove("a", 1, 10, Coins::ZERO);
        let plan = plan_refill(&schedule, &t, 3, &Coins::from_gold(5), IGNORE);
        assert_eq!(plan.level, 3);
        assert_eq!(plan.unit_price, Coins::from_silver(8));
        assert_eq!(plan.update.quantity, 6);
        assert_eq!(plan.update.leftover, Coins::from_silver(2));
    }
}
