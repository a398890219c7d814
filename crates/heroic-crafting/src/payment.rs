//! Combined payment resolution across coins and material troves.
//!
//! [`Accounting`] bundles the two parameters every accounting call needs
//! (the value schedule and the platinum policy) so they are threaded
//! explicitly instead of read from ambient state.
//!
//! Resolution is pure and idempotent. The outcome is a plan: the host must
//! apply the coin deduction and trove updates itself, and must serialize
//! "resolve" and "apply" against concurrent spends by the same actor.

use tracing::{debug, warn};

use heroic_coins::difference;
use heroic_trove::{
    Commit, PackedTrove, SpendingSchedule, TrovePayment, ValueSchedule, aggregate_value,
    checked_total_value, pack, pay_with_troves,
};
use heroic_types::{Coins, PaymentOutcome, PaymentPolicy, PlatinumPolicy, TroveRecord};

/// The schedule and normalization policy shared by all accounting calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accounting<S = SpendingSchedule> {
    /// Per-level trove unit values.
    pub schedule: S,
    /// Whether normalized amounts may use platinum.
    pub platinum: PlatinumPolicy,
}

impl Accounting<SpendingSchedule> {
    /// The published spending limit table with the default platinum policy.
    pub const fn standard() -> Self {
        Self {
            schedule: SpendingSchedule::standard(),
            platinum: PlatinumPolicy::Ignore,
        }
    }
}

impl Default for Accounting<SpendingSchedule> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<S: ValueSchedule> Accounting<S> {
    /// Build an accounting context from a schedule and platinum policy.
    pub const fn new(schedule: S, platinum: PlatinumPolicy) -> Self {
        Self { schedule, platinum }
    }

    /// Combined value of `troves`.
    pub fn trove_value(&self, troves: &[TroveRecord]) -> Coins {
        aggregate_value(&self.schedule, troves, self.platinum)
    }

    /// Pack `value` into units of a level-`level` trove.
    pub fn pack(&self, level: u32, value: &Coins) -> PackedTrove {
        pack(&self.schedule, level, value, self.platinum)
    }

    /// Draw `cost` from `troves` only.
    pub fn pay_with_troves(
        &self,
        troves: &[TroveRecord],
        cost: &Coins,
        commit: Commit,
    ) -> TrovePayment {
        pay_with_troves(&self.schedule, troves, cost, commit, self.platinum)
    }

    /// Decide how `cost` is covered from `liquid` coins and `troves` under
    /// `policy`.
    ///
    /// | policy | coins removed on success | troves |
    /// |---|---|---|
    /// | `FullCoin` | the full cost | untouched |
    /// | `PreferCoin` | the full cost, even when troves covered the shortfall | shortfall drained |
    /// | `PreferTrove` | whatever the troves could not cover | drained first |
    /// | `FullTrove` | nothing | full cost drained |
    /// | `Free` | nothing | untouched |
    ///
    /// A failed resolution removes nothing and updates nothing. Coins, cost,
    /// or troves worth more than `u64::MAX` copper fail every policy except
    /// `Free`.
    pub fn resolve(
        &self,
        policy: PaymentPolicy,
        liquid: &Coins,
        troves: &[TroveRecord],
        cost: &Coins,
    ) -> PaymentOutcome {
        if policy != PaymentPolicy::Free && !self.representable(liquid, troves, cost) {
            warn!(?policy, "payment amounts exceed the copper range; refusing");
            return PaymentOutcome::unpayable();
        }

        let outcome = match policy {
            PaymentPolicy::FullCoin => self.full_coin(liquid, cost),
            PaymentPolicy::PreferCoin => self.prefer_coin(liquid, troves, cost),
            PaymentPolicy::PreferTrove => self.prefer_trove(liquid, troves, cost),
            PaymentPolicy::FullTrove => {
                let payment = self.pay_with_troves(troves, cost, Commit::Full);
                PaymentOutcome {
                    can_pay: payment.can_pay,
                    remove_copper: 0,
                    trove_updates: payment.updates,
                }
            }
            PaymentPolicy::Free => PaymentOutcome::coins_only(0),
        };

        debug!(
            ?policy,
            cost = cost.copper_value(),
            liquid = liquid.copper_value(),
            can_pay = outcome.can_pay,
            remove_copper = outcome.remove_copper,
            trove_updates = outcome.trove_updates.len(),
            "payment resolved"
        );
        outcome
    }

    fn representable(&self, liquid: &Coins, troves: &[TroveRecord], cost: &Coins) -> bool {
        liquid.checked_copper_value().is_some()
            && cost.checked_copper_value().is_some()
            && checked_total_value(&self.schedule, troves).is_some()
    }

    fn full_coin(&self, liquid: &Coins, cost: &Coins) -> PaymentOutcome {
        if difference(liquid, cost, self.platinum).is_some() {
            PaymentOutcome::coins_only(cost.copper_value())
        } else {
            PaymentOutcome::unpayable()
        }
    }

    /// Coins first, troves for the shortfall.
    ///
    /// On success the full cost is removed from coins even though the
    /// troves paid part of it. Chat output downstream is written against
    /// this arithmetic, so it is kept as is.
    fn prefer_coin(&self, liquid: &Coins, troves: &[TroveRecord], cost: &Coins) -> PaymentOutcome {
        let Some(shortfall) = difference(cost, liquid, self.platinum) else {
            return PaymentOutcome::coins_only(cost.copper_value());
        };
        if shortfall.is_zero() {
            return PaymentOutcome::coins_only(cost.copper_value());
        }

        let payment = self.pay_with_troves(troves, &shortfall, Commit::Full);
        if !payment.can_pay {
            return PaymentOutcome::unpayable();
        }
        PaymentOutcome {
            can_pay: true,
            remove_copper: cost.copper_value(),
            trove_updates: payment.updates,
        }
    }

    /// Troves first, coins for whatever the troves cannot hold.
    fn prefer_trove(
        &self,
        liquid: &Coins,
        troves: &[TroveRecord],
        cost: &Coins,
    ) -> PaymentOutcome {
        let payment = self.pay_with_troves(troves, cost, Commit::Full);
        if payment.can_pay {
            return PaymentOutcome {
                can_pay: true,
                remove_copper: 0,
                trove_updates: payment.updates,
            };
        }

        let Some(coins_needed) = difference(cost, &self.trove_value(troves), self.platinum) else {
            return PaymentOutcome::unpayable();
        };
        if difference(liquid, &coins_needed, self.platinum).is_none() {
            return PaymentOutcome::unpayable();
        }

        let partial = self.pay_with_troves(troves, cost, Commit::Partial);
        PaymentOutcome {
            can_pay: true,
            remove_copper: coins_needed.copper_value(),
            trove_updates: partial.updates,
        }
    }
}
