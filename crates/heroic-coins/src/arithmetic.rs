//! Normalization and exact arithmetic over copper totals.
//!
//! Every operation here works on [`Coins::copper_value`] and rebuilds a
//! canonical breakdown with [`normalize`]. Nothing ever produces a negative
//! denomination: a subtraction that would go below zero returns `None`
//! instead.

use heroic_types::{Coins, PlatinumPolicy};

/// Decompose a copper total into the canonical greedy breakdown.
///
/// Under [`PlatinumPolicy::Convert`] this is the positional base-10 split
/// (`1234` becomes `1 pp, 2 gp, 3 sp, 4 cp`). Under
/// [`PlatinumPolicy::Ignore`] platinum stays zero and gold takes everything
/// from the hundreds up (`1234` becomes `12 gp, 3 sp, 4 cp`).
///
/// Silver and copper are always in `0..=9`; gold is too under `Convert`.
pub const fn normalize(total: u64, policy: PlatinumPolicy) -> Coins {
    let hundreds = total / 100;
    let (platinum, gold) = match policy {
        PlatinumPolicy::Convert => (total / 1000, hundreds % 10),
        PlatinumPolicy::Ignore => (0, hundreds),
    };
    Coins::new(platinum, gold, (total / 10) % 10, total % 10)
}

/// Re-express an amount in its canonical breakdown.
pub const fn renormalize(amount: &Coins, policy: PlatinumPolicy) -> Coins {
    normalize(amount.copper_value(), policy)
}

/// Subtract `subtrahend` from `minuend` by copper value.
///
/// Returns `None` when the result would be negative. Callers treat that as
/// "cannot afford", never as zero. An operand worth more than `u64::MAX`
/// copper cannot be compared and also yields `None`.
pub const fn difference(
    minuend: &Coins,
    subtrahend: &Coins,
    policy: PlatinumPolicy,
) -> Option<Coins> {
    let (Some(minuend), Some(subtrahend)) =
        (minuend.checked_copper_value(), subtrahend.checked_copper_value())
    else {
        return None;
    };
    match minuend.checked_sub(subtrahend) {
        Some(remaining) => Some(normalize(remaining, policy)),
        None => None,
    }
}

/// Add two amounts.
///
/// Returns `None` if the copper total overflows `u64`.
pub const fn add(a: &Coins, b: &Coins, policy: PlatinumPolicy) -> Option<Coins> {
    let (Some(a), Some(b)) = (a.checked_copper_value(), b.checked_copper_value()) else {
        return None;
    };
    match a.checked_add(b) {
        Some(total) => Some(normalize(total, policy)),
        None => None,
    }
}

/// Multiply an amount by a whole factor.
///
/// Returns `None` if the copper total overflows `u64`.
pub const fn scale(amount: &Coins, factor: u64, policy: PlatinumPolicy) -> Option<Coins> {
    let Some(value) = amount.checked_copper_value() else {
        return None;
    };
    match value.checked_mul(factor) {
        Some(total) => Some(normalize(total, policy)),
        None => None,
    }
}

/// Sum a sequence of amounts.
///
/// Returns `None` if the running copper total overflows `u64`.
pub fn sum<'a, I>(amounts: I, policy: PlatinumPolicy) -> Option<Coins>
where
    I: IntoIterator<Item = &'a Coins>,
{
    let mut total: u64 = 0;
    for amount in amounts {
        total = total.checked_add(amount.checked_copper_value()?)?;
    }
    Some(normalize(total, policy))
}

/// Halve an amount, rounding down to the copper.
pub const fn half(amount: &Coins, policy: PlatinumPolicy) -> Coins {
    normalize(amount.copper_value() / 2, policy)
}
